//! Panel double that mirrors what reaches the glass

use std::vec;
use std::vec::Vec;

use pixband_core::config::HardwareBinding;
use pixband_core::{Colour, HardwareInit, PanelTransport, PixelNumber, Rect};

/// Colour of panel pixels nothing has been sent to
pub const UNWRITTEN: Colour = Colour(0x0F0F);

/// Records every window and keeps a full shadow frame of the panel
pub struct ShadowPanel {
    cols: PixelNumber,
    frame: Vec<Colour>,
    windows: Vec<Rect>,
    area: Rect,
    cursor: usize,
    pixels_written: usize,
    init_calls: u32,
    last_binding: Option<HardwareBinding>,
    fail: bool,
}

impl ShadowPanel {
    pub fn new(rows: PixelNumber, cols: PixelNumber) -> Self {
        Self {
            cols,
            frame: vec![UNWRITTEN; rows as usize * cols as usize],
            windows: Vec::new(),
            area: Rect::EMPTY,
            cursor: 0,
            pixels_written: 0,
            init_calls: 0,
            last_binding: None,
            fail: false,
        }
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Panel windows opened so far, in order
    pub fn windows(&self) -> &[Rect] {
        &self.windows
    }

    pub fn pixels_written(&self) -> usize {
        self.pixels_written
    }

    /// Colour currently on the panel
    pub fn pixel(&self, row: PixelNumber, col: PixelNumber) -> Colour {
        self.frame[row as usize * self.cols as usize + col as usize]
    }

    pub fn init_calls(&self) -> u32 {
        self.init_calls
    }

    pub fn last_binding(&self) -> Option<HardwareBinding> {
        self.last_binding
    }
}

impl PanelTransport for ShadowPanel {
    type Error = ();

    fn set_window(&mut self, area: &Rect) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        assert!(!area.is_empty(), "empty panel window");
        self.windows.push(*area);
        self.area = *area;
        self.cursor = 0;
        Ok(())
    }

    fn write_pixels(&mut self, pixels: &[Colour]) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        let width = self.area.width() as usize;
        for &pixel in pixels {
            if self.cursor >= self.area.area() {
                break;
            }
            let row = self.area.top as usize + self.cursor / width;
            let col = self.area.left as usize + self.cursor % width;
            self.frame[row * self.cols as usize + col] = pixel;
            self.cursor += 1;
            self.pixels_written += 1;
        }
        Ok(())
    }
}

impl HardwareInit for ShadowPanel {
    const PREFERRED_SPI_FREQUENCY: u32 = 10_000_000;
    const MAX_SPI_FREQUENCY: u32 = 16_000_000;

    fn hardware_init(&mut self, binding: &HardwareBinding) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.init_calls += 1;
        self.last_binding = Some(*binding);
        Ok(())
    }
}
