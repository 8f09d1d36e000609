//! TFT frame buffer driver
//!
//! [`TftLcd`] owns the panel, the buffered window, the dirty rectangle
//! and the colour/text state. Drawing operations live in sibling modules
//! as further `impl` blocks; this module holds construction, bring-up and
//! the window management that every drawing call goes through.

use heapless::Vec;
use pixband_core::config::{HardwareBinding, TftConfig};
use pixband_core::{Colour, LcdFont, Panel, PixelNumber, Rect};

use crate::dirty::DirtyTracker;
use crate::text::{TextCursor, MAX_FONTS};
use crate::window::Window;

/// Windowed frame buffer over a colour TFT panel
pub struct TftLcd<P> {
    panel: P,
    num_rows: PixelNumber,
    num_cols: PixelNumber,
    pub(crate) window: Window,
    pub(crate) dirty: DirtyTracker,
    pub(crate) fg_colour: Colour,
    pub(crate) bg_colour: Colour,
    pub(crate) fonts: Vec<&'static LcdFont, MAX_FONTS>,
    pub(crate) text: TextCursor,
    binding: Option<HardwareBinding>,
    flush_count: u32,
    flush_errors: u32,
    slide_count: u32,
}

impl<P: Panel> TftLcd<P> {
    /// Create a driver for a `num_rows x num_cols` surface buffering
    /// `buffer_rows` rows at a time
    ///
    /// The buffer is allocated here and held for the driver's lifetime.
    /// Fonts beyond [`MAX_FONTS`] are ignored.
    pub fn new(
        panel: P,
        num_rows: PixelNumber,
        num_cols: PixelNumber,
        buffer_rows: PixelNumber,
        fonts: &[&'static LcdFont],
    ) -> Self {
        let mut font_table = Vec::new();
        for &font in fonts {
            if font_table.push(font).is_err() {
                warn!("Font table full, dropping font");
                break;
            }
        }

        let window = Window::new(num_rows, num_cols, buffer_rows, Colour::BLACK);
        Self {
            panel,
            num_rows,
            num_cols,
            dirty: DirtyTracker::new(window.rows(), num_cols),
            window,
            fg_colour: Colour::WHITE,
            bg_colour: Colour::BLACK,
            fonts: font_table,
            text: TextCursor::new(num_cols),
            binding: None,
            flush_count: 0,
            flush_errors: 0,
            slide_count: 0,
        }
    }

    /// Create a driver from a panel configuration
    pub fn from_config(panel: P, config: &TftConfig, fonts: &[&'static LcdFont]) -> Self {
        let mut lcd = Self::new(
            panel,
            config.num_rows,
            config.num_cols,
            config.buffer_rows,
            fonts,
        );
        lcd.fg_colour = config.foreground;
        lcd.bg_colour = config.background;
        lcd.window.reposition(0, config.background);
        lcd
    }

    /// Bring up the panel
    ///
    /// The binding is kept for [`get_spi_frequency`](Self::get_spi_frequency)
    /// and handed to the controller's bring-up routine. The window returns
    /// to the top of the surface, clean.
    pub fn init(&mut self, binding: HardwareBinding) -> Result<(), P::Error> {
        debug!(
            "TFT init: {}x{}, {} buffered rows, {} Hz",
            self.num_rows,
            self.num_cols,
            self.window.rows(),
            binding.spi_frequency
        );
        self.binding = Some(binding);
        self.dirty.reset();
        self.window.reposition(0, self.bg_colour);
        self.panel.hardware_init(&binding)
    }

    /// SPI clock this panel needs
    ///
    /// The bound frequency, capped at what the controller accepts, once
    /// initialized; the controller's preferred clock before that.
    pub fn get_spi_frequency(&self) -> u32 {
        match &self.binding {
            Some(binding) => P::spi_frequency(binding),
            None => P::PREFERRED_SPI_FREQUENCY,
        }
    }

    /// Hardware binding captured by [`init`](Self::init)
    pub fn binding(&self) -> Option<&HardwareBinding> {
        self.binding.as_ref()
    }

    /// Set the foreground colour for subsequent writes
    pub fn set_foreground_colour(&mut self, colour: Colour) {
        self.fg_colour = colour;
    }

    /// Set the background colour for subsequent writes
    pub fn set_background_colour(&mut self, colour: Colour) {
        self.bg_colour = colour;
    }

    /// Current foreground colour
    pub fn foreground_colour(&self) -> Colour {
        self.fg_colour
    }

    /// Current background colour
    pub fn background_colour(&self) -> Colour {
        self.bg_colour
    }

    /// Surface height
    pub fn num_rows(&self) -> PixelNumber {
        self.num_rows
    }

    /// Surface width
    pub fn num_cols(&self) -> PixelNumber {
        self.num_cols
    }

    /// Check whether the buffer holds unflushed changes
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Unflushed region, rows relative to the window start
    pub fn dirty_rect(&self) -> Rect {
        self.dirty.rect()
    }

    /// Surface rows `[start, end)` currently buffered
    pub fn buffer_window(&self) -> (PixelNumber, PixelNumber) {
        (self.window.start_row(), self.window.end_row())
    }

    /// Buffered colour of a pixel, if its row is in the window
    pub fn pixel(&self, row: PixelNumber, col: PixelNumber) -> Option<Colour> {
        self.window.get(row, col)
    }

    /// Number of flushes that sent data to the panel
    pub fn flush_count(&self) -> u32 {
        self.flush_count
    }

    /// Number of flushes the transport failed
    pub fn flush_errors(&self) -> u32 {
        self.flush_errors
    }

    /// Number of times the window has moved
    pub fn slide_count(&self) -> u32 {
        self.slide_count
    }

    /// Get access to the underlying panel
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Get mutable access to the underlying panel
    ///
    /// Writing to the panel directly bypasses the buffer; flush first.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Send the dirty rectangle to the panel and mark the buffer clean
    ///
    /// Exactly the bounding box is sent, one row span at a time into a
    /// single panel window. A transport failure abandons the rest of the
    /// box; the buffer is marked clean regardless.
    pub fn flush(&mut self) {
        if self.dirty.is_dirty() {
            let rect = self.dirty.take();
            self.send(rect);
        }
    }

    /// Record a window-relative region as written
    ///
    /// When the dirty box cannot grow over the region without covering
    /// pixels the panel has not been sent, the old box goes out first.
    pub(crate) fn mark_dirty(
        &mut self,
        row_start: PixelNumber,
        row_end: PixelNumber,
        col_start: PixelNumber,
        col_end: PixelNumber,
    ) {
        if let Some(pending) = self.dirty.mark(row_start, row_end, col_start, col_end) {
            self.send(pending);
        }
    }

    fn send(&mut self, rect: Rect) {
        let start = self.window.start_row();
        let area = Rect::new(
            start + rect.top,
            rect.left,
            start + rect.bottom,
            rect.right,
        );
        trace!(
            "Flush rows {}..{} cols {}..{}",
            area.top,
            area.bottom,
            area.left,
            area.right
        );

        self.flush_count += 1;
        if self.panel.set_window(&area).is_err() {
            self.flush_failed(&area);
            return;
        }
        for rel_row in rect.top..rect.bottom {
            let span = self.window.relative_span(rel_row, rect.left, rect.right);
            if self.panel.write_pixels(span).is_err() {
                self.flush_failed(&area);
                return;
            }
        }
    }

    fn flush_failed(&mut self, area: &Rect) {
        warn!(
            "Panel transport failed flushing rows {}..{}",
            area.top,
            area.bottom
        );
        self.flush_errors += 1;
    }

    /// Flush if dirty, then move the window to start at `row`
    ///
    /// The start is clamped so the window stays on the surface. The buffer
    /// is refilled with the background colour and the dirty rectangle is
    /// empty afterwards.
    pub fn set_buffer_start_row(&mut self, row: PixelNumber) {
        self.flush();
        let previous = self.window.start_row();
        self.window.reposition(row, self.bg_colour);
        self.dirty.reset();
        self.slide_count += 1;
        trace!(
            "Window slid from row {} to row {}",
            previous,
            self.window.start_row()
        );
    }

    /// Make sure surface row `row` is buffered, sliding the window if not
    ///
    /// Rows off the surface are ignored.
    pub fn ensure_row_in_buffer(&mut self, row: PixelNumber) {
        if row >= self.num_rows || self.window.contains_row(row) {
            return;
        }
        let start = self.window.start_for(row);
        self.set_buffer_start_row(start);
    }

    /// Bring as much of `[top, bottom)` into the window as fits with at
    /// most one slide
    pub(crate) fn ensure_rows_in_buffer(&mut self, top: PixelNumber, bottom: PixelNumber) {
        let bottom = bottom.min(self.num_rows);
        if top >= bottom || self.window.contains_rows(top, bottom) {
            return;
        }
        if bottom - top <= self.window.rows() || !self.window.contains_row(top) {
            let start = self.window.start_for(top);
            self.set_buffer_start_row(start);
        }
    }
}

#[cfg(feature = "defmt")]
impl<P> defmt::Format for TftLcd<P> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "TftLcd[{}x{}, window {}..{}, dirty {}]",
            self.num_rows,
            self.num_cols,
            self.window.start_row(),
            self.window.end_row(),
            self.dirty
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ShadowPanel;
    use pixband_core::HardwareInit;

    fn lcd(rows: PixelNumber, cols: PixelNumber, buffer_rows: PixelNumber) -> TftLcd<ShadowPanel> {
        TftLcd::new(ShadowPanel::new(rows, cols), rows, cols, buffer_rows, &[])
    }

    #[test]
    fn test_slide_flushes_previous_window() {
        let mut lcd = lcd(320, 240, 32);

        lcd.set_pixel(0, 0, true);
        assert!(lcd.panel().windows().is_empty());

        lcd.set_pixel(300, 0, true);

        // One slide, one flush of exactly the first pixel
        assert_eq!(lcd.slide_count(), 1);
        assert_eq!(lcd.flush_count(), 1);
        assert_eq!(lcd.panel().windows(), [Rect::new(0, 0, 1, 1)]);
        assert_eq!(lcd.panel().pixels_written(), 1);
        assert_eq!(lcd.panel().pixel(0, 0), Colour::WHITE);

        // The new window holds row 300 and only that pixel is dirty
        assert_eq!(lcd.buffer_window(), (288, 320));
        assert_eq!(lcd.dirty_rect(), Rect::new(12, 0, 13, 1));
    }

    #[test]
    fn test_ensure_row_is_idempotent() {
        let mut lcd = lcd(320, 240, 32);
        lcd.set_pixel(5, 5, true);

        lcd.ensure_row_in_buffer(100);
        lcd.ensure_row_in_buffer(100);

        assert_eq!(lcd.flush_count(), 1);
        assert_eq!(lcd.slide_count(), 1);
        assert_eq!(lcd.buffer_window(), (100, 132));
    }

    #[test]
    fn test_ensure_row_inside_window_is_noop() {
        let mut lcd = lcd(320, 240, 32);
        lcd.set_pixel(5, 5, true);

        lcd.ensure_row_in_buffer(31);
        assert!(lcd.is_dirty());
        assert_eq!(lcd.flush_count(), 0);

        // Off the surface
        lcd.ensure_row_in_buffer(320);
        assert_eq!(lcd.slide_count(), 0);
    }

    #[test]
    fn test_flush_sends_bounding_box_only() {
        let mut lcd = lcd(64, 32, 16);
        lcd.clear(0, 0, 16, 32);
        lcd.flush();
        let before = lcd.panel().pixels_written();

        lcd.set_pixel(2, 3, true);
        lcd.set_pixel(4, 10, true);
        lcd.flush();

        assert_eq!(lcd.panel().windows()[1..], [Rect::new(2, 3, 5, 11)]);
        // 3 rows x 8 columns, including unedited pixels inside the box
        assert_eq!(lcd.panel().pixels_written() - before, 24);
        assert!(!lcd.is_dirty());
        assert!(lcd.dirty_rect().is_empty());

        // Clean flush sends nothing
        lcd.flush();
        assert_eq!(lcd.flush_count(), 2);
    }

    #[test]
    fn test_box_never_covers_unwritten_pixels() {
        let mut lcd = lcd(32, 32, 32);
        lcd.bitmap_image(0, 0, 32, 32, &[0xFF; 128]);
        lcd.flush();
        lcd.set_buffer_start_row(0);

        // Buffer is background fill again; the gap must not be sent
        lcd.set_pixel(0, 0, true);
        lcd.set_pixel(0, 10, true);
        lcd.flush();

        assert_eq!(
            lcd.panel().windows()[1..],
            [Rect::new(0, 0, 1, 1), Rect::new(0, 10, 1, 11)]
        );
        assert_eq!(lcd.panel().pixel(0, 5), Colour::WHITE);
    }

    #[test]
    fn test_return_to_row_after_slide_keeps_panel() {
        let mut lcd = lcd(320, 240, 32);
        lcd.bitmap_image(0, 0, 1, 240, &[0xFF; 30]);

        // Away and back again
        lcd.set_pixel(200, 0, true);
        lcd.set_pixel(0, 0, false);
        lcd.set_pixel(0, 20, false);
        lcd.flush();

        assert_eq!(lcd.panel().pixel(0, 0), Colour::BLACK);
        assert_eq!(lcd.panel().pixel(0, 10), Colour::WHITE);
        assert_eq!(lcd.panel().pixel(0, 20), Colour::BLACK);
    }

    #[test]
    fn test_spi_frequency_capped_by_controller() {
        let mut lcd = lcd(32, 32, 8);
        let binding = HardwareBinding {
            spi_frequency: 40_000_000,
            ..HardwareBinding::default()
        };
        lcd.init(binding).unwrap();
        assert_eq!(lcd.get_spi_frequency(), ShadowPanel::MAX_SPI_FREQUENCY);

        let unset = HardwareBinding {
            spi_frequency: 0,
            ..HardwareBinding::default()
        };
        lcd.init(unset).unwrap();
        assert_eq!(lcd.get_spi_frequency(), ShadowPanel::PREFERRED_SPI_FREQUENCY);
    }

    #[test]
    fn test_clean_slide_does_not_flush() {
        let mut lcd = lcd(320, 240, 32);
        lcd.set_buffer_start_row(64);
        assert_eq!(lcd.flush_count(), 0);
        assert_eq!(lcd.buffer_window(), (64, 96));
    }

    #[test]
    fn test_set_buffer_start_row_is_clamped() {
        let mut lcd = lcd(100, 10, 40);
        lcd.set_buffer_start_row(90);
        assert_eq!(lcd.buffer_window(), (60, 100));
    }

    #[test]
    fn test_transport_failure_is_counted() {
        let mut lcd = lcd(64, 32, 16);
        lcd.panel_mut().fail_writes(true);

        lcd.set_pixel(1, 1, true);
        lcd.flush();

        assert_eq!(lcd.flush_errors(), 1);
        assert!(!lcd.is_dirty());

        // Drawing carries on after a failure
        lcd.panel_mut().fail_writes(false);
        lcd.set_pixel(1, 1, true);
        lcd.flush();
        assert_eq!(lcd.flush_errors(), 1);
        assert_eq!(lcd.panel().pixel(1, 1), Colour::WHITE);
    }

    #[test]
    fn test_init_runs_bring_up() {
        let mut lcd = lcd(320, 240, 32);
        assert_eq!(lcd.get_spi_frequency(), ShadowPanel::PREFERRED_SPI_FREQUENCY);

        lcd.set_pixel(200, 0, true);
        let binding = HardwareBinding {
            spi_frequency: 12_000_000,
            contrast_ratio: 0x20,
            ..HardwareBinding::default()
        };
        lcd.init(binding).unwrap();

        assert_eq!(lcd.panel().init_calls(), 1);
        assert_eq!(lcd.panel().last_binding(), Some(binding));
        assert_eq!(lcd.get_spi_frequency(), 12_000_000);
        assert_eq!(lcd.binding(), Some(&binding));
        assert_eq!(lcd.buffer_window(), (0, 32));
        assert!(!lcd.is_dirty());
    }

    #[test]
    fn test_init_failure_is_reported() {
        let mut lcd = lcd(32, 32, 8);
        lcd.panel_mut().fail_writes(true);
        assert!(lcd.init(HardwareBinding::default()).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = TftConfig {
            num_rows: 160,
            num_cols: 128,
            buffer_rows: 20,
            foreground: Colour::YELLOW,
            background: Colour::BLUE,
            ..TftConfig::default()
        };
        let lcd = TftLcd::from_config(ShadowPanel::new(160, 128), &config, &[]);

        assert_eq!(lcd.num_rows(), 160);
        assert_eq!(lcd.num_cols(), 128);
        assert_eq!(lcd.buffer_window(), (0, 20));
        assert_eq!(lcd.foreground_colour(), Colour::YELLOW);
        assert_eq!(lcd.pixel(0, 0), Some(Colour::BLUE));
    }

    #[test]
    fn test_colour_change_only_affects_later_writes() {
        let mut lcd = lcd(16, 16, 16);
        lcd.set_pixel(0, 0, true);
        lcd.set_foreground_colour(Colour::RED);
        lcd.set_pixel(0, 1, true);

        assert_eq!(lcd.pixel(0, 0), Some(Colour::WHITE));
        assert_eq!(lcd.pixel(0, 1), Some(Colour::RED));
    }

    #[test]
    fn test_multi_row_ensure_uses_one_slide() {
        let mut lcd = lcd(320, 240, 32);
        lcd.ensure_rows_in_buffer(20, 40);
        assert_eq!(lcd.slide_count(), 1);
        assert_eq!(lcd.buffer_window(), (20, 52));

        // Taller than the window: start at the top row if not buffered
        lcd.ensure_rows_in_buffer(100, 200);
        assert_eq!(lcd.buffer_window(), (100, 132));
        lcd.ensure_rows_in_buffer(100, 200);
        assert_eq!(lcd.slide_count(), 2);
    }
}
