//! MIPI-DCS link over SPI
//!
//! Four-wire serial interface used by ILI9xxx-class controllers:
//!
//! - Chip-select frames every transaction (active level configurable)
//! - A0 low marks a command byte, A0 high marks parameters and pixel data
//! - Addresses for `CASET`/`PASET` are inclusive start/end pairs,
//!   big-endian

use pixband_core::{Colour, Rect};
use pixband_hal::gpio::ActivePin;
use pixband_hal::{OutputPin, SpiBus};

/// Commands shared by DCS controllers
pub mod cmd {
    /// No operation
    pub const NOP: u8 = 0x00;
    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Leave sleep mode
    pub const SLPOUT: u8 = 0x11;
    /// Normal display mode
    pub const NORON: u8 = 0x13;
    /// Inversion off
    pub const INVOFF: u8 = 0x20;
    /// Display off
    pub const DISPOFF: u8 = 0x28;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Page (row) address set
    pub const PASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
    /// Memory access control
    pub const MADCTL: u8 = 0x36;
    /// Pixel format
    pub const COLMOD: u8 = 0x3A;
    /// Power control 1
    pub const PWCTRL1: u8 = 0xC0;
    /// Power control 2
    pub const PWCTRL2: u8 = 0xC1;
    /// VCOM control
    pub const VMCTRL: u8 = 0xC5;
}

/// MADCTL bits
pub mod madctl {
    /// Column address order (mirror X)
    pub const MX: u8 = 0x40;
    /// Row address order (mirror Y)
    pub const MY: u8 = 0x80;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    /// BGR colour filter panel
    pub const BGR: u8 = 0x08;
}

/// Pixel data is staged through a stack buffer of this many bytes
/// (a multiple of both 2 and 3 so 16- and 18-bit pixels pack exactly)
const STAGING_BYTES: usize = 96;

/// DCS link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DcsError<E> {
    /// SPI bus error
    Spi(E),
    /// Empty address window
    EmptyWindow,
}

/// Command/data link to a DCS controller
pub struct DcsLink<SPI, CS, DC> {
    spi: SPI,
    cs: ActivePin<CS>,
    dc: DC,
}

impl<SPI, CS, DC> DcsLink<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Create a link, leaving the panel deselected
    pub fn new(spi: SPI, cs: CS, dc: DC, cs_active_high: bool) -> Self {
        Self {
            spi,
            cs: ActivePin::new(cs, cs_active_high),
            dc,
        }
    }

    /// Change the chip-select active level
    pub fn set_cs_polarity(&mut self, active_high: bool) {
        self.cs.set_active_high(active_high);
    }

    /// Send a command followed by its parameters
    pub fn command(&mut self, command: u8, params: &[u8]) -> Result<(), DcsError<SPI::Error>> {
        self.cs.activate();
        let result = self.command_selected(command, params);
        self.cs.deactivate();
        result
    }

    fn command_selected(&mut self, command: u8, params: &[u8]) -> Result<(), DcsError<SPI::Error>> {
        self.dc.set_low();
        self.spi.write(&[command]).map_err(DcsError::Spi)?;
        self.spi.flush().map_err(DcsError::Spi)?;
        self.dc.set_high();
        if !params.is_empty() {
            self.spi.write(params).map_err(DcsError::Spi)?;
        }
        self.spi.flush().map_err(DcsError::Spi)
    }

    /// Select the controller RAM region for the next memory write
    ///
    /// `area` has exclusive bottom/right edges; the controller wants
    /// inclusive ones. Ends with `RAMWR` so pixel data can follow.
    pub fn set_address_window(&mut self, area: &Rect) -> Result<(), DcsError<SPI::Error>> {
        if area.is_empty() {
            return Err(DcsError::EmptyWindow);
        }
        let [l_hi, l_lo] = area.left.to_be_bytes();
        let [r_hi, r_lo] = (area.right - 1).to_be_bytes();
        let [t_hi, t_lo] = area.top.to_be_bytes();
        let [b_hi, b_lo] = (area.bottom - 1).to_be_bytes();

        self.command(cmd::CASET, &[l_hi, l_lo, r_hi, r_lo])?;
        self.command(cmd::PASET, &[t_hi, t_lo, b_hi, b_lo])?;
        self.command(cmd::RAMWR, &[])
    }

    /// Stream pixels, encoding each into `N` wire bytes
    pub fn write_pixels<const N: usize>(
        &mut self,
        pixels: &[Colour],
        encode: impl Fn(Colour) -> [u8; N],
    ) -> Result<(), DcsError<SPI::Error>> {
        self.cs.activate();
        self.dc.set_high();
        let result = self.write_pixels_selected(pixels, encode);
        self.cs.deactivate();
        result
    }

    fn write_pixels_selected<const N: usize>(
        &mut self,
        pixels: &[Colour],
        encode: impl Fn(Colour) -> [u8; N],
    ) -> Result<(), DcsError<SPI::Error>> {
        const { assert!(N > 0 && N <= STAGING_BYTES, "pixel wider than the staging buffer") };
        let mut staging = [0u8; STAGING_BYTES];
        let per_chunk = STAGING_BYTES / N;

        for group in pixels.chunks(per_chunk) {
            let mut len = 0;
            for &pixel in group {
                staging[len..len + N].copy_from_slice(&encode(pixel));
                len += N;
            }
            self.spi.write(&staging[..len]).map_err(DcsError::Spi)?;
        }
        self.spi.flush().map_err(DcsError::Spi)
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, CS, DC) {
        (self.spi, self.cs.into_inner(), self.dc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Bus, Event};

    #[test]
    fn test_command_framing() {
        let bus = Bus::new();
        let mut link = DcsLink::new(bus.spi(), bus.cs(), bus.dc(), false);

        link.command(cmd::MADCTL, &[0x48]).unwrap();

        assert_eq!(
            bus.events(),
            [Event::Command(cmd::MADCTL), Event::Data(0x48)]
        );
        // Every byte went out with CS at its active (low) level
        assert!(bus.all_selected());
        // And the panel is deselected afterwards
        assert!(bus.cs_high());
    }

    #[test]
    fn test_active_high_chip_select() {
        let bus = Bus::new();
        let mut link = DcsLink::new(bus.spi(), bus.cs(), bus.dc(), true);
        bus.set_active_high(true);

        link.command(cmd::NOP, &[]).unwrap();

        assert_eq!(bus.events(), [Event::Command(cmd::NOP)]);
        assert!(bus.all_selected());
        assert!(!bus.cs_high());
    }

    #[test]
    fn test_address_window_is_inclusive() {
        let bus = Bus::new();
        let mut link = DcsLink::new(bus.spi(), bus.cs(), bus.dc(), false);

        link.set_address_window(&Rect::new(300, 10, 302, 266)).unwrap();

        assert_eq!(
            bus.events(),
            [
                Event::Command(cmd::CASET),
                Event::Data(0x00),
                Event::Data(10),
                Event::Data(0x01),
                Event::Data(0x09), // 265
                Event::Command(cmd::PASET),
                Event::Data(0x01),
                Event::Data(0x2C), // 300
                Event::Data(0x01),
                Event::Data(0x2D), // 301
                Event::Command(cmd::RAMWR),
            ]
        );
    }

    #[test]
    fn test_empty_window_rejected() {
        let bus = Bus::new();
        let mut link = DcsLink::new(bus.spi(), bus.cs(), bus.dc(), false);

        assert_eq!(
            link.set_address_window(&Rect::new(5, 5, 5, 10)),
            Err(DcsError::EmptyWindow)
        );
        assert!(bus.events().is_empty());
    }

    #[test]
    fn test_pixel_stream_crosses_staging_chunks() {
        let bus = Bus::new();
        let mut link = DcsLink::new(bus.spi(), bus.cs(), bus.dc(), false);

        // 40 pixels x 3 bytes overflows one 96-byte staging buffer
        let pixels = [Colour::RED; 40];
        link.write_pixels(&pixels, Colour::to_rgb666).unwrap();

        let events = bus.events();
        assert_eq!(events.len(), 120);
        assert!(events.iter().all(|e| matches!(e, Event::Data(_))));
        assert_eq!(events[0], Event::Data(0xFC));
        assert_eq!(events[1], Event::Data(0x00));
        assert_eq!(events[117], Event::Data(0xFC));
        assert!(bus.all_selected());
    }

    #[test]
    fn test_widest_pixel_encoding_streams_one_per_chunk() {
        let bus = Bus::new();
        let mut link = DcsLink::new(bus.spi(), bus.cs(), bus.dc(), false);

        let wide = |c: Colour| {
            let mut bytes = [0u8; STAGING_BYTES];
            bytes[0] = c.to_be_bytes()[0];
            bytes[STAGING_BYTES - 1] = 0xAA;
            bytes
        };
        link.write_pixels(&[Colour::RED, Colour::BLUE, Colour::WHITE], wide)
            .unwrap();

        let events = bus.events();
        assert_eq!(events.len(), 3 * STAGING_BYTES);
        assert_eq!(events[0], Event::Data(0xF8));
        assert_eq!(events[STAGING_BYTES], Event::Data(0x00));
        assert_eq!(events[2 * STAGING_BYTES], Event::Data(0xFF));
        assert_eq!(events[3 * STAGING_BYTES - 1], Event::Data(0xAA));
    }

    #[test]
    fn test_spi_error_releases_chip_select() {
        let bus = Bus::new();
        let mut link = DcsLink::new(bus.spi(), bus.cs(), bus.dc(), false);
        bus.fail_writes(true);

        assert_eq!(link.command(cmd::SLPOUT, &[]), Err(DcsError::Spi(())));
        assert!(bus.cs_high());
    }
}
