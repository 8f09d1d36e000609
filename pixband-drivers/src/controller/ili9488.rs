//! ILI9488 controller (SPI mode)
//!
//! 320x480 TFT controller. Over SPI the ILI9488 only accepts 18-bit
//! pixels, so each RGB565 colour is expanded to three bytes while
//! streaming.
//!
//! # Calibration
//!
//! - `resistor_ratio` programs Power Control 1 (VREG1OUT/VREG2OUT level)
//! - `contrast_ratio` programs the VCOM level in VCOM Control

use embedded_hal::delay::DelayNs;
use pixband_core::config::HardwareBinding;
use pixband_core::{Colour, HardwareInit, PanelTransport, Rect};
use pixband_hal::{OutputPin, SpiBus, SpiConfig};

use crate::dcs::{cmd, madctl, DcsError, DcsLink};

/// Panel width in pixels
pub const WIDTH: u16 = 320;
/// Panel height in pixels
pub const HEIGHT: u16 = 480;

/// Fastest write clock the controller tolerates
pub const MAX_SPI_FREQUENCY: u32 = 20_000_000;

/// Interface pixel format: 18 bits per pixel
const COLMOD_18BIT: u8 = 0x66;

/// ILI9488 driver
pub struct Ili9488<SPI, CS, DC, D> {
    link: DcsLink<SPI, CS, DC>,
    delay: D,
    orientation: u8,
}

impl<SPI, CS, DC, D> Ili9488<SPI, CS, DC, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    D: DelayNs,
{
    /// Create a new ILI9488 driver in portrait orientation
    pub fn new(link: DcsLink<SPI, CS, DC>, delay: D) -> Self {
        Self {
            link,
            delay,
            orientation: madctl::MX | madctl::BGR,
        }
    }

    /// Override the MADCTL value sent during bring-up
    pub fn with_orientation(mut self, madctl: u8) -> Self {
        self.orientation = madctl;
        self
    }

    /// SPI settings for this binding
    pub fn spi_config(binding: &HardwareBinding) -> SpiConfig {
        SpiConfig::mode0(Self::spi_frequency(binding))
    }

    /// Turn the display output on or off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DcsError<SPI::Error>> {
        self.link
            .command(if on { cmd::DISPON } else { cmd::DISPOFF }, &[])
    }

    /// Release the link and delay provider
    pub fn release(self) -> (DcsLink<SPI, CS, DC>, D) {
        (self.link, self.delay)
    }
}

impl<SPI, CS, DC, D> PanelTransport for Ili9488<SPI, CS, DC, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    D: DelayNs,
{
    type Error = DcsError<SPI::Error>;

    fn set_window(&mut self, area: &Rect) -> Result<(), Self::Error> {
        self.link.set_address_window(area)
    }

    fn write_pixels(&mut self, pixels: &[Colour]) -> Result<(), Self::Error> {
        self.link.write_pixels(pixels, Colour::to_rgb666)
    }
}

impl<SPI, CS, DC, D> HardwareInit for Ili9488<SPI, CS, DC, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    D: DelayNs,
{
    const PREFERRED_SPI_FREQUENCY: u32 = MAX_SPI_FREQUENCY;
    const MAX_SPI_FREQUENCY: u32 = MAX_SPI_FREQUENCY;

    fn hardware_init(&mut self, binding: &HardwareBinding) -> Result<(), Self::Error> {
        self.link.set_cs_polarity(binding.cs_polarity);

        self.link.command(cmd::SWRESET, &[])?;
        self.delay.delay_ms(120);
        self.link.command(cmd::SLPOUT, &[])?;
        self.delay.delay_ms(120);

        // VREG1OUT / VREG2OUT
        self.link.command(
            cmd::PWCTRL1,
            &[binding.resistor_ratio, binding.resistor_ratio],
        )?;
        self.link.command(cmd::PWCTRL2, &[0x41])?;
        // VCOM from NV memory off, then the calibrated level
        self.link
            .command(cmd::VMCTRL, &[0x00, binding.contrast_ratio, 0x80])?;

        self.link.command(cmd::MADCTL, &[self.orientation])?;
        self.link.command(cmd::COLMOD, &[COLMOD_18BIT])?;
        self.link.command(cmd::INVOFF, &[])?;
        self.link.command(cmd::NORON, &[])?;
        self.link.command(cmd::DISPON, &[])?;
        self.delay.delay_ms(20);

        Ok(())
    }
}
