//! ILI9341 controller (SPI mode)
//!
//! 240x320 TFT controller driven with 16-bit pixels, sent big-endian.

use embedded_hal::delay::DelayNs;
use pixband_core::config::HardwareBinding;
use pixband_core::{Colour, HardwareInit, PanelTransport, Rect};
use pixband_hal::{OutputPin, SpiBus, SpiConfig};

use crate::dcs::{cmd, madctl, DcsError, DcsLink};

/// Panel width in pixels
pub const WIDTH: u16 = 240;
/// Panel height in pixels
pub const HEIGHT: u16 = 320;

/// Write clock most ILI9341 modules run reliably at
pub const MAX_SPI_FREQUENCY: u32 = 40_000_000;

/// Interface pixel format: 16 bits per pixel
const COLMOD_16BIT: u8 = 0x55;

/// ILI9341 driver
pub struct Ili9341<SPI, CS, DC, D> {
    link: DcsLink<SPI, CS, DC>,
    delay: D,
}

impl<SPI, CS, DC, D> Ili9341<SPI, CS, DC, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    D: DelayNs,
{
    /// Create a new ILI9341 driver
    pub fn new(link: DcsLink<SPI, CS, DC>, delay: D) -> Self {
        Self { link, delay }
    }

    /// SPI settings for this binding
    pub fn spi_config(binding: &HardwareBinding) -> SpiConfig {
        SpiConfig::mode0(Self::spi_frequency(binding))
    }

    /// Release the link and delay provider
    pub fn release(self) -> (DcsLink<SPI, CS, DC>, D) {
        (self.link, self.delay)
    }
}

impl<SPI, CS, DC, D> PanelTransport for Ili9341<SPI, CS, DC, D>
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
        self.link.write_pixels(pixels, Colour::to_be_bytes)
    }
}

impl<SPI, CS, DC, D> HardwareInit for Ili9341<SPI, CS, DC, D>
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
        self.delay.delay_ms(150);
        self.link.command(cmd::SLPOUT, &[])?;
        self.delay.delay_ms(120);

        // GVDD level (6 bits)
        self.link
            .command(cmd::PWCTRL1, &[binding.resistor_ratio & 0x3F])?;
        // VCOMH from contrast, VCOML fixed
        self.link
            .command(cmd::VMCTRL, &[binding.contrast_ratio & 0x7F, 0x28])?;

        self.link.command(cmd::MADCTL, &[madctl::MX | madctl::BGR])?;
        self.link.command(cmd::COLMOD, &[COLMOD_16BIT])?;
        self.link.command(cmd::DISPON, &[])?;
        self.delay.delay_ms(20);

        Ok(())
    }
}
