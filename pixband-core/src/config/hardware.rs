//! Hardware binding types
//!
//! These describe how the panel is wired to the microcontroller. They are
//! captured once at initialization and handed to the controller's
//! bring-up routine.

use serde::{Deserialize, Serialize};

/// Default panel SPI clock (20 MHz)
pub const DEFAULT_SPI_FREQUENCY: u32 = 20_000_000;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    #[serde(default)]
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Panel hardware binding
///
/// Everything the bring-up routine needs to know about the wiring and the
/// panel's analogue calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareBinding {
    /// Chip-select pin
    pub cs_pin: PinConfig,
    /// Address/data select (A0, a.k.a. D/C) pin
    pub a0_pin: PinConfig,
    /// Chip-select active level (true = active high)
    #[serde(default)]
    pub cs_polarity: bool,
    /// SPI clock in Hz
    pub spi_frequency: u32,
    /// Panel contrast calibration
    pub contrast_ratio: u8,
    /// Panel resistor-ratio calibration
    pub resistor_ratio: u8,
}

impl Default for HardwareBinding {
    fn default() -> Self {
        Self {
            cs_pin: PinConfig::new(17),
            a0_pin: PinConfig::new(16),
            cs_polarity: false,
            spi_frequency: DEFAULT_SPI_FREQUENCY,
            contrast_ratio: 0x36,
            resistor_ratio: 0x17,
        }
    }
}
