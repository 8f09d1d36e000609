//! Panel geometry and colour configuration

use serde::{Deserialize, Serialize};

use super::hardware::HardwareBinding;
use crate::colour::Colour;
use crate::geometry::PixelNumber;

/// Default number of buffered rows
pub const DEFAULT_BUFFER_ROWS: PixelNumber = 32;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Zero rows or columns
    EmptySurface,
    /// Buffer window is empty or taller than the surface
    InvalidBufferRows,
    /// SPI clock of zero
    InvalidFrequency,
    /// Chip-select and A0 share a pin
    PinConflict,
    /// Serialized config does not fit or does not parse
    Encoding,
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TftConfig {
    /// Surface height in pixels
    pub num_rows: PixelNumber,
    /// Surface width in pixels
    pub num_cols: PixelNumber,
    /// Rows held in the image buffer at a time
    #[serde(default = "default_buffer_rows")]
    pub buffer_rows: PixelNumber,
    /// Initial foreground colour
    #[serde(default = "default_foreground")]
    pub foreground: Colour,
    /// Initial background colour
    #[serde(default)]
    pub background: Colour,
    /// Wiring and calibration
    #[serde(default)]
    pub binding: HardwareBinding,
}

fn default_buffer_rows() -> PixelNumber {
    DEFAULT_BUFFER_ROWS
}

fn default_foreground() -> Colour {
    Colour::WHITE
}

impl Default for TftConfig {
    fn default() -> Self {
        // 3.5" ILI9488 module in portrait
        Self {
            num_rows: 480,
            num_cols: 320,
            buffer_rows: DEFAULT_BUFFER_ROWS,
            foreground: Colour::WHITE,
            background: Colour::BLACK,
            binding: HardwareBinding::default(),
        }
    }
}

impl TftConfig {
    /// Check the configuration for inconsistencies
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_rows == 0 || self.num_cols == 0 {
            return Err(ConfigError::EmptySurface);
        }
        if self.buffer_rows == 0 || self.buffer_rows > self.num_rows {
            return Err(ConfigError::InvalidBufferRows);
        }
        if self.binding.spi_frequency == 0 {
            return Err(ConfigError::InvalidFrequency);
        }
        if self.binding.cs_pin.pin == self.binding.a0_pin.pin {
            return Err(ConfigError::PinConflict);
        }
        Ok(())
    }

    /// Bytes of RAM the image buffer will take
    pub const fn buffer_bytes(&self) -> usize {
        self.buffer_rows as usize * self.num_cols as usize * core::mem::size_of::<Colour>()
    }

    /// Serialize into `buf` for flash storage
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encoding)
    }

    /// Deserialize from flash storage and validate
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Encoding)?;
        config.validate()?;
        Ok(config)
    }
}
