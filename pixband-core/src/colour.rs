//! RGB565 colour type

use serde::{Deserialize, Serialize};

/// Panel colour (16-bit: 5 red, 6 green, 5 blue)
///
/// This is the single pixel representation held in the image buffer.
/// Controllers that need a wider format on the wire expand it while
/// streaming (see [`Colour::to_rgb666`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Colour(pub u16);

impl Colour {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const BLUE: Self = Self(0x001F);
    pub const YELLOW: Self = Self(0xFFE0);

    /// Create RGB565 from RGB888 components
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r5 = (r >> 3) as u16;
        let g6 = (g >> 2) as u16;
        let b5 = (b >> 3) as u16;
        Self((r5 << 11) | (g6 << 5) | b5)
    }

    /// Big-endian bytes, the order 16-bit panels expect
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Expand to three bytes of 6-bit channels (left-aligned)
    ///
    /// 5-bit channels replicate their top bit into the spare low bit so
    /// that full scale stays full scale.
    pub const fn to_rgb666(self) -> [u8; 3] {
        let r5 = ((self.0 >> 11) & 0x1F) as u8;
        let g6 = ((self.0 >> 5) & 0x3F) as u8;
        let b5 = (self.0 & 0x1F) as u8;
        let r6 = (r5 << 1) | (r5 >> 4);
        let b6 = (b5 << 1) | (b5 >> 4);
        [r6 << 2, g6 << 2, b6 << 2]
    }
}

impl From<u16> for Colour {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}
