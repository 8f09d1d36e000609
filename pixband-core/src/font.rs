//! Font table format
//!
//! Fonts are column-major bitmaps. Each glyph occupies
//! `1 + width * bytes_per_column` bytes:
//!
//! ```text
//! [used_width] [col 0 lo] [col 0 hi] [col 1 lo] [col 1 hi] ...
//! ```
//!
//! Column words are little-endian and bit 0 is the top pixel, which is the
//! order the glyph column writer consumes them in.

/// Tallest glyph the column writer can draw in one strip
pub const MAX_FONT_HEIGHT: u8 = 16;

/// A font table
#[derive(Debug, Clone, Copy)]
pub struct LcdFont {
    /// Glyph data for `start_char..=end_char`
    pub data: &'static [u8],
    /// First character in the table
    pub start_char: u16,
    /// Last character in the table
    pub end_char: u16,
    /// Glyph height in pixels (at most [`MAX_FONT_HEIGHT`])
    pub height: u8,
    /// Maximum glyph width in columns
    pub width: u8,
    /// Blank columns written after each glyph
    pub num_spaces: u8,
}

impl LcdFont {
    /// Bytes per glyph column
    pub const fn bytes_per_column(&self) -> usize {
        (self.height as usize + 7) / 8
    }

    /// Bytes per glyph, including the leading width byte
    pub const fn bytes_per_char(&self) -> usize {
        1 + self.width as usize * self.bytes_per_column()
    }

    /// Look up the glyph for a character
    ///
    /// Returns `None` for characters outside the table or when the table
    /// data is too short to hold the glyph.
    pub fn glyph(&self, ch: char) -> Option<Glyph<'_>> {
        let code = ch as u32;
        if code < self.start_char as u32 || code > self.end_char as u32 {
            return None;
        }
        let start = (code - self.start_char as u32) as usize * self.bytes_per_char();
        let bytes = self.data.get(start..start + self.bytes_per_char())?;
        Some(Glyph {
            width: bytes[0].min(self.width),
            columns: &bytes[1..],
            bytes_per_column: self.bytes_per_column(),
        })
    }
}

/// One glyph of a font table
#[derive(Debug, Clone, Copy)]
pub struct Glyph<'a> {
    /// Columns actually used by this glyph
    pub width: u8,
    columns: &'a [u8],
    bytes_per_column: usize,
}

impl Glyph<'_> {
    /// Column bitmap, bit 0 at the top
    ///
    /// Columns past the glyph's used width read as blank.
    pub fn column(&self, index: u8) -> u16 {
        if index >= self.width {
            return 0;
        }
        let start = index as usize * self.bytes_per_column;
        self.columns
            .get(start..start + self.bytes_per_column)
            .map(|bytes| {
                bytes
                    .iter()
                    .rev()
                    .fold(0u16, |acc, &b| (acc << 8) | b as u16)
            })
            .unwrap_or(0)
    }

    /// Iterate over the used columns
    pub fn columns(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.width).map(move |i| self.column(i))
    }
}
