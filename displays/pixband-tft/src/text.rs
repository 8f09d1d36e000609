//! Text cursor layer
//!
//! Renders characters from the driver's font tables through the glyph
//! column writer, one column at a time, left to right.

use core::fmt;

use pixband_core::{LcdFont, Panel, PixelNumber};

use crate::lcd::TftLcd;

/// Font tables a driver can hold
pub const MAX_FONTS: usize = 4;

/// Cursor and text-mode state
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct TextCursor {
    pub row: PixelNumber,
    pub column: PixelNumber,
    pub right_margin: PixelNumber,
    pub font: usize,
    pub inverted: bool,
}

impl TextCursor {
    pub const fn new(num_cols: PixelNumber) -> Self {
        Self {
            row: 0,
            column: 0,
            right_margin: num_cols,
            font: 0,
            inverted: false,
        }
    }
}

impl<P: Panel> TftLcd<P> {
    /// Select the font for subsequent text
    ///
    /// Indexes past the loaded fonts are ignored.
    pub fn set_font(&mut self, index: usize) {
        if index < self.fonts.len() {
            self.text.font = index;
        }
    }

    /// Currently selected font, if any fonts were supplied
    pub fn current_font(&self) -> Option<&'static LcdFont> {
        self.fonts.get(self.text.font).copied()
    }

    /// Height of the current font in pixels (0 without fonts)
    pub fn font_height(&self) -> PixelNumber {
        self.current_font().map_or(0, |f| f.height as PixelNumber)
    }

    /// Move the text cursor to pixel `(row, col)`
    pub fn set_cursor(&mut self, row: PixelNumber, col: PixelNumber) {
        self.text.row = row;
        self.text.column = col;
    }

    /// Text cursor as `(row, col)`
    pub fn cursor(&self) -> (PixelNumber, PixelNumber) {
        (self.text.row, self.text.column)
    }

    /// Stop text output at column `col` (exclusive)
    pub fn set_right_margin(&mut self, col: PixelNumber) {
        self.text.right_margin = col.min(self.num_cols());
    }

    /// Right margin for text output
    pub fn right_margin(&self) -> PixelNumber {
        self.text.right_margin
    }

    /// Draw subsequent text with foreground and background swapped
    pub fn text_invert(&mut self, inverted: bool) {
        self.text.inverted = inverted;
    }

    /// Check whether text is drawn inverted
    pub fn is_text_inverted(&self) -> bool {
        self.text.inverted
    }

    /// Render one character at the cursor and advance past it
    ///
    /// `'\n'` moves to the start of the next text line. Characters missing
    /// from the font are skipped. Output stops at the right margin.
    /// Returns the number of columns written.
    pub fn write_char(&mut self, ch: char) -> PixelNumber {
        let Some(font) = self.current_font() else {
            return 0;
        };
        if ch == '\n' {
            self.text.row = self.text.row.saturating_add(font.height as PixelNumber);
            self.text.column = 0;
            return 0;
        }
        let Some(glyph) = font.glyph(ch) else {
            return 0;
        };

        let start = self.text.column;
        let blanks = core::iter::repeat(0).take(font.num_spaces as usize);
        for column_data in glyph.columns().chain(blanks) {
            if self.text.column >= self.text.right_margin {
                break;
            }
            self.write_column_data(column_data, font.height);
            self.text.column += 1;
        }
        self.text.column - start
    }

    /// Clear from the cursor to the right margin over one text line
    ///
    /// Like [`clear`](Self::clear), this ends inverted-text mode.
    pub fn clear_to_margin(&mut self) {
        let (row, col) = self.cursor();
        let bottom = row.saturating_add(self.font_height());
        self.clear(row, col, bottom, self.text.right_margin);
    }
}

impl<P: Panel> fmt::Write for TftLcd<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            self.write_char(ch);
        }
        Ok(())
    }
}
