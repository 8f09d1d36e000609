//! Glyph column writer

use pixband_core::font::MAX_FONT_HEIGHT;
use pixband_core::{Panel, PixelNumber};

use crate::lcd::TftLcd;

impl<P: Panel> TftLcd<P> {
    /// Write one vertical strip of glyph pixels at the text cursor
    ///
    /// Bit `i` of `column_data` (bit 0 at the top) selects the foreground
    /// or background colour for cursor row `+ i`; inverted-text mode swaps
    /// the two. The strip is clipped to 16 pixels and to the surface. The
    /// cursor does not move.
    pub fn write_column_data(&mut self, column_data: u16, y_size: u8) {
        let (row, col) = (self.text.row, self.text.column);
        if row >= self.num_rows() || col >= self.num_cols() {
            return;
        }
        let height = (y_size.min(MAX_FONT_HEIGHT) as u16).min(self.num_rows() - row);
        if height == 0 {
            return;
        }

        self.ensure_rows_in_buffer(row, row + height);
        let inverted = self.text.inverted;
        // Rows written since the window last moved, marked as one strip
        let mut strip_top = row;
        for target in row..row + height {
            if !self.window.contains_row(target) {
                self.mark_strip(strip_top, target, col);
                self.ensure_row_in_buffer(target);
                strip_top = target;
            }
            let bit = (column_data >> (target - row)) & 1 != 0;
            let colour = if bit != inverted {
                self.fg_colour
            } else {
                self.bg_colour
            };
            self.window.set(target, col, colour);
        }
        self.mark_strip(strip_top, row + height, col);
    }

    fn mark_strip(&mut self, top: PixelNumber, bottom: PixelNumber, col: PixelNumber) {
        let start = self.window.start_row();
        self.mark_dirty(top - start, bottom - start, col, col + 1);
    }
}
