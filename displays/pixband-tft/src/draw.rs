//! Pixel and region drawing
//!
//! Every operation clips to the surface, brings each target row into the
//! window before touching it and marks what it wrote dirty.

use pixband_core::{Colour, Panel, PixelNumber};

use crate::lcd::TftLcd;

impl<P: Panel> TftLcd<P> {
    /// Set (`mode = true`) or clear a pixel
    ///
    /// `row` is measured down from the top, `col` from the left edge.
    /// Pixels off the surface are ignored.
    pub fn set_pixel(&mut self, row: PixelNumber, col: PixelNumber, mode: bool) {
        let colour = if mode { self.fg_colour } else { self.bg_colour };
        self.put_pixel(row, col, colour);
    }

    /// Write one pixel in an explicit colour
    pub(crate) fn put_pixel(&mut self, row: PixelNumber, col: PixelNumber, colour: Colour) {
        if row >= self.num_rows() || col >= self.num_cols() {
            return;
        }
        self.ensure_row_in_buffer(row);
        if self.window.set(row, col, colour) {
            let rel = row - self.window.start_row();
            self.mark_dirty(rel, rel + 1, col, col + 1);
        }
    }

    /// Fill `[top, bottom) x [left, right)` with the background colour and
    /// leave inverted-text mode
    pub fn clear(
        &mut self,
        top: PixelNumber,
        left: PixelNumber,
        bottom: PixelNumber,
        right: PixelNumber,
    ) {
        self.text.inverted = false;
        self.fill_rect(top, left, bottom, right, self.bg_colour);
    }

    /// Fill a rectangle, clipped to the surface, with one colour
    pub(crate) fn fill_rect(
        &mut self,
        top: PixelNumber,
        left: PixelNumber,
        bottom: PixelNumber,
        right: PixelNumber,
        colour: Colour,
    ) {
        let bottom = bottom.min(self.num_rows());
        let right = right.min(self.num_cols());
        if top >= bottom || left >= right {
            return;
        }

        self.ensure_rows_in_buffer(top, bottom);
        for row in top..bottom {
            self.ensure_row_in_buffer(row);
            if let Some(span) = self.window.span_mut(row, left, right) {
                span.fill(colour);
                let rel = row - self.window.start_row();
                self.mark_dirty(rel, rel + 1, left, right);
            }
        }
    }

    /// Draw a packed monochrome bitmap
    ///
    /// `data` holds `height` rows of `width / 8` bytes, most significant bit
    /// first; set bits draw in the foreground colour, clear bits in the
    /// background colour. `width` is expected to be a multiple of 8; a
    /// ragged width is padded to whole bytes per row. Rows or columns off
    /// the surface and rows past the end of `data` are skipped.
    pub fn bitmap_image(
        &mut self,
        top: PixelNumber,
        left: PixelNumber,
        height: PixelNumber,
        width: PixelNumber,
        data: &[u8],
    ) {
        let bytes_per_row = (width as usize + 7) / 8;
        if bytes_per_row == 0 {
            return;
        }
        for (r, row_data) in data.chunks(bytes_per_row).take(height as usize).enumerate() {
            let row = match top.checked_add(r as PixelNumber) {
                Some(row) if row < self.num_rows() => row,
                _ => break,
            };
            self.bitmap_row(row, left, width, row_data, false);
        }
    }

    /// Draw one row of a packed monochrome bitmap
    ///
    /// `data` holds `ceil(width / 8)` bytes, most significant bit first.
    /// With `invert` set, clear bits draw in the foreground colour and set
    /// bits in the background colour.
    pub fn bitmap_row(
        &mut self,
        top: PixelNumber,
        left: PixelNumber,
        width: PixelNumber,
        data: &[u8],
        invert: bool,
    ) {
        if top >= self.num_rows() || left >= self.num_cols() {
            return;
        }
        let visible = (width as usize)
            .min((self.num_cols() - left) as usize)
            .min(data.len() * 8);
        if visible == 0 {
            return;
        }

        self.ensure_row_in_buffer(top);
        let (fg, bg) = (self.fg_colour, self.bg_colour);
        let right = left + visible as PixelNumber;
        let Some(span) = self.window.span_mut(top, left, right) else {
            return;
        };
        for (i, pixel) in span.iter_mut().enumerate() {
            let bit = data[i / 8] & (0x80 >> (i % 8)) != 0;
            *pixel = if bit != invert { fg } else { bg };
        }
        let rel = top - self.window.start_row();
        self.mark_dirty(rel, rel + 1, left, right);
    }
}
