//! Buffered row window
//!
//! Owns the image buffer and maps surface coordinates onto it. The buffer
//! holds `rows` complete surface rows starting at `start_row`; a pixel at
//! `(row, col)` lives at `(row - start_row) * num_cols + col`.

use alloc::vec;
use alloc::vec::Vec;

use pixband_core::{Colour, PixelNumber};

/// Sliding band of buffered surface rows
pub struct Window {
    buffer: Vec<Colour>,
    start_row: PixelNumber,
    rows: PixelNumber,
    num_rows: PixelNumber,
    num_cols: PixelNumber,
}

impl Window {
    /// Allocate a window of `buffer_rows` rows over a `num_rows x num_cols`
    /// surface, positioned at the top
    ///
    /// `buffer_rows` is clamped to `1..=num_rows`.
    pub fn new(
        num_rows: PixelNumber,
        num_cols: PixelNumber,
        buffer_rows: PixelNumber,
        fill: Colour,
    ) -> Self {
        let rows = buffer_rows.max(1).min(num_rows);
        Self {
            buffer: vec![fill; rows as usize * num_cols as usize],
            start_row: 0,
            rows,
            num_rows,
            num_cols,
        }
    }

    /// First surface row held in the buffer
    pub fn start_row(&self) -> PixelNumber {
        self.start_row
    }

    /// Number of rows held in the buffer
    pub fn rows(&self) -> PixelNumber {
        self.rows
    }

    /// One past the last surface row held in the buffer
    pub fn end_row(&self) -> PixelNumber {
        self.start_row + self.rows
    }

    /// Check whether a surface row is buffered
    pub fn contains_row(&self, row: PixelNumber) -> bool {
        row >= self.start_row && row < self.end_row()
    }

    /// Check whether all of `[top, bottom)` is buffered
    pub fn contains_rows(&self, top: PixelNumber, bottom: PixelNumber) -> bool {
        top >= self.start_row && bottom <= self.end_row()
    }

    /// Window start that brings `row` into view
    ///
    /// The window starts at `row` unless that would run it past the bottom
    /// of the surface, in which case it is pinned to the bottom.
    pub fn start_for(&self, row: PixelNumber) -> PixelNumber {
        row.min(self.num_rows - self.rows)
    }

    /// Move the window, clamped to the surface, and refill it with `fill`
    ///
    /// No read-back from the panel exists, so the previous contents mean
    /// nothing at the new position.
    pub fn reposition(&mut self, start_row: PixelNumber, fill: Colour) {
        self.start_row = self.start_for(start_row);
        self.buffer.fill(fill);
    }

    /// Buffer offset of a surface pixel, if it is buffered
    pub fn offset(&self, row: PixelNumber, col: PixelNumber) -> Option<usize> {
        if !self.contains_row(row) || col >= self.num_cols {
            return None;
        }
        Some((row - self.start_row) as usize * self.num_cols as usize + col as usize)
    }

    /// Read a buffered pixel
    pub fn get(&self, row: PixelNumber, col: PixelNumber) -> Option<Colour> {
        self.offset(row, col).map(|i| self.buffer[i])
    }

    /// Write a buffered pixel, returning whether it was buffered
    pub fn set(&mut self, row: PixelNumber, col: PixelNumber, colour: Colour) -> bool {
        match self.offset(row, col) {
            Some(i) => {
                self.buffer[i] = colour;
                true
            }
            None => false,
        }
    }

    /// Mutable span `[left, right)` of a buffered surface row, clipped to
    /// the surface width
    pub fn span_mut(
        &mut self,
        row: PixelNumber,
        left: PixelNumber,
        right: PixelNumber,
    ) -> Option<&mut [Colour]> {
        let right = right.min(self.num_cols);
        if left >= right {
            return None;
        }
        let start = self.offset(row, left)?;
        Some(&mut self.buffer[start..start + (right - left) as usize])
    }

    /// Span `[left, right)` of a row given relative to the window start
    pub fn relative_span(
        &self,
        rel_row: PixelNumber,
        left: PixelNumber,
        right: PixelNumber,
    ) -> &[Colour] {
        let right = right.min(self.num_cols);
        if rel_row >= self.rows || left >= right {
            return &[];
        }
        let start = rel_row as usize * self.num_cols as usize + left as usize;
        &self.buffer[start..start + (right - left) as usize]
    }
}
