//! Dirty rectangle tracking
//!
//! Rows are relative to the window start, so the tracked box always lies
//! inside the window and is discarded whenever the window moves.
//!
//! A flush sends the whole box, so the box may only cover pixels written
//! since the window last moved: anything else in the buffer is background
//! fill, not what the panel shows. The tracker keeps a bitmap of written
//! pixels and refuses to grow the box over unwritten ones; the caller
//! flushes the old box instead and starts a new one.

use alloc::vec;
use alloc::vec::Vec;

use pixband_core::{PixelNumber, Rect};

/// Bounding box of pixels written since the last flush
pub struct DirtyTracker {
    rect: Rect,
    written: Vec<u32>,
    words_per_row: usize,
    rows: PixelNumber,
    cols: PixelNumber,
}

impl DirtyTracker {
    /// Create a clean tracker for a window of `rows x cols` pixels
    pub fn new(rows: PixelNumber, cols: PixelNumber) -> Self {
        let words_per_row = (cols as usize + 31) / 32;
        Self {
            rect: Rect::EMPTY,
            written: vec![0; rows as usize * words_per_row],
            words_per_row,
            rows,
            cols,
        }
    }

    /// Record `[row_start, row_end) x [col_start, col_end)` as written
    ///
    /// The box grows to cover the region when every pixel of the grown box
    /// has been written since the last [`reset`](Self::reset). Otherwise
    /// the box restarts as just this region and the previous box is
    /// returned; it must be flushed before anything else is.
    ///
    /// An empty region leaves the box unchanged.
    #[must_use = "a returned rectangle has to be flushed"]
    pub fn mark(
        &mut self,
        row_start: PixelNumber,
        row_end: PixelNumber,
        col_start: PixelNumber,
        col_end: PixelNumber,
    ) -> Option<Rect> {
        let region =
            Rect::new(row_start, col_start, row_end, col_end).clip(self.rows, self.cols);
        if region.is_empty() {
            return None;
        }
        self.set_written(&region);

        let grown = self.rect.union(&region);
        if self.is_written(&grown) {
            self.rect = grown;
            None
        } else {
            Some(core::mem::replace(&mut self.rect, region))
        }
    }

    /// Check whether anything needs flushing
    pub fn is_dirty(&self) -> bool {
        !self.rect.is_empty()
    }

    /// Current box (window-relative rows)
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Return the current box and reset it to clean
    ///
    /// Written pixels stay written: they still match the panel.
    pub fn take(&mut self) -> Rect {
        core::mem::replace(&mut self.rect, Rect::EMPTY)
    }

    /// Forget the box and every written pixel, for a freshly filled window
    pub fn reset(&mut self) {
        self.rect = Rect::EMPTY;
        self.written.fill(0);
    }

    fn set_written(&mut self, region: &Rect) {
        for row in region.top..region.bottom {
            let base = row as usize * self.words_per_row;
            for word in Self::words(region) {
                self.written[base + word] |= Self::mask(word, region);
            }
        }
    }

    fn is_written(&self, region: &Rect) -> bool {
        (region.top..region.bottom).all(|row| {
            let base = row as usize * self.words_per_row;
            Self::words(region).all(|word| {
                let mask = Self::mask(word, region);
                self.written[base + word] & mask == mask
            })
        })
    }

    fn words(region: &Rect) -> core::ops::Range<usize> {
        region.left as usize / 32..(region.right as usize + 31) / 32
    }

    /// Bits of `word` that fall inside the region's columns
    fn mask(word: usize, region: &Rect) -> u32 {
        let first = word * 32;
        let lo = (region.left as usize).max(first) - first;
        let hi = (region.right as usize).min(first + 32) - first;
        if hi - lo == 32 {
            u32::MAX
        } else {
            ((1u32 << (hi - lo)) - 1) << lo
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DirtyTracker {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.rect);
    }
}
