//! Pixel coordinates and rectangles

use serde::{Deserialize, Serialize};

/// Pixel row or column index
pub type PixelNumber = u16;

/// Axis-aligned rectangle with exclusive bottom/right edges
///
/// A rectangle with `bottom <= top` or `right <= left` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    /// First row
    pub top: PixelNumber,
    /// First column
    pub left: PixelNumber,
    /// One past the last row
    pub bottom: PixelNumber,
    /// One past the last column
    pub right: PixelNumber,
}

impl Rect {
    /// The canonical empty rectangle
    pub const EMPTY: Self = Self {
        top: 0,
        left: 0,
        bottom: 0,
        right: 0,
    };

    /// Create a rectangle from its edges
    pub const fn new(
        top: PixelNumber,
        left: PixelNumber,
        bottom: PixelNumber,
        right: PixelNumber,
    ) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Check whether the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.bottom <= self.top || self.right <= self.left
    }

    /// Number of rows covered
    pub const fn height(&self) -> PixelNumber {
        self.bottom.saturating_sub(self.top)
    }

    /// Number of columns covered
    pub const fn width(&self) -> PixelNumber {
        self.right.saturating_sub(self.left)
    }

    /// Number of pixels covered
    pub const fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.height() as usize * self.width() as usize
        }
    }

    /// Smallest rectangle covering both
    ///
    /// An empty operand contributes nothing, so unioning into an empty
    /// rectangle yields the other operand rather than a box stretched to
    /// the origin.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect {
            top: self.top.min(other.top),
            left: self.left.min(other.left),
            bottom: self.bottom.max(other.bottom),
            right: self.right.max(other.right),
        }
    }

    /// Clip to `[0, rows) x [0, cols)`
    pub fn clip(&self, rows: PixelNumber, cols: PixelNumber) -> Rect {
        Rect {
            top: self.top.min(rows),
            left: self.left.min(cols),
            bottom: self.bottom.min(rows),
            right: self.right.min(cols),
        }
    }
}
