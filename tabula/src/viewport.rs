//! Virtualization viewport collaborator.
//!
//! The table does not scroll anything itself. A virtual-scroll viewport owned
//! by the rendering layer reports which slice of the derived sequence is on
//! screen and accepts offset scroll commands when keyboard navigation moves
//! the selection out of view.

use std::ops::Range;

/// The scrolling surface that windows the derived sequence.
pub trait Viewport: Send + Sync {
    /// Current scroll offset in pixels.
    fn measure_scroll_offset(&self) -> f64;

    /// Visible height of the viewport in pixels.
    fn viewport_size(&self) -> f64;

    /// Scroll to an absolute offset in pixels.
    fn scroll_to_offset(&mut self, offset: f64);
}

/// Range of derived-sequence indices currently rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibleRange {
    /// First rendered index (inclusive).
    pub start: usize,
    /// Last rendered index (exclusive).
    pub end: usize,
}

impl VisibleRange {
    /// Create a new visible range.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Clamp the range to a sequence of `len` items.
    pub fn clamp(&self, len: usize) -> Range<usize> {
        let end = self.end.min(len);
        self.start.min(end)..end
    }

    /// Number of indices covered. A reversed range covers none.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A scroll correction needed to bring a row into view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollAdjustment {
    /// Scroll down by this many pixels.
    Down(f64),
    /// Scroll up by this many pixels.
    Up(f64),
}

impl ScrollAdjustment {
    /// Compute the adjustment that makes the row at `index` fully visible.
    ///
    /// Returns `None` if the row already fits in the viewport. Overflow past
    /// the bottom edge is checked first; at most one adjustment applies.
    pub fn for_row(
        index: usize,
        item_height: f64,
        scroll_top: f64,
        viewport_size: f64,
    ) -> Option<Self> {
        let item_top = item_height * index as f64;
        let item_bottom = item_top + item_height;

        if item_bottom > scroll_top + viewport_size {
            Some(ScrollAdjustment::Down(item_bottom - (scroll_top + viewport_size)))
        } else if item_top < scroll_top {
            Some(ScrollAdjustment::Up(scroll_top - item_top))
        } else {
            None
        }
    }

    /// Apply the adjustment to an offset.
    pub fn apply(&self, scroll_top: f64) -> f64 {
        match self {
            ScrollAdjustment::Down(amount) => scroll_top + amount,
            ScrollAdjustment::Up(amount) => scroll_top - amount,
        }
    }
}

/// A viewport with a fixed size and a stored offset.
///
/// Useful for headless hosts and tests; real hosts wrap their scroll widget.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedViewport {
    /// Current offset in pixels.
    pub offset: f64,
    /// Visible height in pixels.
    pub size: f64,
}

impl FixedViewport {
    /// Create a viewport of the given height scrolled to the top.
    pub fn new(size: f64) -> Self {
        Self { offset: 0.0, size }
    }
}

impl Viewport for FixedViewport {
    fn measure_scroll_offset(&self) -> f64 {
        self.offset
    }

    fn viewport_size(&self) -> f64 {
        self.size
    }

    fn scroll_to_offset(&mut self, offset: f64) {
        self.offset = offset.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_range_is_empty() {
        let range = VisibleRange { start: 5, end: 2 };
        assert_eq!(range.len(), 0);
        assert!(range.is_empty());
        assert_eq!(range.clamp(10), 2..2);
    }

    #[test]
    fn test_range_len() {
        let range = VisibleRange::new(3, 8);
        assert_eq!(range.len(), 5);
        assert_eq!(range.clamp(6), 3..6);
        assert_eq!(VisibleRange::new(4, 1), VisibleRange::new(4, 4));
    }

    #[test]
    fn test_fixed_viewport_never_scrolls_above_top() {
        let mut viewport = FixedViewport::new(100.0);
        viewport.scroll_to_offset(-20.0);
        assert_eq!(viewport.measure_scroll_offset(), 0.0);
    }
}
