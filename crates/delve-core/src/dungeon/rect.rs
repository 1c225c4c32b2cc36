//! Axis-aligned rectangles in map space
//!
//! Partition nodes, rooms and corridors all describe their footprint with a
//! [`Rect`]. Coordinates are signed so that neighbour arithmetic never has
//! to worry about underflow at the map edge.

use strum::{Display, EnumIter};

/// Orientation of a partition cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SplitAxis {
    /// Horizontal cut line: children are stacked top/bottom
    Horizontal,
    /// Vertical cut line: children sit left/right
    Vertical,
}

impl SplitAxis {
    /// The other orientation
    pub const fn other(self) -> Self {
        match self {
            SplitAxis::Horizontal => SplitAxis::Vertical,
            SplitAxis::Vertical => SplitAxis::Horizontal,
        }
    }
}

/// A rectangle with its top-left corner at (`x`, `y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost column
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// One past the bottom row
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Centre cell (rounded towards the origin)
    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Check if the rectangle has positive area
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Check if a cell lies inside this rectangle
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rectangle intersects another
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Extent along the axis a cut of this orientation divides
    pub const fn span(&self, axis: SplitAxis) -> i32 {
        match axis {
            SplitAxis::Horizontal => self.height,
            SplitAxis::Vertical => self.width,
        }
    }

    /// Cut the rectangle `offset` cells from its leading edge
    ///
    /// Returns `None` when either piece would be empty.
    pub fn split_at(&self, axis: SplitAxis, offset: i32) -> Option<(Rect, Rect)> {
        if offset <= 0 || offset >= self.span(axis) {
            return None;
        }

        let pieces = match axis {
            SplitAxis::Horizontal => (
                Rect::new(self.x, self.y, self.width, offset),
                Rect::new(self.x, self.y + offset, self.width, self.height - offset),
            ),
            SplitAxis::Vertical => (
                Rect::new(self.x, self.y, offset, self.height),
                Rect::new(self.x + offset, self.y, self.width - offset, self.height),
            ),
        };
        Some(pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert_eq!(r.center(), (7, 5));
        assert!(r.is_valid());
        assert!(!Rect::new(0, 0, 0, 5).is_valid());
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(2, 3, 10, 4);
        assert!(r.contains(2, 3));
        assert!(r.contains(11, 6));
        assert!(!r.contains(12, 6));
        assert!(!r.contains(5, 7));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(9, 9, 5, 5);
        let c = Rect::new(10, 0, 5, 5);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_split_horizontal() {
        let r = Rect::new(0, 0, 40, 30);
        let (top, bottom) = r.split_at(SplitAxis::Horizontal, 13).unwrap();
        assert_eq!(top, Rect::new(0, 0, 40, 13));
        assert_eq!(bottom, Rect::new(0, 13, 40, 17));
    }

    #[test]
    fn test_split_vertical() {
        let r = Rect::new(5, 5, 40, 30);
        let (left, right) = r.split_at(SplitAxis::Vertical, 15).unwrap();
        assert_eq!(left, Rect::new(5, 5, 15, 30));
        assert_eq!(right, Rect::new(20, 5, 25, 30));
    }

    #[test]
    fn test_split_out_of_range() {
        let r = Rect::new(0, 0, 10, 10);
        assert!(r.split_at(SplitAxis::Vertical, 0).is_none());
        assert!(r.split_at(SplitAxis::Vertical, 10).is_none());
        assert_eq!(SplitAxis::Vertical.other(), SplitAxis::Horizontal);
    }
}
