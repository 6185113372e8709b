#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are in screen points (origin at top-left, y grows downward).

use serde::{Deserialize, Serialize};

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// The empty size.
    pub const ZERO: Size = Size::new(0.0, 0.0);

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

}

/// An axis-aligned rectangle for cutouts, placements, and screen bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal midpoint.
    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical midpoint.
    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Check if a point is inside the rectangle (right/bottom edges exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrink the rectangle by the given insets.
    ///
    /// Width and height never go below zero. When the insets overrun a side
    /// the origin still moves by `left`/`top`, so the midpoint of an
    /// over-inset rect sits at `x + left` rather than between the insets, and
    /// quadrant classification follows that point.
    pub fn inner(&self, insets: Sides) -> Rect {
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.horizontal_sum()).max(0.0),
            height: (self.height - insets.vertical_sum()).max(0.0),
        }
    }
}

/// Edge insets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sides {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Sides {
    /// No insets.
    pub const ZERO: Sides = Sides::all(0.0);

    /// Create new sides with equal values.
    pub const fn all(val: f64) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}

impl From<f64> for Sides {
    fn from(val: f64) -> Self {
        Self::all(val)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect, Sides};
    use proptest::prelude::*;

    #[test]
    fn rect_edges_and_midpoints() {
        let rect = Rect::new(20.0, 100.0, 80.0, 40.0);
        assert_eq!(rect.right(), 100.0);
        assert_eq!(rect.bottom(), 140.0);
        assert_eq!(rect.mid_x(), 60.0);
        assert_eq!(rect.mid_y(), 120.0);
        assert_eq!(rect.center(), Point::new(60.0, 120.0));
    }

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(2.0, 3.0, 4.0, 5.0);
        assert!(rect.contains(Point::new(2.0, 3.0)));
        assert!(rect.contains(Point::new(5.9, 7.9)));
        assert!(!rect.contains(Point::new(6.0, 3.0)));
        assert!(!rect.contains(Point::new(2.0, 8.0)));
    }

    #[test]
    fn rect_inner_applies_insets() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = rect.inner(Sides::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(inner, Rect::new(4.0, 1.0, 4.0, 6.0));
    }

    #[test]
    fn over_inset_rect_collapses_at_left_top() {
        let rect = Rect::new(10.0, 20.0, 4.0, 4.0);
        let inner = rect.inner(Sides::all(5.0));
        assert_eq!(inner, Rect::new(15.0, 25.0, 0.0, 0.0));
        assert_eq!(inner.center(), Point::new(15.0, 25.0));
    }

    #[test]
    fn negative_insets_grow_the_rect() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert_eq!(
            rect.inner(Sides::all(-2.0)),
            Rect::new(8.0, 8.0, 14.0, 14.0)
        );
    }

    #[test]
    fn sides_constructors() {
        assert_eq!(Sides::all(3.0), Sides::from(3.0));
        assert_eq!(Sides::ZERO, Sides::default());
        assert_eq!(Sides::new(1.0, 2.0, 3.0, 4.0).horizontal_sum(), 6.0);
        assert_eq!(Sides::new(1.0, 2.0, 3.0, 4.0).vertical_sum(), 4.0);
    }

    proptest! {
        #[test]
        fn inner_size_is_never_negative(
            w in 0.0f64..500.0,
            h in 0.0f64..500.0,
            inset in -100.0f64..400.0,
        ) {
            let inner = Rect::new(0.0, 0.0, w, h).inner(Sides::all(inset));
            prop_assert!(inner.width >= 0.0);
            prop_assert!(inner.height >= 0.0);
        }

        #[test]
        fn uniform_insets_keep_the_center(
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            w in 0.0f64..500.0,
            h in 0.0f64..500.0,
            inset in -100.0f64..100.0,
        ) {
            prop_assume!(w > 2.0 * inset && h > 2.0 * inset);
            let rect = Rect::new(x, y, w, h);
            let inner = rect.inner(Sides::all(inset));
            prop_assert!((inner.mid_x() - rect.mid_x()).abs() < 1e-9);
            prop_assert!((inner.mid_y() - rect.mid_y()).abs() < 1e-9);
        }
    }
}
