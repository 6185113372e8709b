#![forbid(unsafe_code)]

//! Rounded cutout and the backdrop mask path.
//!
//! The mask is the full screen rect followed by the rounded cutout as a
//! second subpath. Filled with the even-odd rule, the cutout becomes a
//! transparent window in the dimmed backdrop.

use coachmark_core::geometry::{Point, Rect};

/// Control-point distance factor for approximating a quarter circle with a cubic.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Fill rule the renderer must apply to [`MaskPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

/// Path element, in the order a renderer should replay them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEl {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    ClosePath,
}

/// A rectangle with uniformly rounded corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f64,
}

impl RoundedRect {
    /// Build a rounded rect, capping `radius` to half the short side.
    #[must_use]
    pub fn new(rect: Rect, radius: f64) -> Self {
        Self {
            rect,
            radius: capped_radius(radius, &rect),
        }
    }

    /// Point-in-shape test. Edges count as inside.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let r = self.rect;
        if p.x < r.x || p.x > r.right() || p.y < r.y || p.y > r.bottom() {
            return false;
        }
        let radius = self.radius;
        if radius <= 0.0 {
            return true;
        }
        // Bounds can cross by an ulp when radius == side / 2.
        let cx = p.x.max(r.x + radius).min(r.right() - radius);
        let cy = p.y.max(r.y + radius).min(r.bottom() - radius);
        let (dx, dy) = (p.x - cx, p.y - cy);
        dx * dx + dy * dy <= radius * radius
    }

    /// Outline as a closed clockwise subpath.
    #[must_use]
    pub fn to_path(&self) -> Vec<PathEl> {
        let r = self.rect;
        let rad = self.radius;
        if rad <= 0.0 {
            return rect_path(&r);
        }
        let k = rad * KAPPA;
        let (l, t, rt, b) = (r.x, r.y, r.right(), r.bottom());
        vec![
            PathEl::MoveTo(Point::new(l + rad, t)),
            PathEl::LineTo(Point::new(rt - rad, t)),
            PathEl::CubicTo(
                Point::new(rt - rad + k, t),
                Point::new(rt, t + rad - k),
                Point::new(rt, t + rad),
            ),
            PathEl::LineTo(Point::new(rt, b - rad)),
            PathEl::CubicTo(
                Point::new(rt, b - rad + k),
                Point::new(rt - rad + k, b),
                Point::new(rt - rad, b),
            ),
            PathEl::LineTo(Point::new(l + rad, b)),
            PathEl::CubicTo(
                Point::new(l + rad - k, b),
                Point::new(l, b - rad + k),
                Point::new(l, b - rad),
            ),
            PathEl::LineTo(Point::new(l, t + rad)),
            PathEl::CubicTo(
                Point::new(l, t + rad - k),
                Point::new(l + rad - k, t),
                Point::new(l + rad, t),
            ),
            PathEl::ClosePath,
        ]
    }
}

/// `min(radius, min(width, height) / 2)`, never negative.
#[must_use]
pub fn capped_radius(radius: f64, rect: &Rect) -> f64 {
    let half = (rect.width.min(rect.height) / 2.0).max(0.0);
    radius.min(half).max(0.0)
}

/// Full-bounds rect minus the rounded cutout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskPath {
    pub bounds: Rect,
    pub cutout: RoundedRect,
}

impl MaskPath {
    #[must_use]
    pub fn new(bounds: Rect, cutout: RoundedRect) -> Self {
        Self { bounds, cutout }
    }

    #[must_use]
    pub const fn fill_rule(&self) -> FillRule {
        FillRule::EvenOdd
    }

    /// Both subpaths: bounds first, then the cutout.
    #[must_use]
    pub fn elements(&self) -> Vec<PathEl> {
        let mut path = rect_path(&self.bounds);
        path.extend(self.cutout.to_path());
        path
    }

    /// Whether `p` is painted (dimmed) under the even-odd rule.
    ///
    /// Points in the cutout are clear; points outside the bounds are not
    /// painted at all.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        let in_bounds = p.x >= self.bounds.x
            && p.x <= self.bounds.right()
            && p.y >= self.bounds.y
            && p.y <= self.bounds.bottom();
        in_bounds != self.cutout.contains(p)
    }
}

fn rect_path(r: &Rect) -> Vec<PathEl> {
    vec![
        PathEl::MoveTo(Point::new(r.x, r.y)),
        PathEl::LineTo(Point::new(r.right(), r.y)),
        PathEl::LineTo(Point::new(r.right(), r.bottom())),
        PathEl::LineTo(Point::new(r.x, r.bottom())),
        PathEl::ClosePath,
    ]
}
