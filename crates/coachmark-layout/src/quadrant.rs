#![forbid(unsafe_code)]

//! Screen quadrant classification and the per-quadrant placement rules.

use coachmark_core::geometry::Rect;

/// Which quarter of the screen the cutout's center falls in.
///
/// Centers exactly on a midline count as upper / left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// Where the arrow sits horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowColumn {
    /// Centered on the cutout's horizontal midpoint.
    CutoutCenter,
    /// Pinned `spacing` from the screen's left edge.
    ScreenLeft,
    /// Right edge flush with the cutout's right edge.
    CutoutRight,
}

/// Which arrow edge the text block centers on before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    ArrowLeft,
    ArrowRight,
}

/// Whether arrow and text stack below or above the cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stacking {
    Below,
    Above,
}

/// Parameter set driving the shared placement routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRule {
    pub arrow_column: ArrowColumn,
    pub text_anchor: TextAnchor,
    pub stacking: Stacking,
    pub flip_arrow: bool,
}

impl Quadrant {
    /// Classify `cutout` against the midpoints of `bounds`.
    #[must_use]
    pub fn classify(cutout: &Rect, bounds: &Rect) -> Self {
        let upper = cutout.mid_y() <= bounds.mid_y();
        let left = cutout.mid_x() <= bounds.mid_x();
        match (upper, left) {
            (true, true) => Self::UpperLeft,
            (true, false) => Self::UpperRight,
            (false, true) => Self::LowerLeft,
            (false, false) => Self::LowerRight,
        }
    }

    #[must_use]
    pub const fn is_upper(self) -> bool {
        matches!(self, Self::UpperLeft | Self::UpperRight)
    }

    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::UpperLeft | Self::LowerLeft)
    }

    /// Placement parameters for this quadrant.
    #[must_use]
    pub const fn rule(self) -> PlacementRule {
        match self {
            Self::UpperLeft => PlacementRule {
                arrow_column: ArrowColumn::CutoutCenter,
                text_anchor: TextAnchor::ArrowRight,
                stacking: Stacking::Below,
                flip_arrow: true,
            },
            Self::UpperRight => PlacementRule {
                arrow_column: ArrowColumn::CutoutCenter,
                text_anchor: TextAnchor::ArrowLeft,
                stacking: Stacking::Below,
                flip_arrow: false,
            },
            Self::LowerLeft => PlacementRule {
                arrow_column: ArrowColumn::ScreenLeft,
                text_anchor: TextAnchor::ArrowRight,
                stacking: Stacking::Above,
                flip_arrow: false,
            },
            Self::LowerRight => PlacementRule {
                arrow_column: ArrowColumn::CutoutRight,
                text_anchor: TextAnchor::ArrowLeft,
                stacking: Stacking::Above,
                flip_arrow: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::from_size(375.0, 667.0);

    fn centered_at(x: f64, y: f64) -> Rect {
        Rect::new(x - 10.0, y - 10.0, 20.0, 20.0)
    }

    #[test]
    fn classifies_each_quadrant() {
        assert_eq!(
            Quadrant::classify(&centered_at(50.0, 50.0), &SCREEN),
            Quadrant::UpperLeft
        );
        assert_eq!(
            Quadrant::classify(&centered_at(300.0, 50.0), &SCREEN),
            Quadrant::UpperRight
        );
        assert_eq!(
            Quadrant::classify(&centered_at(50.0, 600.0), &SCREEN),
            Quadrant::LowerLeft
        );
        assert_eq!(
            Quadrant::classify(&centered_at(300.0, 600.0), &SCREEN),
            Quadrant::LowerRight
        );
    }

    #[test]
    fn exact_midpoint_is_upper_left() {
        let cutout = centered_at(SCREEN.mid_x(), SCREEN.mid_y());
        assert_eq!(Quadrant::classify(&cutout, &SCREEN), Quadrant::UpperLeft);
    }

    #[test]
    fn midline_ties_go_upper_and_left() {
        assert_eq!(
            Quadrant::classify(&centered_at(300.0, SCREEN.mid_y()), &SCREEN),
            Quadrant::UpperRight
        );
        assert_eq!(
            Quadrant::classify(&centered_at(SCREEN.mid_x(), 600.0), &SCREEN),
            Quadrant::LowerLeft
        );
    }

    #[test]
    fn classification_respects_offset_bounds() {
        let bounds = Rect::new(100.0, 100.0, 200.0, 200.0);
        assert_eq!(
            Quadrant::classify(&centered_at(150.0, 150.0), &bounds),
            Quadrant::UpperLeft
        );
        assert_eq!(
            Quadrant::classify(&centered_at(250.0, 250.0), &bounds),
            Quadrant::LowerRight
        );
    }

    #[test]
    fn only_upper_left_flips_the_arrow() {
        assert!(Quadrant::UpperLeft.rule().flip_arrow);
        assert!(!Quadrant::UpperRight.rule().flip_arrow);
        assert!(!Quadrant::LowerLeft.rule().flip_arrow);
        assert!(!Quadrant::LowerRight.rule().flip_arrow);
    }

    #[test]
    fn upper_quadrants_stack_below() {
        for q in [
            Quadrant::UpperLeft,
            Quadrant::UpperRight,
            Quadrant::LowerLeft,
            Quadrant::LowerRight,
        ] {
            let expected = if q.is_upper() {
                Stacking::Below
            } else {
                Stacking::Above
            };
            assert_eq!(q.rule().stacking, expected, "{q:?}");
            let anchor = if q.is_left() {
                TextAnchor::ArrowRight
            } else {
                TextAnchor::ArrowLeft
            };
            assert_eq!(q.rule().text_anchor, anchor, "{q:?}");
        }
    }
}
