#![forbid(unsafe_code)]

//! Arrow and text placement around the cutout.
//!
//! One routine serves all four quadrants; [`PlacementRule`] supplies the
//! arrow column, the text anchor edge, and the stacking direction.

use coachmark_core::geometry::{Rect, Size};

use crate::quadrant::{ArrowColumn, PlacementRule, Stacking, TextAnchor};

/// Inputs shared by every quadrant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementInput {
    pub bounds: Rect,
    pub cutout: Rect,
    pub arrow_size: Size,
    pub text_size: Size,
    pub spacing: f64,
    pub padding: f64,
}

/// Where the arrow and text end up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub arrow: Rect,
    pub arrow_flipped: bool,
    pub text: Rect,
}

/// Width available to text between the two paddings.
#[must_use]
pub fn text_max_width(bounds: &Rect, padding: f64) -> f64 {
    bounds.width - padding * 2.0
}

/// `max(lo, min(hi, anchor - text_width / 2))` with `lo = padding` and
/// `hi = padding + max_width - text_width`, both offset by `bounds.x`.
///
/// When the text is wider than the padded width the lower bound wins.
#[must_use]
pub fn clamp_text_x(anchor: f64, text_width: f64, bounds: &Rect, padding: f64) -> f64 {
    let lo = bounds.x + padding;
    let hi = lo + text_max_width(bounds, padding) - text_width;
    lo.max(hi.min(anchor - text_width / 2.0))
}

/// Place arrow and text for `rule`.
#[must_use]
pub fn place(rule: PlacementRule, input: &PlacementInput) -> Placement {
    let PlacementInput {
        bounds,
        cutout,
        arrow_size,
        text_size,
        spacing,
        padding,
    } = *input;

    let arrow_x = match rule.arrow_column {
        ArrowColumn::CutoutCenter => cutout.mid_x() - arrow_size.width / 2.0,
        ArrowColumn::ScreenLeft => bounds.x + spacing,
        ArrowColumn::CutoutRight => cutout.right() - arrow_size.width,
    };
    let arrow_y = match rule.stacking {
        Stacking::Below => cutout.bottom() + spacing,
        Stacking::Above => cutout.top() - spacing - arrow_size.height,
    };
    let arrow = Rect::new(arrow_x, arrow_y, arrow_size.width, arrow_size.height);

    let anchor = match rule.text_anchor {
        TextAnchor::ArrowLeft => arrow.left(),
        TextAnchor::ArrowRight => arrow.right(),
    };
    let text_x = clamp_text_x(anchor, text_size.width, &bounds, padding);
    let text_y = match rule.stacking {
        Stacking::Below => arrow.bottom() + spacing,
        Stacking::Above => arrow.top() - spacing - text_size.height,
    };

    Placement {
        arrow,
        arrow_flipped: rule.flip_arrow,
        text: Rect::new(text_x, text_y, text_size.width, text_size.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrant::Quadrant;

    const SCREEN: Rect = Rect::from_size(375.0, 667.0);
    const ARROW: Size = Size::new(40.0, 60.0);
    const TEXT: Size = Size::new(180.0, 20.0);

    fn input(cutout: Rect) -> PlacementInput {
        PlacementInput {
            bounds: SCREEN,
            cutout,
            arrow_size: ARROW,
            text_size: TEXT,
            spacing: 20.0,
            padding: 50.0,
        }
    }

    #[test]
    fn upper_left_stacks_below_with_flipped_arrow() {
        let cutout = Rect::new(20.0, 100.0, 80.0, 40.0);
        let p = place(Quadrant::UpperLeft.rule(), &input(cutout));
        assert_eq!(p.arrow, Rect::new(40.0, 160.0, 40.0, 60.0));
        assert!(p.arrow_flipped);
        // anchor = arrow.right (80) - 90 = -10, clamped to padding.
        assert_eq!(p.text, Rect::new(50.0, 240.0, 180.0, 20.0));
    }

    #[test]
    fn upper_right_anchors_on_arrow_left_edge() {
        let cutout = Rect::new(250.0, 100.0, 80.0, 40.0);
        let p = place(Quadrant::UpperRight.rule(), &input(cutout));
        assert_eq!(p.arrow.x, 270.0);
        assert_eq!(p.arrow.y, 160.0);
        assert!(!p.arrow_flipped);
        // 270 - 90 = 180, clamped to the 145 upper bound.
        assert_eq!(p.text.x, 145.0);
        assert_eq!(p.text.y, 240.0);
    }

    #[test]
    fn lower_left_pins_arrow_at_spacing() {
        let cutout = Rect::new(30.0, 500.0, 80.0, 40.0);
        let p = place(Quadrant::LowerLeft.rule(), &input(cutout));
        assert_eq!(p.arrow, Rect::new(20.0, 420.0, 40.0, 60.0));
        assert_eq!(p.text.y, 420.0 - 20.0 - 20.0);
        assert_eq!(p.text.x, 50.0);
    }

    #[test]
    fn lower_right_aligns_arrow_to_cutout_right() {
        let cutout = Rect::new(200.0, 500.0, 100.0, 40.0);
        let p = place(Quadrant::LowerRight.rule(), &input(cutout));
        assert_eq!(p.arrow.right(), 300.0);
        assert_eq!(p.arrow.y, 420.0);
        // anchor = 260 - 90 = 170 > 145.
        assert_eq!(p.text.x, 145.0);
        assert_eq!(p.text.bottom(), p.arrow.top() - 20.0);
    }

    #[test]
    fn clamp_stays_inside_padding_when_text_fits() {
        for anchor in [-500.0, 0.0, 120.0, 187.5, 400.0, 2000.0] {
            let x = clamp_text_x(anchor, 180.0, &SCREEN, 50.0);
            assert!((50.0..=145.0).contains(&x), "anchor {anchor} -> {x}");
        }
    }

    #[test]
    fn oversized_text_pins_to_padding() {
        assert_eq!(clamp_text_x(300.0, 400.0, &SCREEN, 50.0), 50.0);
    }

    #[test]
    fn clamp_honors_bounds_origin() {
        let bounds = Rect::new(100.0, 0.0, 375.0, 667.0);
        assert_eq!(clamp_text_x(0.0, 180.0, &bounds, 50.0), 150.0);
    }
}
