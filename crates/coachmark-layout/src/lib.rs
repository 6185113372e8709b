#![forbid(unsafe_code)]

//! Layout engine for coachmark overlays.
//!
//! Given the current [`GuideItem`](coachmark_core::GuideItem), the screen
//! bounds, and a [`StyleConfig`](coachmark_core::StyleConfig), the engine
//! computes:
//!
//! - the cutout rect (target frame minus insets) and its capped corner radius,
//! - the even-odd [`MaskPath`] that dims everything but the cutout,
//! - the [`Quadrant`] the cutout sits in,
//! - the arrow rect (with horizontal flip) and the clamped text rect.
//!
//! View resolution and text measurement are injected through
//! [`ViewResolver`] and [`TextMeasurer`], so every pass can run against
//! synthetic rects in tests.

pub mod engine;
pub mod mask;
pub mod measure;
pub mod placement;
pub mod quadrant;

pub use engine::{
    LayoutContext, LayoutError, LayoutResult, NoViews, ViewResolver, compute_layout,
    resolve_cutout,
};
pub use mask::{FillRule, MaskPath, PathEl, RoundedRect, capped_radius};
pub use measure::{MonospaceMeasurer, TextMeasurer, wrap_text};
pub use placement::{Placement, PlacementInput, clamp_text_x, place, text_max_width};
pub use quadrant::{ArrowColumn, PlacementRule, Quadrant, Stacking, TextAnchor};
