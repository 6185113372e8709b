#![forbid(unsafe_code)]

//! Layout pass: target → cutout → quadrant → arrow/text placement.
//!
//! # Invariants
//!
//! 1. The pass is pure given its inputs: same item, bounds, style,
//!    resolver answer, and measured size yield the same [`LayoutResult`].
//! 2. The corner radius never exceeds half the cutout's short side.
//! 3. When the text fits the padded width, `text.x` lies in
//!    `[padding, width - padding - text_width]`.
//! 4. A view target that cannot be resolved fails the pass; it never
//!    degrades to a zero rect.

use coachmark_core::geometry::{Rect, Sides, Size};
use coachmark_core::guide::{GuideItem, TargetRegion, ViewId};
use coachmark_core::style::StyleConfig;
use thiserror::Error;

use crate::mask::{MaskPath, RoundedRect};
use crate::measure::TextMeasurer;
use crate::placement::{PlacementInput, place, text_max_width};
use crate::quadrant::Quadrant;

/// Maps a view reference to its frame in screen coordinates.
///
/// Returns `None` when the view has no container chain to convert through
/// (detached, or already torn down).
pub trait ViewResolver {
    fn resolve(&self, view: ViewId) -> Option<Rect>;
}

impl<F> ViewResolver for F
where
    F: Fn(ViewId) -> Option<Rect>,
{
    fn resolve(&self, view: ViewId) -> Option<Rect> {
        self(view)
    }
}

/// Resolver for hosts that only ever use explicit rects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoViews;

impl ViewResolver for NoViews {
    fn resolve(&self, _view: ViewId) -> Option<Rect> {
        None
    }
}

/// Layout failures. Only precondition violations exist.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("view {0:?} has no container to resolve its frame from")]
    UnresolvedView(ViewId),
}

/// Everything a renderer needs for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub cutout: Rect,
    pub corner_radius: f64,
    pub quadrant: Quadrant,
    pub mask: MaskPath,
    pub arrow: Rect,
    pub arrow_flipped: bool,
    pub text: Rect,
}

/// Injected capabilities and per-pass parameters.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub bounds: Rect,
    pub style: &'a StyleConfig,
    pub resolver: &'a dyn ViewResolver,
    pub measurer: &'a dyn TextMeasurer,
}

/// Resolve `target` to a screen rect and apply `insets`.
pub fn resolve_cutout(
    target: TargetRegion,
    insets: Sides,
    resolver: &dyn ViewResolver,
) -> Result<Rect, LayoutError> {
    let frame = match target {
        TargetRegion::Rect(rect) => rect,
        TargetRegion::View(view) => resolver
            .resolve(view)
            .ok_or(LayoutError::UnresolvedView(view))?,
    };
    Ok(frame.inner(insets))
}

/// Run the full layout pass for `item` with an arrow of `arrow_size`.
pub fn compute_layout(
    item: &GuideItem,
    arrow_size: Size,
    ctx: &LayoutContext<'_>,
) -> Result<LayoutResult, LayoutError> {
    let _span = tracing::debug_span!(
        "coachmark.layout",
        bounds_w = ctx.bounds.width,
        bounds_h = ctx.bounds.height
    )
    .entered();

    let style = ctx.style;
    let cutout = resolve_cutout(item.target(), style.insets, ctx.resolver).inspect_err(|err| {
        tracing::warn!(error = %err, "layout pass aborted");
    })?;

    let rounded = RoundedRect::new(cutout, style.corner_radius);
    let mask = MaskPath::new(ctx.bounds, rounded);
    let quadrant = Quadrant::classify(&cutout, &ctx.bounds);

    let max_width = text_max_width(&ctx.bounds, style.padding).max(0.0);
    let text_size = ctx.measurer.measure(item.text(), &style.font, max_width);

    let placement = place(
        quadrant.rule(),
        &PlacementInput {
            bounds: ctx.bounds,
            cutout,
            arrow_size,
            text_size,
            spacing: style.spacing,
            padding: style.padding,
        },
    );

    tracing::debug!(
        ?quadrant,
        cutout_x = cutout.x,
        cutout_y = cutout.y,
        cutout_w = cutout.width,
        cutout_h = cutout.height,
        text_w = text_size.width,
        text_h = text_size.height,
        "layout computed"
    );

    Ok(LayoutResult {
        cutout,
        corner_radius: rounded.radius,
        quadrant,
        mask,
        arrow: placement.arrow,
        arrow_flipped: placement.arrow_flipped,
        text: placement.text,
    })
}
