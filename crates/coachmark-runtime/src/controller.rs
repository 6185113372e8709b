#![forbid(unsafe_code)]

//! Guide controller: walks a [`GuideSequence`] on an [`OverlayBackend`].
//!
//! # State machine
//!
//! ```text
//!   Idle ──show()──▶ Active(0) ──advance()──▶ Active(1) ─ … ─▶ Active(n-1)
//!    ▲                                                              │
//!    └────────────────────────── advance() ─────────────────────────┘
//! ```
//!
//! - `show` consults the [`VisibilityGate`] first; a suppressed sequence
//!   stays `Idle` and nothing is presented.
//! - Entering `Active(0)` fires the will/did-change listeners for index 0.
//! - `advance` on the last item dismisses the overlay and then runs the
//!   completion callback exactly once.
//! - `resize` re-lays the current item without notifications.
//!
//! All state changes commit before the frame is handed to the renderer;
//! animations are visual catch-up only.

use coachmark_backend::{
    ArrowSprite, Caption, FrameReason, OverlayBackend, OverlayFrame, OverlayRenderer,
    PresentOptions, PresentationHost, Transition,
};
use coachmark_core::geometry::{Point, Rect};
use coachmark_core::guide::{GuideItem, GuideSequence, ImageHandle};
use coachmark_core::style::StyleConfig;
use coachmark_layout::{LayoutContext, LayoutResult, compute_layout};

use crate::assets::resolve_arrow;
use crate::error::{GuideError, GuideResult};
use crate::gate::VisibilityGate;
use crate::storage::VisibilityStore;

type IndexListener = Box<dyn FnMut(usize, &GuideItem)>;
type CompletionCallback = Box<dyn FnOnce()>;

/// Result of an [`GuideController::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to `index`.
    Advanced { index: usize },
    /// The last item was dismissed and the completion callback ran.
    Finished,
    /// The controller was not on screen.
    Inactive,
}

/// Drives one guide sequence through its lifetime.
pub struct GuideController<B: OverlayBackend> {
    backend: B,
    sequence: GuideSequence,
    style: StyleConfig,
    active: bool,
    bounds: Rect,
    layout: Option<LayoutResult>,
    arrow: Option<ImageHandle>,
    index_will_change: Option<IndexListener>,
    index_did_change: Option<IndexListener>,
    on_complete: Option<CompletionCallback>,
}

impl<B: OverlayBackend> GuideController<B> {
    pub fn new(backend: B, sequence: GuideSequence, style: StyleConfig) -> Self {
        Self {
            backend,
            sequence,
            style,
            active: false,
            bounds: Rect::default(),
            layout: None,
            arrow: None,
            index_will_change: None,
            index_did_change: None,
            on_complete: None,
        }
    }

    /// Build the sequence and the controller in one step.
    pub fn with_items(
        backend: B,
        items: Vec<GuideItem>,
        key: Option<String>,
        style: StyleConfig,
    ) -> GuideResult<Self> {
        let sequence = GuideSequence::new(items, key)?;
        Ok(Self::new(backend, sequence, style))
    }

    /// Listener called with the upcoming index and item, before the
    /// index changes.
    pub fn set_index_will_change(&mut self, listener: impl FnMut(usize, &GuideItem) + 'static) {
        self.index_will_change = Some(Box::new(listener));
    }

    /// Listener called with the new index and item, after the layout for
    /// it has been rendered.
    pub fn set_index_did_change(&mut self, listener: impl FnMut(usize, &GuideItem) + 'static) {
        self.index_did_change = Some(Box::new(listener));
    }

    /// Present the sequence if the gate allows it.
    ///
    /// Returns `Ok(false)` when the sequence's key was already shown; the
    /// completion callback is dropped without running in that case.
    pub fn show<S: VisibilityStore>(
        &mut self,
        gate: &mut VisibilityGate<S>,
        bounds: Rect,
        on_complete: impl FnOnce() + 'static,
    ) -> GuideResult<bool> {
        if self.active {
            return Err(GuideError::AlreadyActive);
        }
        if !gate.should_show(self.sequence.key())? {
            tracing::info!(key = self.sequence.key(), "guide suppressed");
            return Ok(false);
        }
        self.enter(bounds, Box::new(on_complete))?;
        Ok(true)
    }

    /// Present the sequence without consulting any gate.
    pub fn show_ungated(
        &mut self,
        bounds: Rect,
        on_complete: impl FnOnce() + 'static,
    ) -> GuideResult<()> {
        if self.active {
            return Err(GuideError::AlreadyActive);
        }
        self.enter(bounds, Box::new(on_complete))
    }

    fn enter(&mut self, bounds: Rect, on_complete: CompletionCallback) -> GuideResult<()> {
        let _span = tracing::debug_span!(
            "coachmark.show",
            key = self.sequence.key(),
            count = self.sequence.len()
        )
        .entered();

        let options = PresentOptions::from_style(&self.style);
        self.backend
            .host()
            .present(&options)
            .map_err(GuideError::backend)?;

        self.active = true;
        self.bounds = bounds;
        self.layout = None;
        self.arrow = None;
        self.on_complete = Some(on_complete);
        self.sequence.rewind();

        self.notify_will_change(0);
        if let Err(err) = self.relayout(FrameReason::Entered) {
            tracing::warn!(error = %err, "first frame failed, dismissing");
            self.active = false;
            self.on_complete = None;
            if let Err(dismiss_err) = self.backend.host().dismiss() {
                tracing::warn!(error = %dismiss_err, "dismiss after failed show also failed");
            }
            return Err(err);
        }
        self.notify_did_change(0);

        tracing::info!(count = self.sequence.len(), "guide presented");
        Ok(())
    }

    /// Step to the next item, or finish after the last one.
    pub fn advance(&mut self) -> GuideResult<AdvanceOutcome> {
        if !self.active {
            return Ok(AdvanceOutcome::Inactive);
        }
        let Some(next) = self.sequence.next_index() else {
            self.finish()?;
            return Ok(AdvanceOutcome::Finished);
        };

        let _span = tracing::debug_span!("coachmark.advance", from = next - 1, to = next).entered();
        self.notify_will_change(next);
        self.sequence.advance();
        self.relayout(FrameReason::Advanced)?;
        self.notify_did_change(next);
        tracing::debug!(index = next, "advanced");
        Ok(AdvanceOutcome::Advanced { index: next })
    }

    /// A tap anywhere on the overlay advances, wherever it lands.
    pub fn handle_tap(&mut self, point: Point) -> GuideResult<AdvanceOutcome> {
        tracing::debug!(
            x = point.x,
            y = point.y,
            on_backdrop = self.layout.as_ref().is_some_and(|l| l.mask.contains(point)),
            "overlay tapped"
        );
        self.advance()
    }

    /// Re-lay the current item for new screen bounds.
    ///
    /// No index change and no notifications. While idle the bounds are
    /// only remembered.
    pub fn resize(&mut self, bounds: Rect) -> GuideResult<()> {
        self.bounds = bounds;
        if !self.active {
            return Ok(());
        }
        self.relayout(FrameReason::Resized)
    }

    fn finish(&mut self) -> GuideResult<()> {
        self.backend.host().dismiss().map_err(GuideError::backend)?;
        self.active = false;
        self.layout = None;
        self.arrow = None;
        tracing::info!(key = self.sequence.key(), "guide finished");
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
        Ok(())
    }

    fn relayout(&mut self, reason: FrameReason) -> GuideResult<()> {
        let item = self.sequence.current_item();
        let arrow = resolve_arrow(item, &self.style)?;
        let layout = {
            let ctx = LayoutContext {
                bounds: self.bounds,
                style: &self.style,
                resolver: self.backend.resolver(),
                measurer: self.backend.measurer(),
            };
            compute_layout(item, arrow.size(), &ctx)?
        };

        let style = &self.style;
        let duration = style.animation_duration;
        let frame = OverlayFrame {
            reason,
            index: self.sequence.current_index(),
            count: self.sequence.len(),
            layout: &layout,
            backdrop: style.backdrop_color(),
            previous_mask: if style.animate_mask {
                self.layout.as_ref().map(|previous| &previous.mask)
            } else {
                None
            },
            mask_transition: Transition::select(style.animate_mask, duration),
            arrow: ArrowSprite {
                image: &arrow,
                tint: style.arrow_color,
                transition: Transition::select(style.animate_arrow, duration),
            },
            caption: Caption {
                text: item.text(),
                font: &style.font,
                color: style.text_color,
                transition: Transition::select(style.animate_text, duration),
            },
        };
        self.backend
            .renderer()
            .render(&frame)
            .map_err(GuideError::backend)?;

        self.layout = Some(layout);
        self.arrow = Some(arrow);
        Ok(())
    }

    fn notify_will_change(&mut self, index: usize) {
        if let (Some(listener), Some(item)) =
            (self.index_will_change.as_mut(), self.sequence.get(index))
        {
            listener(index, item);
        }
    }

    fn notify_did_change(&mut self, index: usize) {
        if let (Some(listener), Some(item)) =
            (self.index_did_change.as_mut(), self.sequence.get(index))
        {
            listener(index, item);
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.sequence.current_index()
    }

    #[must_use]
    pub fn sequence(&self) -> &GuideSequence {
        &self.sequence
    }

    #[must_use]
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Layout of the item on screen, if any.
    #[must_use]
    pub fn layout(&self) -> Option<&LayoutResult> {
        self.layout.as_ref()
    }

    /// Arrow image of the item on screen, if any.
    #[must_use]
    pub fn arrow(&self) -> Option<&ImageHandle> {
        self.arrow.as_ref()
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: OverlayBackend + core::fmt::Debug> core::fmt::Debug for GuideController<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GuideController")
            .field("backend", &self.backend)
            .field("index", &self.sequence.current_index())
            .field("count", &self.sequence.len())
            .field("active", &self.active)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}
