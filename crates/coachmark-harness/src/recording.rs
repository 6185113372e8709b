#![forbid(unsafe_code)]

//! Recording host and renderer.
//!
//! Both keep an owned log of every call so tests can assert on the exact
//! sequence of presents, dismisses, and frames. Each can be told to fail
//! its next call to exercise error paths.

use coachmark_backend::{
    FrameReason, OverlayFrame, OverlayRenderer, PresentOptions, PresentationHost, Transition,
};
use coachmark_core::color::Rgba;
use coachmark_core::font::FontSpec;
use coachmark_core::geometry::Size;
use coachmark_layout::{LayoutResult, MaskPath};

use crate::HarnessError;

/// One call seen by [`RecordingHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    Present(PresentOptions),
    Dismiss,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
    presented: bool,
    fail_present: bool,
    fail_dismiss: bool,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Whether the overlay is currently up.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.presented
    }

    #[must_use]
    pub fn present_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::Present(_)))
            .count()
    }

    #[must_use]
    pub fn dismiss_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::Dismiss))
            .count()
    }

    /// Make the next `present` fail.
    pub fn fail_next_present(&mut self) {
        self.fail_present = true;
    }

    /// Make the next `dismiss` fail.
    pub fn fail_next_dismiss(&mut self) {
        self.fail_dismiss = true;
    }
}

impl PresentationHost for RecordingHost {
    type Error = HarnessError;

    fn present(&mut self, options: &PresentOptions) -> Result<(), Self::Error> {
        if std::mem::take(&mut self.fail_present) {
            return Err(HarnessError::Injected { op: "present" });
        }
        self.calls.push(HostCall::Present(*options));
        self.presented = true;
        Ok(())
    }

    fn dismiss(&mut self) -> Result<(), Self::Error> {
        if std::mem::take(&mut self.fail_dismiss) {
            return Err(HarnessError::Injected { op: "dismiss" });
        }
        self.calls.push(HostCall::Dismiss);
        self.presented = false;
        Ok(())
    }
}

/// Owned copy of an [`OverlayFrame`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub reason: FrameReason,
    pub index: usize,
    pub count: usize,
    pub layout: LayoutResult,
    pub backdrop: Rgba,
    pub previous_mask: Option<MaskPath>,
    pub mask_transition: Transition,
    pub arrow_name: String,
    pub arrow_size: Size,
    pub arrow_tint: Rgba,
    pub arrow_transition: Transition,
    pub text: String,
    pub font: FontSpec,
    pub text_color: Rgba,
    pub text_transition: Transition,
}

impl From<&OverlayFrame<'_>> for FrameSnapshot {
    fn from(frame: &OverlayFrame<'_>) -> Self {
        Self {
            reason: frame.reason,
            index: frame.index,
            count: frame.count,
            layout: frame.layout.clone(),
            backdrop: frame.backdrop,
            previous_mask: frame.previous_mask.cloned(),
            mask_transition: frame.mask_transition,
            arrow_name: frame.arrow.image.name().to_owned(),
            arrow_size: frame.arrow.image.size(),
            arrow_tint: frame.arrow.tint,
            arrow_transition: frame.arrow.transition,
            text: frame.caption.text.to_owned(),
            font: frame.caption.font.clone(),
            text_color: frame.caption.color,
            text_transition: frame.caption.transition,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Vec<FrameSnapshot>,
    fail_render: bool,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames(&self) -> &[FrameSnapshot] {
        &self.frames
    }

    #[must_use]
    pub fn last(&self) -> Option<&FrameSnapshot> {
        self.frames.last()
    }

    /// Make the next `render` fail.
    pub fn fail_next_render(&mut self) {
        self.fail_render = true;
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl OverlayRenderer for RecordingRenderer {
    type Error = HarnessError;

    fn render(&mut self, frame: &OverlayFrame<'_>) -> Result<(), Self::Error> {
        if std::mem::take(&mut self.fail_render) {
            return Err(HarnessError::Injected { op: "render" });
        }
        tracing::trace!(index = frame.index, reason = ?frame.reason, "frame recorded");
        self.frames.push(FrameSnapshot::from(frame));
        Ok(())
    }
}
