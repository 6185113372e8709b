#![forbid(unsafe_code)]
#![doc = "Backend traits for coachmark: presentation host, overlay renderer, and platform capabilities."]
#![doc = ""]
#![doc = "This crate defines the boundary between the guide controller and the"]
#![doc = "platform that actually shows a full-screen overlay, draws the mask, and"]
#![doc = "animates the arrow and caption."]

use core::time::Duration;

use coachmark_core::color::Rgba;
use coachmark_core::font::FontSpec;
use coachmark_core::guide::ImageHandle;
use coachmark_core::style::StyleConfig;
use coachmark_layout::{LayoutResult, MaskPath, TextMeasurer, ViewResolver};

/// How the overlay itself appears and disappears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PresentTransition {
    /// Fade the overlay in over the host content.
    #[default]
    CrossDissolve,
    /// Appear and disappear without animation.
    None,
}

/// Options passed to [`PresentationHost::present`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentOptions {
    /// Hide the platform status bar while the overlay is up.
    pub status_bar_hidden: bool,
    pub transition: PresentTransition,
}

impl PresentOptions {
    #[must_use]
    pub fn from_style(style: &StyleConfig) -> Self {
        Self {
            status_bar_hidden: style.status_bar_hidden,
            transition: PresentTransition::CrossDissolve,
        }
    }
}

/// Per-element transition. State is committed before the animation runs;
/// renderers play it as visual catch-up and never report back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Immediate,
    Animated(Duration),
}

impl Transition {
    /// `Animated(duration)` when `animated`, else `Immediate`.
    ///
    /// Durations that are zero, negative, NaN, or too large for
    /// [`Duration`] fall back to `Immediate`.
    #[must_use]
    pub fn select(animated: bool, seconds: f64) -> Self {
        match Duration::try_from_secs_f64(seconds) {
            Ok(duration) if animated && !duration.is_zero() => Self::Animated(duration),
            _ => Self::Immediate,
        }
    }

    #[must_use]
    pub const fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }
}

/// Why a frame was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameReason {
    /// First frame after presenting.
    Entered,
    /// The user advanced to the next item.
    Advanced,
    /// The screen size changed.
    Resized,
}

/// Arrow sub-element.
#[derive(Debug, Clone, Copy)]
pub struct ArrowSprite<'a> {
    pub image: &'a ImageHandle,
    pub tint: Rgba,
    pub transition: Transition,
}

/// Caption sub-element: left-aligned, wrapping, unlimited lines.
#[derive(Debug, Clone, Copy)]
pub struct Caption<'a> {
    pub text: &'a str,
    pub font: &'a FontSpec,
    pub color: Rgba,
    pub transition: Transition,
}

/// Everything a renderer needs to draw one overlay state.
#[derive(Debug, Clone, Copy)]
pub struct OverlayFrame<'a> {
    pub reason: FrameReason,
    pub index: usize,
    pub count: usize,
    pub layout: &'a LayoutResult,
    /// Backdrop fill (black at the configured alpha).
    pub backdrop: Rgba,
    /// Mask to animate from, when the mask transition is animated.
    pub previous_mask: Option<&'a MaskPath>,
    pub mask_transition: Transition,
    pub arrow: ArrowSprite<'a>,
    pub caption: Caption<'a>,
}

/// Shows and hides the full-screen overlay.
pub trait PresentationHost {
    /// Platform-specific error type.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Bring the overlay on screen above the host content.
    fn present(&mut self, options: &PresentOptions) -> Result<(), Self::Error>;

    /// Take the overlay down. The controller runs its completion callback
    /// after this returns `Ok`.
    fn dismiss(&mut self) -> Result<(), Self::Error>;
}

/// Draws mask, arrow, and caption.
pub trait OverlayRenderer {
    /// Platform-specific error type.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Apply a frame. Must not block on animations.
    fn render(&mut self, frame: &OverlayFrame<'_>) -> Result<(), Self::Error>;
}

/// Unified backend combining the host, the renderer, and the layout
/// capabilities.
///
/// The `GuideController` is generic over this trait.
pub trait OverlayBackend {
    /// Platform-specific error type shared across sub-traits.
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Presentation host implementation.
    type Host: PresentationHost<Error = Self::Error>;

    /// Renderer implementation.
    type Renderer: OverlayRenderer<Error = Self::Error>;

    fn host(&mut self) -> &mut Self::Host;

    fn renderer(&mut self) -> &mut Self::Renderer;

    /// View-to-screen-rect resolution.
    fn resolver(&self) -> &dyn ViewResolver;

    /// Text measurement.
    fn measurer(&self) -> &dyn TextMeasurer;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_select() {
        assert_eq!(
            Transition::select(true, 0.2),
            Transition::Animated(Duration::from_millis(200))
        );
        assert_eq!(Transition::select(false, 0.2), Transition::Immediate);
        assert_eq!(Transition::select(true, 0.0), Transition::Immediate);
        assert!(!Transition::Immediate.is_animated());
    }

    #[test]
    fn unrepresentable_durations_are_immediate() {
        for seconds in [1e20, f64::INFINITY, f64::NAN, -1.0] {
            assert_eq!(Transition::select(true, seconds), Transition::Immediate);
        }
    }

    #[test]
    fn present_options_follow_style() {
        let style = StyleConfig::default().status_bar_hidden(true);
        let opts = PresentOptions::from_style(&style);
        assert!(opts.status_bar_hidden);
        assert_eq!(opts.transition, PresentTransition::CrossDissolve);
        assert!(!PresentOptions::default().status_bar_hidden);
    }
}
