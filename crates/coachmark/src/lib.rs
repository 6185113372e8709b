#![forbid(unsafe_code)]

//! Coachmark public facade crate.
//!
//! A coach mark dims the screen, cuts a rounded window around one target,
//! points an arrow at it, and shows a caption. Taps step through a
//! sequence of such highlights; a keyed sequence is shown once per key.
//!
//! This crate re-exports the stable surface of the internal crates and
//! offers a prelude for day-to-day usage:
//!
//! - build items with [`GuideItem`] and a [`GuideSequence`]
//! - style them with [`StyleConfig`]
//! - drive them with a [`GuideController`] over your [`OverlayBackend`]
//! - gate them with a [`VisibilityGate`] over a [`VisibilityStore`]

// --- Core re-exports -------------------------------------------------------

pub use coachmark_core::color::{ParseColorError, Rgba};
pub use coachmark_core::font::FontSpec;
pub use coachmark_core::geometry::{Point, Rect, Sides, Size};
pub use coachmark_core::guide::{
    GuideItem, GuideSequence, ImageHandle, SequenceError, TargetRegion, ViewId,
};
#[cfg(feature = "style-config")]
pub use coachmark_core::style::StyleConfigError;
pub use coachmark_core::style::StyleConfig;

// --- Layout re-exports -----------------------------------------------------

pub use coachmark_layout::{
    FillRule, LayoutContext, LayoutError, LayoutResult, MaskPath, MonospaceMeasurer, NoViews,
    PathEl, Quadrant, RoundedRect, TextMeasurer, ViewResolver, compute_layout,
};

// --- Backend re-exports ----------------------------------------------------

pub use coachmark_backend::{
    ArrowSprite, Caption, FrameReason, OverlayBackend, OverlayFrame, OverlayRenderer,
    PresentOptions, PresentTransition, PresentationHost, Transition,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "file-storage")]
pub use coachmark_runtime::FileStorage;
pub use coachmark_runtime::{
    AdvanceOutcome, AssetError, GuideController, GuideError, GuideResult, MemoryStorage,
    StorageError, VisibilityGate, VisibilityStore, reset_all_guides, reset_guide,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for coachmark hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Showing or stepping a guide failed.
    #[error(transparent)]
    Guide(#[from] GuideError),

    /// A style file could not be loaded.
    #[cfg(feature = "style-config")]
    #[error(transparent)]
    Style(#[from] StyleConfigError),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Guide(err.into())
    }
}

impl From<SequenceError> for Error {
    fn from(err: SequenceError) -> Self {
        Self::Guide(err.into())
    }
}

/// Standard result type for coachmark APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AdvanceOutcome, Error, GuideController, GuideItem, GuideSequence, ImageHandle,
        MemoryStorage, OverlayBackend, Point, Rect, Result, Sides, Size, StyleConfig, ViewId,
        VisibilityGate, VisibilityStore, reset_all_guides, reset_guide,
    };

    pub use crate::{backend, core, layout, runtime};
}

pub use coachmark_backend as backend;
pub use coachmark_core as core;
pub use coachmark_layout as layout;
pub use coachmark_runtime as runtime;
