#![forbid(unsafe_code)]

//! Core: geometry, colors, style, and the guide-sequence model.
//!
//! # Role in coachmark
//! `coachmark-core` is the leaf crate. It owns the value types every other
//! crate passes around: screen geometry, the caller-supplied
//! [`StyleConfig`], and the [`GuideSequence`] a controller walks through.
//! It performs no I/O apart from loading style files.

pub mod color;
pub mod font;
pub mod geometry;
pub mod guide;
pub mod logging;
pub mod style;

pub use color::{ParseColorError, Rgba};
pub use font::FontSpec;
pub use geometry::{Point, Rect, Sides, Size};
pub use guide::{GuideItem, GuideSequence, ImageHandle, SequenceError, TargetRegion, ViewId};
pub use style::StyleConfig;
#[cfg(feature = "style-config")]
pub use style::StyleConfigError;
