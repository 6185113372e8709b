#![forbid(unsafe_code)]

//! Runtime: visibility storage, the show-once gate, arrow assets, and the
//! guide controller.
//!
//! # Role in coachmark
//! `coachmark-runtime` owns everything with state. The controller is
//! generic over an [`OverlayBackend`](coachmark_backend::OverlayBackend)
//! and runs synchronously on the UI thread; nothing here blocks or spawns.
//!
//! # How it fits in the system
//! Hosts build a [`GuideSequence`](coachmark_core::GuideSequence), wrap a
//! [`VisibilityStore`] in a [`VisibilityGate`], and call
//! [`GuideController::show`]. Taps drive [`GuideController::advance`];
//! screen changes drive [`GuideController::resize`].

pub mod assets;
pub mod controller;
pub mod error;
pub mod gate;
pub mod storage;

pub use assets::{AssetError, BUNDLED_ARROW_NAME, bundled_arrow, decode_png, resolve_arrow};
pub use controller::{AdvanceOutcome, GuideController};
pub use error::{GuideError, GuideResult};
pub use gate::{VisibilityGate, reset_all_guides, reset_guide};
#[cfg(feature = "file-storage")]
pub use storage::FileStorage;
pub use storage::{MemoryStorage, NAMESPACE, StorageError, StorageResult, VisibilityStore};
