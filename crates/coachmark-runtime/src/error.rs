#![forbid(unsafe_code)]

use coachmark_core::guide::SequenceError;
use coachmark_layout::LayoutError;
use thiserror::Error;

use crate::assets::AssetError;
use crate::storage::StorageError;

/// Everything that can go wrong while showing a guide.
#[derive(Debug, Error)]
pub enum GuideError {
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The presentation host or renderer failed.
    #[error("backend error: {message}")]
    Backend { message: String },

    #[error("guide is already on screen")]
    AlreadyActive,
}

impl GuideError {
    pub(crate) fn backend(err: impl core::fmt::Display) -> Self {
        Self::Backend {
            message: err.to_string(),
        }
    }
}

pub type GuideResult<T> = Result<T, GuideError>;
