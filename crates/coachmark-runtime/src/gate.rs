#![forbid(unsafe_code)]

//! Show-once gate.
//!
//! A sequence with a key is shown at most once per key until that key is
//! reset. The decision is presence-based: any stored record for the key,
//! whatever its value, suppresses the sequence. A sequence without a key
//! always shows and never touches the store.
//!
//! The check and the write happen under one `&mut` borrow, so two
//! sequences sharing a key can never both pass.

use crate::storage::{StorageResult, VisibilityStore};

/// Gates sequence presentation on a [`VisibilityStore`].
#[derive(Debug, Default)]
pub struct VisibilityGate<S> {
    store: S,
}

impl<S: VisibilityStore> VisibilityGate<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Decide whether a sequence with `key` may be shown, recording the
    /// showing when it may.
    ///
    /// - `None` always shows.
    /// - An unseen key shows once; the record is written before returning.
    /// - A recorded key never shows again until reset.
    pub fn should_show(&mut self, key: Option<&str>) -> StorageResult<bool> {
        let Some(key) = key else {
            tracing::debug!(show = true, "no visibility key");
            return Ok(true);
        };
        if self.store.get(key)?.is_some() {
            tracing::debug!(key, show = false, "already shown");
            return Ok(false);
        }
        self.store.set(key, true)?;
        tracing::debug!(key, show = true, "first showing recorded");
        Ok(true)
    }

    /// Whether `key` has a record.
    pub fn has_shown(&self, key: &str) -> StorageResult<bool> {
        Ok(self.store.get(key)?.is_some())
    }

    /// Forget `key` so its sequence shows again.
    pub fn reset(&mut self, key: &str) -> StorageResult<()> {
        reset_guide(&mut self.store, key)
    }

    /// Forget every key.
    pub fn reset_all(&mut self) -> StorageResult<()> {
        reset_all_guides(&mut self.store)
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }
}

/// Remove the record for `key`. Missing keys are not an error.
pub fn reset_guide<S: VisibilityStore + ?Sized>(store: &mut S, key: &str) -> StorageResult<()> {
    tracing::debug!(key, "visibility reset");
    store.remove(key)
}

/// Remove every record in the visibility namespace.
pub fn reset_all_guides<S: VisibilityStore + ?Sized>(store: &mut S) -> StorageResult<()> {
    tracing::debug!("visibility reset for all keys");
    store.clear()
}
