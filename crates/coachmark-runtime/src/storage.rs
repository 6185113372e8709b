#![forbid(unsafe_code)]

//! Visibility record storage.
//!
//! A [`VisibilityStore`] is a flat `key -> bool` mapping under one fixed
//! namespace. [`MemoryStorage`] keeps it in process; [`FileStorage`]
//! persists it as JSON across sessions.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "namespace": "coachmark.visibility",
//!   "last_saved": "2026-02-24T02:30:00Z",
//!   "entries": { "onboarding_v1": true }
//! }
//! ```
//!
//! # Atomic Writes
//!
//! Writes use a temp-file-then-rename pattern to prevent corruption on crash.

use std::collections::HashMap;
#[cfg(feature = "file-storage")]
use std::collections::BTreeMap;
#[cfg(feature = "file-storage")]
use std::path::{Path, PathBuf};

#[cfg(feature = "file-storage")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace every visibility record lives under.
pub const NAMESPACE: &str = "coachmark.visibility";

/// Current file format version.
#[cfg(feature = "file-storage")]
const FORMAT_VERSION: u64 = 1;

/// Storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "file-storage")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported visibility file version: {found} (expected {expected})")]
    UnsupportedVersion { found: u64, expected: u64 },

    #[error("visibility file belongs to namespace {found:?}")]
    NamespaceMismatch { found: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value persistence for visibility records.
pub trait VisibilityStore {
    fn get(&self, key: &str) -> StorageResult<Option<bool>>;

    fn set(&mut self, key: &str, value: bool) -> StorageResult<()>;

    /// Remove `key`; no-op when absent.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Drop every record.
    fn clear(&mut self) -> StorageResult<()>;
}

impl<S: VisibilityStore + ?Sized> VisibilityStore for &mut S {
    fn get(&self, key: &str) -> StorageResult<Option<bool>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: bool) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn clear(&mut self) -> StorageResult<()> {
        (**self).clear()
    }
}

impl<S: VisibilityStore + ?Sized> VisibilityStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<bool>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: bool) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn clear(&mut self) -> StorageResult<()> {
        (**self).clear()
    }
}

/// In-process store. Records vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, bool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VisibilityStore for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<bool>> {
        Ok(self.entries.get(key).copied())
    }

    fn set(&mut self, key: &str, value: bool) -> StorageResult<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.entries.clear();
        Ok(())
    }
}

/// On-disk representation of the visibility records.
#[cfg(feature = "file-storage")]
#[derive(Debug, Serialize, Deserialize)]
struct VisibilityFile {
    version: u64,
    namespace: String,
    last_saved: String,
    entries: BTreeMap<String, bool>,
}

/// JSON-file store. Every mutation is written through immediately.
#[cfg(feature = "file-storage")]
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, bool>,
}

#[cfg(feature = "file-storage")]
impl FileStorage {
    /// Open (or lazily create) the store at `path`.
    ///
    /// - **Missing file** yields an empty store; nothing is written until
    ///   the first mutation.
    /// - **Corrupted file** returns [`StorageError::Json`].
    /// - **Version or namespace mismatch** returns a descriptive error.
    ///
    /// The parent directory must already exist when the first write happens.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let file: VisibilityFile = serde_json::from_str(&contents)?;
            if file.version != FORMAT_VERSION {
                return Err(StorageError::UnsupportedVersion {
                    found: file.version,
                    expected: FORMAT_VERSION,
                });
            }
            if file.namespace != NAMESPACE {
                return Err(StorageError::NamespaceMismatch {
                    found: file.namespace,
                });
            }
            file.entries
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), records = entries.len(), "visibility store opened");
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk, then adopt them. On failure the in-memory
    /// records keep matching the last successful write.
    fn commit(&mut self, entries: BTreeMap<String, bool>) -> StorageResult<()> {
        self.save(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn save(&self, entries: &BTreeMap<String, bool>) -> StorageResult<()> {
        let file = VisibilityFile {
            version: FORMAT_VERSION,
            namespace: NAMESPACE.to_owned(),
            last_saved: now_iso8601(),
            entries: entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        // Atomic write: temp file then rename
        let temp = self.path.with_extension("json.tmp");
        let written = std::fs::write(&temp, json).and_then(|()| std::fs::rename(&temp, &self.path));
        if let Err(err) = written {
            tracing::warn!(path = %self.path.display(), error = %err, "visibility store write failed");
            return Err(err.into());
        }
        Ok(())
    }
}

#[cfg(feature = "file-storage")]
impl VisibilityStore for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<bool>> {
        Ok(self.entries.get(key).copied())
    }

    fn set(&mut self, key: &str, value: bool) -> StorageResult<()> {
        let mut entries = self.entries.clone();
        entries.insert(key.to_owned(), value);
        self.commit(entries)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.commit(entries)
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.commit(BTreeMap::new())
    }
}

/// Get current timestamp in ISO 8601 format.
#[cfg(feature = "file-storage")]
fn now_iso8601() -> String {
    let since_epoch = web_time::SystemTime::now()
        .duration_since(web_time::SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs();

    let days = secs / 86_400;
    let time_secs = secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        time_secs / 3600,
        (time_secs % 3600) / 60,
        time_secs % 60
    )
}

/// Days since the Unix epoch to a proleptic Gregorian (year, month, day).
#[cfg(feature = "file-storage")]
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = (z - era * 146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe as i64 + era * 400 + i64::from(month <= 2);
    (year as u64, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_basic_ops() {
        let mut store = MemoryStorage::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", true).unwrap();
        store.set("b", false).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(true));
        assert_eq!(store.get("b").unwrap(), Some(false));
        store.remove("a").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.len(), 1);
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn boxed_and_borrowed_stores_delegate() {
        let mut inner = MemoryStorage::new();
        {
            let mut borrowed: &mut MemoryStorage = &mut inner;
            VisibilityStore::set(&mut borrowed, "k", true).unwrap();
        }
        let mut boxed: Box<dyn VisibilityStore> = Box::new(inner);
        assert_eq!(boxed.get("k").unwrap(), Some(true));
        boxed.clear().unwrap();
        assert_eq!(boxed.get("k").unwrap(), None);
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn civil_dates() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(59), (1970, 3, 1));
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(20_376), (2025, 10, 15));
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn missing_file_is_empty_and_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visibility.json");
        let store = FileStorage::open(&path).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
        assert!(!path.exists());
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visibility.json");
        {
            let mut store = FileStorage::open(&path).unwrap();
            store.set("onboarding_v1", true).unwrap();
            store.set("settings_tour", true).unwrap();
            store.remove("settings_tour").unwrap();
        }
        let store = FileStorage::open(&path).unwrap();
        assert_eq!(store.get("onboarding_v1").unwrap(), Some(true));
        assert_eq!(store.get("settings_tour").unwrap(), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn failed_writes_leave_records_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("state");
        std::fs::create_dir(&sub).unwrap();
        let path = sub.join("visibility.json");

        let mut store = FileStorage::open(&path).unwrap();
        store.set("onboarding_v1", true).unwrap();
        std::fs::remove_dir_all(&sub).unwrap();

        assert!(matches!(store.set("settings_tour", true), Err(StorageError::Io(_))));
        assert_eq!(store.get("settings_tour").unwrap(), None);

        assert!(store.remove("onboarding_v1").is_err());
        assert_eq!(store.get("onboarding_v1").unwrap(), Some(true));

        assert!(store.clear().is_err());
        assert_eq!(store.get("onboarding_v1").unwrap(), Some(true));
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn file_is_human_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visibility.json");
        let mut store = FileStorage::open(&path).unwrap();
        store.set("a", true).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains('\n'));
        assert!(contents.contains("\"version\": 1"));
        assert!(contents.contains("\"namespace\": \"coachmark.visibility\""));
        assert!(contents.contains("\"a\": true"));
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn corrupted_file_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not valid json {{{").unwrap();
        assert!(matches!(
            FileStorage::open(&path).unwrap_err(),
            StorageError::Json(_)
        ));
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn version_and_namespace_are_checked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.json");
        let doc = |version: u64, namespace: &str| {
            format!(
                r#"{{"version": {version}, "namespace": "{namespace}", "last_saved": "2026-01-01T00:00:00Z", "entries": {{}}}}"#
            )
        };

        std::fs::write(&path, doc(999, NAMESPACE)).unwrap();
        let err = FileStorage::open(&path).unwrap_err();
        assert!(err.to_string().contains("version"), "{err}");

        std::fs::write(&path, doc(1, "someone.else")).unwrap();
        assert!(matches!(
            FileStorage::open(&path).unwrap_err(),
            StorageError::NamespaceMismatch { .. }
        ));
    }

    #[cfg(feature = "file-storage")]
    #[test]
    fn clear_writes_an_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visibility.json");
        let mut store = FileStorage::open(&path).unwrap();
        store.set("a", true).unwrap();
        store.clear().unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("a").unwrap(), None);
    }
}
