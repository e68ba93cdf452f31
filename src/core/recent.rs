//! Recently selected files.
//!
//! A bounded most-recent-first list, deduplicated by path and persisted as
//! a JSON array of `{name, path}` records.

use crate::config::{MAX_RECENT_FILES, RECENT_FILES_KEY};
use crate::core::error::StorageError;
use crate::models::{FileRef, is_within};
use crate::utils::storage::{self, KeyValueStore};

/// Most-recent-first list of selected files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecentFiles {
    entries: Vec<FileRef>,
}

impl RecentFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, dropping duplicates and overflow.
    pub fn from_entries(entries: Vec<FileRef>) -> Self {
        let mut recent = Self::new();
        for entry in entries.into_iter().rev() {
            recent.record(entry);
        }
        recent
    }

    /// Load persisted entries; missing or corrupt data yields an empty list.
    pub fn load(store: &impl KeyValueStore) -> Self {
        storage::get_json::<Vec<FileRef>>(store, RECENT_FILES_KEY)
            .map(Self::from_entries)
            .unwrap_or_default()
    }

    /// Persist the current entries.
    pub fn save(&self, store: &impl KeyValueStore) -> Result<(), StorageError> {
        storage::set_json(store, RECENT_FILES_KEY, &self.entries)
    }

    /// Move `file` to the front, evicting the oldest entry past the limit.
    pub fn record(&mut self, file: FileRef) {
        self.entries.retain(|entry| entry.path != file.path);
        self.entries.insert(0, file);
        self.entries.truncate(MAX_RECENT_FILES);
    }

    /// Drop `path` and anything beneath it.
    pub fn forget(&mut self, path: &str) {
        self.entries.retain(|entry| !is_within(&entry.path, path));
    }

    /// Rename an entry in place, keeping its position.
    pub fn rename(&mut self, old_path: &str, new: &FileRef) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.path == old_path) {
            *entry = new.clone();
        }
    }

    pub fn entries(&self) -> &[FileRef] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
