//! Selection, expansion and opened-file state of one explorer view.
//!
//! [`ExplorerState`] is owned by the view that renders it and is mutated
//! only through the methods below. At all times the selected file (if any)
//! is also one of the opened files.

use std::collections::BTreeSet;

use crate::core::recent::RecentFiles;
use crate::models::{FileNode, FileRef, is_within};

/// UI state of a file explorer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExplorerState {
    expanded: BTreeSet<String>,
    selection: Option<FileRef>,
    opened: Vec<FileRef>,
    recent: RecentFiles,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with previously persisted recent files.
    pub fn with_recent(recent: RecentFiles) -> Self {
        Self {
            recent,
            ..Self::default()
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn selection(&self) -> Option<&FileRef> {
        self.selection.as_ref()
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selection.as_ref().is_some_and(|s| s.path == path)
    }

    pub fn opened(&self) -> &[FileRef] {
        &self.opened
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    pub fn expanded(&self) -> &BTreeSet<String> {
        &self.expanded
    }

    pub fn recent(&self) -> &RecentFiles {
        &self.recent
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Expand a collapsed folder or collapse an expanded one.
    ///
    /// Returns `false` without changes when `path` is not a folder in `tree`.
    pub fn toggle_expand(&mut self, tree: &[FileNode], path: &str) -> bool {
        if !FileNode::find(tree, path).is_some_and(FileNode::is_folder) {
            return false;
        }
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_string());
        }
        true
    }

    /// Expand every folder of `tree` (used to reveal search results).
    pub fn expand_all(&mut self, tree: &[FileNode]) {
        self.expanded.extend(FileNode::folder_paths(tree));
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Drop expansion entries of folders missing from a refreshed tree.
    pub fn retain_existing(&mut self, tree: &[FileNode]) {
        self.expanded
            .retain(|path| FileNode::find(tree, path).is_some_and(FileNode::is_folder));
    }

    // =========================================================================
    // Selection and Opened Files
    // =========================================================================

    /// Select a file, opening it if needed and recording it as recent.
    ///
    /// Selecting the current selection again changes nothing.
    pub fn select(&mut self, file: FileRef) {
        if self.is_selected(&file.path) {
            return;
        }
        if !self.opened.iter().any(|f| f.path == file.path) {
            self.opened.push(file.clone());
        }
        self.recent.record(file.clone());
        self.selection = Some(file);
    }

    /// Close an opened file; clears the selection if it was selected.
    pub fn close_opened(&mut self, path: &str) {
        self.opened.retain(|f| f.path != path);
        if self.is_selected(path) {
            self.selection = None;
        }
    }

    /// Close every opened file and clear the selection.
    pub fn close_all(&mut self) {
        self.opened.clear();
        self.selection = None;
    }

    // =========================================================================
    // Reconciliation
    // =========================================================================

    /// Forget a deleted file or folder and everything beneath it.
    pub fn forget_path(&mut self, path: &str) {
        if self
            .selection
            .as_ref()
            .is_some_and(|s| is_within(&s.path, path))
        {
            self.selection = None;
        }
        self.opened.retain(|f| !is_within(&f.path, path));
        self.expanded.retain(|p| !is_within(p, path));
        self.recent.forget(path);
    }

    /// Rename a file in place wherever it is referenced.
    pub fn rename_path(&mut self, old_path: &str, new: FileRef) {
        if self.is_selected(old_path) {
            self.selection = Some(new.clone());
        }
        for file in self.opened.iter_mut().filter(|f| f.path == old_path) {
            *file = new.clone();
        }
        self.recent.rename(old_path, &new);
    }

    /// Check the selection-implies-opened invariant.
    pub fn is_consistent(&self) -> bool {
        self.selection
            .as_ref()
            .is_none_or(|s| self.opened.iter().any(|f| f.path == s.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<FileNode> {
        vec![
            FileNode::folder(
                "src",
                "src",
                vec![
                    FileNode::file("a.js", "src/a.js"),
                    FileNode::file("b.py", "src/b.py"),
                    FileNode::folder("util", "src/util", vec![]),
                ],
            ),
            FileNode::file("README.md", "README.md"),
        ]
    }

    fn a() -> FileRef {
        FileRef::new("a.js", "src/a.js")
    }

    fn b() -> FileRef {
        FileRef::new("b.py", "src/b.py")
    }

    fn opened_paths(state: &ExplorerState) -> Vec<&str> {
        state.opened().iter().map(|f| f.path.as_str()).collect()
    }

    // =========================================================================
    // Expansion Tests
    // =========================================================================

    #[test]
    fn test_toggle_expand_roundtrip() {
        let tree = tree();
        let mut state = ExplorerState::new();
        let before = state.clone();

        assert!(state.toggle_expand(&tree, "src"));
        assert!(state.is_expanded("src"));
        assert!(state.toggle_expand(&tree, "src"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle_expand_unknown_or_file_is_noop() {
        let tree = tree();
        let mut state = ExplorerState::new();
        assert!(!state.toggle_expand(&tree, "gone"));
        assert!(!state.toggle_expand(&tree, "src/a.js"));
        assert!(state.expanded().is_empty());
    }

    #[test]
    fn test_retain_existing_prunes_deleted_folders() {
        let mut state = ExplorerState::new();
        state.expand_all(&tree());
        assert!(state.is_expanded("src/util"));

        let refreshed = vec![FileNode::folder("src", "src", vec![])];
        state.retain_existing(&refreshed);
        assert!(state.is_expanded("src"));
        assert!(!state.is_expanded("src/util"));
    }

    // =========================================================================
    // Selection Tests
    // =========================================================================

    #[test]
    fn test_select_opens_in_order() {
        let mut state = ExplorerState::new();
        state.select(a());
        state.select(b());
        assert_eq!(opened_paths(&state), vec!["src/a.js", "src/b.py"]);
        assert_eq!(state.selection(), Some(&b()));
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut state = ExplorerState::new();
        state.select(a());
        let once = state.clone();
        state.select(a());
        assert_eq!(state, once);
    }

    #[test]
    fn test_reselecting_opened_file_keeps_tab_order() {
        let mut state = ExplorerState::new();
        state.select(a());
        state.select(b());
        state.select(a());
        assert_eq!(opened_paths(&state), vec!["src/a.js", "src/b.py"]);
        assert!(state.is_selected("src/a.js"));
    }

    #[test]
    fn test_close_selected_clears_selection() {
        let mut state = ExplorerState::new();
        state.select(a());
        state.select(b());
        state.close_opened("src/b.py");
        assert_eq!(state.selection(), None);
        assert_eq!(opened_paths(&state), vec!["src/a.js"]);

        state.select(b());
        state.close_opened("src/a.js");
        assert_eq!(state.selection(), Some(&b()));
    }

    #[test]
    fn test_close_all() {
        let mut state = ExplorerState::new();
        state.select(a());
        state.select(b());
        state.close_all();
        assert!(state.opened().is_empty());
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn test_selection_invariant_over_operation_sequences() {
        let files: Vec<FileRef> = (0..4)
            .map(|i| FileRef::new(format!("f{}", i), format!("d/f{}", i)))
            .collect();
        let mut state = ExplorerState::new();
        let mut seed: u64 = 7;

        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let pick = ((seed >> 33) % 4) as usize;
            match (seed >> 40) % 4 {
                0 | 1 => state.select(files[pick].clone()),
                2 => state.close_opened(&files[pick].path),
                _ => state.close_all(),
            }
            assert!(state.is_consistent());
            let unique: BTreeSet<_> = state.opened().iter().map(|f| &f.path).collect();
            assert_eq!(unique.len(), state.opened().len());
        }
    }

    #[test]
    fn test_select_records_recent() {
        let mut state = ExplorerState::new();
        state.select(a());
        state.select(b());
        assert_eq!(state.recent().entries()[0], b());
    }

    // =========================================================================
    // Reconciliation Tests
    // =========================================================================

    #[test]
    fn test_forget_folder_drops_descendants() {
        let mut state = ExplorerState::new();
        state.expand_all(&tree());
        state.select(FileRef::new("README.md", "README.md"));
        state.select(a());
        state.forget_path("src");

        assert_eq!(state.selection(), None);
        assert_eq!(opened_paths(&state), vec!["README.md"]);
        assert!(state.expanded().is_empty());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_rename_selected_file_in_place() {
        let mut state = ExplorerState::new();
        state.select(a());
        state.select(b());
        state.select(a());
        state.rename_path("src/a.js", FileRef::new("c.js", "src/c.js"));

        assert_eq!(state.selection(), Some(&FileRef::new("c.js", "src/c.js")));
        assert_eq!(opened_paths(&state), vec!["src/c.js", "src/b.py"]);
        assert!(state.is_consistent());
    }
}
