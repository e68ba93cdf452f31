//! Explorer-related data types shared by the engine and the view layer.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use super::FileNode;

// =============================================================================
// Search
// =============================================================================

/// Options that shape the search predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Match case exactly
    pub case_sensitive: bool,
    /// Treat the term as a regular expression
    pub regex: bool,
    /// Match whole name tokens only
    pub whole_word: bool,
    /// Include dotfiles and dot-folders in results
    pub show_hidden: bool,
    /// File extensions to keep (lowercase, no dot); empty keeps all
    pub file_types: BTreeSet<String>,
    /// Keep only files modified within this window
    pub modified_within: Option<Duration>,
}

impl SearchFilters {
    /// Parse a comma or space separated extension list (`"rs, .toml md"`).
    pub fn parse_file_types(input: &str) -> BTreeSet<String> {
        input
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Counts shown next to the search box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchSummary {
    pub total_files: usize,
    pub total_folders: usize,
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        write!(
            f,
            "{} file{}, {} folder{}",
            self.total_files,
            plural(self.total_files),
            self.total_folders,
            plural(self.total_folders)
        )
    }
}

// =============================================================================
// Tree Store State
// =============================================================================

/// Progress of the automatic retry loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryStatus {
    /// Attempt about to run (2-based once retrying)
    pub attempt: u32,
    pub max_attempts: u32,
}

impl fmt::Display for RetryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Retrying… ({}/{})", self.attempt, self.max_attempts)
    }
}

/// Observable state of the tree store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeState {
    /// Canonical tree as last fetched
    pub nodes: Vec<FileNode>,
    /// A fetch is outstanding
    pub loading: bool,
    /// Terminal error message (retries exhausted or connection lost)
    pub error: Option<String>,
    /// Set while backing off between attempts
    pub retry: Option<RetryStatus>,
    /// Live channel reported a connection failure
    pub connection_lost: bool,
}

impl TreeState {
    /// Whether the tree has ever been loaded successfully.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_types() {
        let types = SearchFilters::parse_file_types("rs, .TOML  md,,");
        let expected: BTreeSet<String> =
            ["md", "rs", "toml"].iter().map(|s| s.to_string()).collect();
        assert_eq!(types, expected);
        assert!(SearchFilters::parse_file_types("  ").is_empty());
    }

    #[test]
    fn test_summary_display() {
        let summary = SearchSummary {
            total_files: 1,
            total_folders: 3,
        };
        assert_eq!(summary.to_string(), "1 file, 3 folders");
    }

    #[test]
    fn test_retry_status_display() {
        let status = RetryStatus {
            attempt: 2,
            max_attempts: 3,
        };
        assert_eq!(status.to_string(), "Retrying… (2/3)");
    }
}
