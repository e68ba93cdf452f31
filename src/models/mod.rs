//! Data models and types for the explorer.
//!
//! Contains domain types for:
//! - [`FileNode`], [`FileRef`] - Project tree representation
//! - [`SearchFilters`], [`SearchSummary`] - Search configuration and result counts
//! - [`TreeState`], [`RetryStatus`] - Observable tree store state

mod explorer;
mod file_node;

pub use explorer::{RetryStatus, SearchFilters, SearchSummary, TreeState};
pub use file_node::{FileNode, FileRef, extension_of, is_within};
