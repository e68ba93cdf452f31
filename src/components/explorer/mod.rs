//! File explorer UI components.
//!
//! Components:
//! - [`Explorer`] - Main explorer view; owns the engine lifecycle
//! - [`SearchBar`] - Debounced search input with filter toggles
//! - [`SearchSummary`] - Match counts for the active search
//! - [`FileTree`] - Recursive tree of folders and files
//! - [`TreeStatus`] - Loading, retry and error state of the tree
//! - [`ActionBar`] - New file/folder, rename, delete, refresh
//! - [`OpenTabs`] - Opened files
//! - [`RecentList`] - Recently selected files

mod action_bar;
#[allow(clippy::module_inception)]
mod explorer;
mod file_tree;
mod open_tabs;
mod recent_list;
mod search_bar;
mod tree_status;

pub use action_bar::ActionBar;
pub use explorer::Explorer;
pub use file_tree::FileTree;
pub use open_tabs::OpenTabs;
pub use recent_list::RecentList;
pub use search_bar::{SearchBar, SearchSummary};
pub use tree_status::TreeStatus;
