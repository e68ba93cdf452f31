//! File-tree engine of the explorer.
//!
//! This module provides:
//! - [`TreeStore`] canonical tree with retry and refresh coalescing
//! - [`filter_tree`] search predicate over the tree and [`aggregate`] counts
//! - [`ExplorerState`] selection, expansion and opened files
//! - [`Reconciler`] create/delete/rename with local reconciliation
//! - [`live`] Socket.IO frame codec for tree-change notifications
//!
//! Nothing here touches the DOM; browser bindings live in [`crate::utils`].

mod aggregate;
pub mod api;
pub mod error;
mod filter;
pub mod live;
mod reconciler;
mod recent;
mod session;
pub mod tree_store;

pub use aggregate::aggregate;
pub use api::FileApi;
pub use error::{ExplorerError, FetchError};
pub use filter::{SearchQuery, filter_tree};
pub use live::LiveEvent;
pub use reconciler::{Reconciler, SessionCell};
pub use recent::RecentFiles;
pub use session::ExplorerState;
pub use tree_store::{Delay, RefreshOutcome, Refresher, TreeStore};
