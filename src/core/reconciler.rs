//! Create, delete and rename with local state reconciliation.
//!
//! Each operation calls the backend once. On success the explorer session
//! is reconciled first and the tree store refreshed after, so the view
//! never shows a deleted file as selected while the new tree loads. On
//! failure nothing local changes.
//!
//! Paths are normalized only for the request. The session is reconciled
//! with the paths as given, which are the tree's own node paths.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::api::{
    FileApi, is_valid_name, leaf_name, normalize_delete_path, strip_leading_slashes,
};
use crate::core::error::{ExplorerError, FetchError};
use crate::core::session::ExplorerState;
use crate::core::tree_store::Refresher;
use crate::models::FileRef;

/// Shared, mutable explorer session.
///
/// Implemented for `RefCell<ExplorerState>` and, in the view layer, for the
/// reactive signal holding the session.
pub trait SessionCell {
    fn update_session(&self, f: impl FnOnce(&mut ExplorerState));
}

impl SessionCell for RefCell<ExplorerState> {
    fn update_session(&self, f: impl FnOnce(&mut ExplorerState)) {
        f(&mut self.borrow_mut());
    }
}

/// Mutation front-end over a [`FileApi`].
pub struct Reconciler<A: FileApi> {
    api: Rc<A>,
}

impl<A: FileApi> Reconciler<A> {
    pub fn new(api: Rc<A>) -> Self {
        Self { api }
    }

    pub async fn create_file(
        &self,
        path: &str,
        store: &impl Refresher,
    ) -> Result<(), ExplorerError> {
        let path = strip_leading_slashes(path);
        self.api.create_file(path).await.map_err(mutation_error)?;
        log::info!("Created file {}", path);
        store.refresh().await;
        Ok(())
    }

    pub async fn create_folder(
        &self,
        path: &str,
        store: &impl Refresher,
    ) -> Result<(), ExplorerError> {
        let path = strip_leading_slashes(path);
        self.api.create_folder(path).await.map_err(mutation_error)?;
        log::info!("Created folder {}", path);
        store.refresh().await;
        Ok(())
    }

    pub async fn delete_file(
        &self,
        path: &str,
        session: &impl SessionCell,
        store: &impl Refresher,
    ) -> Result<(), ExplorerError> {
        let target = normalize_delete_path(path);
        self.api.delete_file(target).await.map_err(mutation_error)?;
        log::info!("Deleted file {}", target);
        session.update_session(|s| s.forget_path(path));
        store.refresh().await;
        Ok(())
    }

    pub async fn delete_folder(
        &self,
        path: &str,
        session: &impl SessionCell,
        store: &impl Refresher,
    ) -> Result<(), ExplorerError> {
        let target = normalize_delete_path(path);
        self.api.delete_folder(target).await.map_err(mutation_error)?;
        log::info!("Deleted folder {}", target);
        session.update_session(|s| s.forget_path(path));
        store.refresh().await;
        Ok(())
    }

    /// Rename a file. The new leaf name is validated before any request.
    pub async fn rename_file(
        &self,
        old_path: &str,
        new_path: &str,
        session: &impl SessionCell,
        store: &impl Refresher,
    ) -> Result<(), ExplorerError> {
        let name = leaf_name(new_path);
        if !is_valid_name(name) {
            return Err(ExplorerError::InvalidName(name.to_string()));
        }

        let (from, to) = (strip_leading_slashes(old_path), strip_leading_slashes(new_path));
        self.api.rename_file(from, to).await.map_err(mutation_error)?;
        log::info!("Renamed {} to {}", from, to);
        session.update_session(|s| s.rename_path(old_path, FileRef::new(name, new_path)));
        store.refresh().await;
        Ok(())
    }
}

fn mutation_error(err: FetchError) -> ExplorerError {
    log::warn!("Mutation failed: {}", err);
    ExplorerError::Mutation(err.user_message())
}
