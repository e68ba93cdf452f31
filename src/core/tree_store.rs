//! Canonical project tree with loading, retry and refresh coalescing.
//!
//! The store is single-threaded: it lives on the UI event loop and is
//! shared by `Rc`. Only one fetch cycle runs at a time; a refresh requested
//! while a cycle is in flight is coalesced into it.
//!
//! # Retry policy
//!
//! Up to [`MAX_FETCH_ATTEMPTS`] attempts, waiting `attempt * RETRY_BACKOFF_MS`
//! between them. Exhausted retries leave a terminal error that stays until
//! the next explicit [`TreeStore::refresh`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::{MAX_FETCH_ATTEMPTS, RETRY_BACKOFF_MS};
use crate::core::api::FileApi;
use crate::core::error::{ExplorerError, FetchError};
use crate::core::live::LiveEvent;
use crate::models::{FileNode, RetryStatus, TreeState};

const CONNECTION_LOST: &str = "Connection lost";

// =============================================================================
// Seams
// =============================================================================

/// Asynchronous wait used between fetch attempts.
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn delay(&self, ms: u32);
}

/// Something that can re-fetch the tree (implemented by [`TreeStore`]).
#[allow(async_fn_in_trait)]
pub trait Refresher {
    async fn refresh(&self) -> RefreshOutcome;
}

/// Result of a refresh request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The tree was fetched and replaced
    Completed,
    /// Another fetch was already in flight; nothing was sent
    Coalesced,
    /// All attempts failed; the state holds the error
    Failed(FetchError),
    /// The store was torn down before the response arrived
    Discarded,
}

/// Observer notified with a snapshot after every state change.
type Observer = Box<dyn Fn(&TreeState)>;

/// Resets the in-flight flag even if the fetch future is dropped.
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

// =============================================================================
// TreeStore
// =============================================================================

/// Owner of the canonical tree.
pub struct TreeStore<A: FileApi, D: Delay> {
    api: Rc<A>,
    delay: D,
    state: RefCell<TreeState>,
    in_flight: Cell<bool>,
    disposed: Cell<bool>,
    observer: RefCell<Option<Observer>>,
}

impl<A: FileApi, D: Delay> TreeStore<A, D> {
    pub fn new(api: Rc<A>, delay: D) -> Self {
        Self {
            api,
            delay,
            state: RefCell::new(TreeState::default()),
            in_flight: Cell::new(false),
            disposed: Cell::new(false),
            observer: RefCell::new(None),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> TreeState {
        self.state.borrow().clone()
    }

    /// Current canonical tree.
    pub fn nodes(&self) -> Vec<FileNode> {
        self.state.borrow().nodes.clone()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.get()
    }

    /// Register the observer that mirrors state into the view.
    pub fn set_observer(&self, observer: impl Fn(&TreeState) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    /// Detach from the owning view. Later responses are discarded.
    pub fn teardown(&self) {
        log::debug!("Tree store torn down");
        self.disposed.set(true);
        self.observer.borrow_mut().take();
    }

    /// Fetch the tree, retrying per the store's policy.
    ///
    /// If a fetch is already in flight, returns the tree as it currently
    /// stands instead of issuing another request.
    pub async fn load(&self) -> Result<Vec<FileNode>, ExplorerError> {
        match self.run_cycle().await {
            RefreshOutcome::Completed | RefreshOutcome::Coalesced => Ok(self.nodes()),
            RefreshOutcome::Failed(e) => Err(ExplorerError::Fetch(e)),
            RefreshOutcome::Discarded => Err(ExplorerError::Disposed),
        }
    }

    /// React to a live channel notification.
    ///
    /// Returns the refresh outcome when the event triggered one.
    pub async fn on_live_event(&self, event: LiveEvent) -> Option<RefreshOutcome> {
        match event {
            LiveEvent::FileRefresh => Some(self.run_cycle().await),
            LiveEvent::Connected => {
                let was_lost = self.state.borrow().connection_lost;
                self.update(|s| {
                    s.connection_lost = false;
                    // A fetch failure written while disconnected stays
                    if s.error.as_deref().is_some_and(|e| e.starts_with(CONNECTION_LOST)) {
                        s.error = None;
                    }
                });
                if was_lost {
                    log::info!("Live channel reconnected");
                    Some(self.run_cycle().await)
                } else {
                    None
                }
            }
            LiveEvent::ConnectError(message) => {
                log::warn!("Live channel connection error: {}", message);
                self.update(|s| {
                    s.connection_lost = true;
                    s.error = Some(format!("{}: {}", CONNECTION_LOST, message));
                });
                None
            }
            LiveEvent::Disconnected => {
                self.update(|s| {
                    s.connection_lost = true;
                    s.error = Some(format!("{}: disconnected", CONNECTION_LOST));
                });
                None
            }
        }
    }

    // =========================================================================
    // Fetch Cycle
    // =========================================================================

    async fn run_cycle(&self) -> RefreshOutcome {
        if self.disposed.get() {
            return RefreshOutcome::Discarded;
        }
        if self.in_flight.replace(true) {
            log::debug!("Refresh coalesced into in-flight fetch");
            return RefreshOutcome::Coalesced;
        }
        let _guard = InFlight(&self.in_flight);

        self.update(|s| {
            s.loading = true;
            s.retry = None;
            if !s.connection_lost {
                s.error = None;
            }
        });

        let mut attempt = 1;
        loop {
            let result = self.api.fetch_tree().await;
            if self.disposed.get() {
                log::debug!("Discarding tree response after teardown");
                return RefreshOutcome::Discarded;
            }

            match result {
                Ok(nodes) => {
                    log::debug!("Loaded tree with {} root entries", nodes.len());
                    self.update(|s| {
                        s.nodes = nodes;
                        s.loading = false;
                        s.retry = None;
                    });
                    return RefreshOutcome::Completed;
                }
                Err(e) if attempt < MAX_FETCH_ATTEMPTS => {
                    log::warn!(
                        "Tree fetch attempt {}/{} failed: {}",
                        attempt,
                        MAX_FETCH_ATTEMPTS,
                        e
                    );
                    self.update(|s| {
                        s.retry = Some(RetryStatus {
                            attempt: attempt + 1,
                            max_attempts: MAX_FETCH_ATTEMPTS,
                        });
                    });
                    self.delay.delay(RETRY_BACKOFF_MS * attempt).await;
                    if self.disposed.get() {
                        return RefreshOutcome::Discarded;
                    }
                    attempt += 1;
                }
                Err(e) => {
                    log::error!("Tree fetch failed after {} attempts: {}", attempt, e);
                    let message = ExplorerError::Fetch(e.clone()).to_string();
                    self.update(|s| {
                        s.loading = false;
                        s.retry = None;
                        s.error = Some(message);
                    });
                    return RefreshOutcome::Failed(e);
                }
            }
        }
    }

    /// Mutate state and notify the observer. No-op once torn down.
    fn update(&self, f: impl FnOnce(&mut TreeState)) {
        if self.disposed.get() {
            return;
        }
        let snapshot = {
            let mut state = self.state.borrow_mut();
            f(&mut state);
            state.clone()
        };
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer(&snapshot);
        }
    }
}

impl<A: FileApi, D: Delay> Refresher for TreeStore<A, D> {
    /// Re-fetch the tree unless a fetch is already in flight.
    async fn refresh(&self) -> RefreshOutcome {
        self.run_cycle().await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Mock API and delay shared by engine tests.

    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use super::*;

    /// Scripted backend recording every call.
    #[derive(Default)]
    pub struct MockApi {
        pub tree_responses: RefCell<VecDeque<Result<Vec<FileNode>, FetchError>>>,
        pub mutation_response: RefCell<Option<FetchError>>,
        pub fetch_calls: Cell<usize>,
        pub mutations: RefCell<Vec<String>>,
    }

    impl MockApi {
        pub fn with_trees(
            responses: impl IntoIterator<Item = Result<Vec<FileNode>, FetchError>>,
        ) -> Self {
            Self {
                tree_responses: RefCell::new(responses.into_iter().collect()),
                ..Self::default()
            }
        }

        pub fn fail_mutations(&self, err: FetchError) {
            *self.mutation_response.borrow_mut() = Some(err);
        }

        fn mutation(&self, call: String) -> Result<(), FetchError> {
            self.mutations.borrow_mut().push(call);
            match self.mutation_response.borrow().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    impl FileApi for MockApi {
        async fn fetch_tree(&self) -> Result<Vec<FileNode>, FetchError> {
            self.fetch_calls.set(self.fetch_calls.get() + 1);
            // Suspend like a real request so concurrent callers interleave
            tokio::task::yield_now().await;
            self.tree_responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn create_file(&self, path: &str) -> Result<(), FetchError> {
            self.mutation(format!("create_file {}", path))
        }

        async fn create_folder(&self, path: &str) -> Result<(), FetchError> {
            self.mutation(format!("create_folder {}", path))
        }

        async fn delete_file(&self, path: &str) -> Result<(), FetchError> {
            self.mutation(format!("delete_file {}", path))
        }

        async fn delete_folder(&self, path: &str) -> Result<(), FetchError> {
            self.mutation(format!("delete_folder {}", path))
        }

        async fn rename_file(&self, old_path: &str, new_path: &str) -> Result<(), FetchError> {
            self.mutation(format!("rename_file {} -> {}", old_path, new_path))
        }
    }

    /// Delay that records requested waits and returns immediately.
    #[derive(Default)]
    pub struct RecordingDelay {
        pub waits: RefCell<Vec<u32>>,
    }

    impl Delay for RecordingDelay {
        async fn delay(&self, ms: u32) {
            self.waits.borrow_mut().push(ms);
        }
    }

    pub fn store_with(api: MockApi) -> (Rc<MockApi>, TreeStore<MockApi, RecordingDelay>) {
        let api = Rc::new(api);
        let store = TreeStore::new(Rc::clone(&api), RecordingDelay::default());
        (api, store)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    fn tree() -> Vec<FileNode> {
        vec![FileNode::folder(
            "src",
            "src",
            vec![FileNode::file("a.js", "src/a.js")],
        )]
    }

    fn network_error() -> FetchError {
        FetchError::NetworkError("connection refused".to_string())
    }

    // =========================================================================
    // Load and Retry Tests
    // =========================================================================

    #[tokio::test]
    async fn test_load_success() {
        let (api, store) = store_with(MockApi::with_trees([Ok(tree())]));
        assert_eq!(store.load().await, Ok(tree()));

        let state = store.state();
        assert_eq!(state.nodes, tree());
        assert!(!state.loading);
        assert_eq!(state.error, None);
        assert_eq!(api.fetch_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_retries_with_linear_backoff() {
        let (api, store) = store_with(MockApi::with_trees([
            Err(network_error()),
            Err(FetchError::JsonParseError("expected value".to_string())),
            Ok(tree()),
        ]));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.set_observer(move |state| {
            if let Some(retry) = state.retry {
                sink.borrow_mut().push(retry.to_string());
            }
        });

        assert_eq!(store.refresh().await, RefreshOutcome::Completed);
        assert_eq!(api.fetch_calls.get(), 3);
        assert_eq!(*store.delay.waits.borrow(), vec![1000, 2000]);
        assert_eq!(
            *seen.borrow(),
            vec!["Retrying… (2/3)".to_string(), "Retrying… (3/3)".to_string()]
        );
        assert_eq!(store.state().retry, None);
        assert_eq!(store.state().nodes, tree());
    }

    #[tokio::test]
    async fn test_exhausted_retries_leave_terminal_error() {
        let (api, store) = store_with(MockApi::with_trees([
            Err(network_error()),
            Err(network_error()),
            Err(FetchError::HttpError(503)),
            Ok(tree()),
        ]));

        let result = store.load().await;
        assert_eq!(result, Err(ExplorerError::Fetch(FetchError::HttpError(503))));
        assert_eq!(api.fetch_calls.get(), 3);

        let state = store.state();
        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to load files: HTTP error: 503")
        );

        // Manual retry re-enters the cycle
        assert_eq!(store.refresh().await, RefreshOutcome::Completed);
        assert_eq!(store.state().error, None);
        assert_eq!(api.fetch_calls.get(), 4);
    }

    // =========================================================================
    // Coalescing Tests
    // =========================================================================

    #[tokio::test]
    async fn test_concurrent_refreshes_issue_one_fetch() {
        let (api, store) = store_with(MockApi::with_trees([Ok(tree()), Ok(tree())]));

        let (first, second) = tokio::join!(store.refresh(), store.refresh());
        assert_eq!(first, RefreshOutcome::Completed);
        assert_eq!(second, RefreshOutcome::Coalesced);
        assert_eq!(api.fetch_calls.get(), 1);
        assert!(!store.is_fetching());
    }

    #[tokio::test]
    async fn test_live_refresh_during_manual_refresh_is_coalesced() {
        let (api, store) = store_with(MockApi::with_trees([Ok(tree())]));

        let (manual, live) = tokio::join!(
            store.refresh(),
            store.on_live_event(LiveEvent::FileRefresh)
        );
        assert_eq!(manual, RefreshOutcome::Completed);
        assert_eq!(live, Some(RefreshOutcome::Coalesced));
        assert_eq!(api.fetch_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_live_refresh_when_idle_fetches() {
        let (api, store) = store_with(MockApi::with_trees([Ok(tree())]));
        assert_eq!(
            store.on_live_event(LiveEvent::FileRefresh).await,
            Some(RefreshOutcome::Completed)
        );
        assert_eq!(api.fetch_calls.get(), 1);
    }

    // =========================================================================
    // Teardown Tests
    // =========================================================================

    #[tokio::test]
    async fn test_response_after_teardown_is_discarded() {
        let (_api, store) = store_with(MockApi::with_trees([Ok(tree())]));
        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        store.set_observer(move |_| counter.set(counter.get() + 1));

        let (outcome, ()) = tokio::join!(store.refresh(), async { store.teardown() });
        assert_eq!(outcome, RefreshOutcome::Discarded);
        assert!(store.nodes().is_empty());
        // Only the "loading" notification before teardown
        assert_eq!(notified.get(), 1);
        assert!(!store.is_fetching());
    }

    #[tokio::test]
    async fn test_refresh_after_teardown_does_nothing() {
        let (api, store) = store_with(MockApi::with_trees([Ok(tree())]));
        store.teardown();
        assert_eq!(store.refresh().await, RefreshOutcome::Discarded);
        assert_eq!(store.load().await, Err(ExplorerError::Disposed));
        assert_eq!(api.fetch_calls.get(), 0);
    }

    // =========================================================================
    // Connection Tests
    // =========================================================================

    #[tokio::test]
    async fn test_connect_error_until_reconnected() {
        let (api, store) = store_with(MockApi::with_trees([Ok(tree()), Ok(tree())]));
        store.load().await.unwrap();

        let outcome = store
            .on_live_event(LiveEvent::ConnectError("xhr poll error".to_string()))
            .await;
        assert_eq!(outcome, None);
        let state = store.state();
        assert!(state.connection_lost);
        assert_eq!(state.error.as_deref(), Some("Connection lost: xhr poll error"));

        // A successful refresh does not hide a lost connection
        store.refresh().await;
        assert!(store.state().error.is_some());

        let outcome = store.on_live_event(LiveEvent::Connected).await;
        assert_eq!(outcome, Some(RefreshOutcome::Completed));
        assert!(!store.state().connection_lost);
        assert_eq!(store.state().error, None);
        assert_eq!(api.fetch_calls.get(), 3);
    }

    #[tokio::test]
    async fn test_reconnect_keeps_fetch_failure_from_while_disconnected() {
        let (api, store) = store_with(MockApi::with_trees([
            Ok(tree()),
            Err(FetchError::HttpError(503)),
            Err(FetchError::HttpError(503)),
            Err(FetchError::HttpError(503)),
            Err(FetchError::HttpError(503)),
            Err(FetchError::HttpError(503)),
            Err(FetchError::HttpError(503)),
        ]));
        store.load().await.unwrap();
        store.on_live_event(LiveEvent::Disconnected).await;
        store.refresh().await;
        let failed = Some("Failed to load files: HTTP error: 503".to_string());
        assert_eq!(store.state().error, failed);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.set_observer(move |state| sink.borrow_mut().push(state.clone()));

        let outcome = store.on_live_event(LiveEvent::Connected).await;
        assert_eq!(outcome, Some(RefreshOutcome::Failed(FetchError::HttpError(503))));
        assert_eq!(api.fetch_calls.get(), 7);

        // The reconnect itself leaves the fetch failure in place
        let reconnected = &seen.borrow()[0];
        assert!(!reconnected.connection_lost);
        assert_eq!(reconnected.error, failed);
        assert_eq!(store.state().error, failed);
    }

    #[tokio::test]
    async fn test_connected_without_prior_loss_does_not_refetch() {
        let (api, store) = store_with(MockApi::default());
        assert_eq!(store.on_live_event(LiveEvent::Connected).await, None);
        assert_eq!(api.fetch_calls.get(), 0);
    }
}
