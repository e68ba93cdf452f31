//! Root application module.
//!
//! Contains the main App component, AppContext definition, the engine
//! handles shared by the explorer components, and application-level setup
//! logic following Leptos conventions.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::explorer::Explorer;
use crate::config::ApiConfig;
use crate::core::{
    ExplorerError, ExplorerState, RecentFiles, Reconciler, Refresher, SessionCell, TreeStore,
};
use crate::models::{SearchFilters, TreeState};
use crate::utils::storage;
use crate::utils::{BrowserDelay, HttpFileApi};

// ============================================================================
// Engine
// ============================================================================

/// Tree store bound to the browser backend and timers.
pub type FileTreeStore = TreeStore<HttpFileApi, BrowserDelay>;

/// Non-reactive engine handles, shared by `Rc` on the UI thread.
pub struct Engine {
    pub store: FileTreeStore,
    pub reconciler: Reconciler<HttpFileApi>,
    pub config: ApiConfig,
}

impl Engine {
    pub fn new(config: ApiConfig) -> Self {
        let api = Rc::new(HttpFileApi::new(config.clone()));
        Self {
            store: TreeStore::new(Rc::clone(&api), BrowserDelay),
            reconciler: Reconciler::new(api),
            config,
        }
    }
}

impl SessionCell for RwSignal<ExplorerState> {
    fn update_session(&self, f: impl FnOnce(&mut ExplorerState)) {
        self.update(f);
    }
}

// ============================================================================
// SearchState
// ============================================================================

/// Settled search input. `term` changes only after the debounce window.
#[derive(Clone, Copy)]
pub struct SearchState {
    pub term: RwSignal<String>,
    pub filters: RwSignal<SearchFilters>,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            term: RwSignal::new(String::new()),
            filters: RwSignal::new(SearchFilters::default()),
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Row the action bar operates on (the last clicked entry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionTarget {
    pub name: String,
    pub path: String,
    pub is_folder: bool,
}

impl ActionTarget {
    /// Folder new entries are created in.
    pub fn parent_dir(&self) -> &str {
        if self.is_folder {
            &self.path
        } else {
            self.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
        }
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed from any child
/// component with `use_context::<AppContext>()`.
///
/// # Architecture
///
/// - **Tree**: mirror of the tree store state, written by its observer
/// - **Session**: selection, expansion, opened and recent files
/// - **Search**: debounced term and filters
/// - **Engine**: store and reconciler, kept as a local (non-`Send`) value
#[derive(Clone, Copy)]
pub struct AppContext {
    pub tree: RwSignal<TreeState>,
    pub session: RwSignal<ExplorerState>,
    pub search: SearchState,
    pub target: RwSignal<Option<ActionTarget>>,
    /// Last create/delete/rename failure, shown until dismissed.
    pub action_error: RwSignal<Option<String>>,
    engine: StoredValue<Rc<Engine>, LocalStorage>,
}

impl AppContext {
    /// Creates the context against the configured backend.
    ///
    /// Recent files are restored from localStorage.
    pub fn new() -> Self {
        let recent = RecentFiles::load(&storage::LocalStorage);
        Self {
            tree: RwSignal::new(TreeState::default()),
            session: RwSignal::new(ExplorerState::with_recent(recent)),
            search: SearchState::new(),
            target: RwSignal::new(None),
            action_error: RwSignal::new(None),
            engine: StoredValue::new_local(Rc::new(Engine::new(ApiConfig::resolve()))),
        }
    }

    /// Engine handles, or `None` once the owner was disposed.
    pub fn engine(&self) -> Option<Rc<Engine>> {
        self.engine.try_get_value()
    }

    /// Ask the store for a fresh tree (coalesced with any fetch in flight).
    pub fn refresh(&self) {
        if let Some(engine) = self.engine() {
            spawn_local(async move {
                engine.store.refresh().await;
            });
        }
    }

    /// Run a reconciler call and surface its failure in the action banner.
    pub fn spawn_mutation<F, Fut>(&self, mutation: F)
    where
        F: FnOnce(Rc<Engine>, RwSignal<ExplorerState>) -> Fut + 'static,
        Fut: Future<Output = Result<(), ExplorerError>> + 'static,
    {
        let Some(engine) = self.engine() else {
            return;
        };
        let session = self.session;
        let action_error = self.action_error;
        spawn_local(async move {
            let message = mutation(engine, session).await.err().map(|e| e.to_string());
            let _ = action_error.try_set(message);
        });
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Wraps the app in an ErrorBoundary for graceful error handling
/// - Renders the Explorer
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div style="
                    display: flex;
                    flex-direction: column;
                    align-items: center;
                    justify-content: center;
                    height: 100vh;
                    padding: 2rem;
                    background: #1e1e1e;
                    color: #d4d4d4;
                    font-family: system-ui, sans-serif;
                ">
                    <h1 style="color: #f48771; margin-bottom: 1rem;">
                        "Something went wrong"
                    </h1>
                    <ul style="color: #f48771; font-size: 0.9rem;">
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button
                        on:click=move |_| {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().reload();
                            }
                        }
                        style="
                            background: #0e639c;
                            color: white;
                            border: none;
                            padding: 0.5rem 1.5rem;
                            border-radius: 4px;
                            cursor: pointer;
                        "
                    >
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <Explorer />
        </ErrorBoundary>
    }
}
