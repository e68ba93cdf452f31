//! Main explorer component.
//!
//! Owns the engine lifecycle for its mount: mirrors the tree store into
//! the context signals, loads the tree, subscribes to the live channel and
//! tears everything down on cleanup.
//!
//! ## Layout
//!
//! Header and actions on top, then search, status and the tree. Opened
//! files and recent files sit below the tree.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::{ActionBar, FileTree, OpenTabs, RecentList, SearchBar, SearchSummary, TreeStatus};
use crate::app::AppContext;
use crate::config::APP_NAME;
use crate::core::{SearchQuery, aggregate, filter_tree};
use crate::utils::{LiveSocket, storage};

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

/// File explorer view component.
#[component]
pub fn Explorer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let tree = ctx.tree;
    let session = ctx.session;
    let search = ctx.search;

    let socket = ctx.engine().map(|engine| {
        engine.store.set_observer(move |state| {
            let _ = tree.try_set(state.clone());
        });

        let loader = Rc::clone(&engine);
        spawn_local(async move {
            if let Err(e) = loader.store.load().await {
                log::error!("Initial tree load failed: {}", e);
            }
        });

        let live = Rc::clone(&engine);
        LiveSocket::connect(engine.config.socket_url(), move |event| {
            let engine = Rc::clone(&live);
            spawn_local(async move {
                engine.store.on_live_event(event).await;
            });
        })
    });
    let socket = StoredValue::new_local(socket);

    on_cleanup(move || {
        socket.try_with_value(|socket| {
            if let Some(socket) = socket {
                socket.close();
            }
        });
        if let Some(engine) = ctx.engine() {
            engine.store.teardown();
        }
    });

    // Drop expansion entries of folders gone after a refresh
    Effect::new(move |_| {
        tree.with(|state| {
            if state.loading {
                return;
            }
            session.maybe_update(|s| {
                let before = s.expanded().len();
                s.retain_existing(&state.nodes);
                s.expanded().len() != before
            });
        });
    });

    // Persist recent files whenever they change
    let recent = Memo::new(move |_| session.with(|s| s.recent().clone()));
    Effect::new(move |_| {
        if let Err(e) = recent.get().save(&storage::LocalStorage) {
            log::warn!("Failed to save recent files: {}", e);
        }
    });

    let query = Memo::new(move |_| SearchQuery::new(search.term.get(), search.filters.get()));
    let searching = Signal::derive(move || query.with(SearchQuery::is_active));
    let filtered = Memo::new(move |_| query.with(|q| tree.with(|t| filter_tree(&t.nodes, q))));
    let summary = Memo::new(move |_| filtered.with(|nodes| aggregate(nodes)));

    view! {
        <div class=css::explorer>
            <header class=css::header>
                <span class=css::title>{APP_NAME}</span>
            </header>

            <ActionBar />
            <SearchBar />

            <Show when=move || searching.get()>
                <SearchSummary summary=summary />
            </Show>

            <TreeStatus />

            <div class=css::body>
                <FileTree nodes=filtered searching=searching />
            </div>

            <OpenTabs />
            <RecentList />
        </div>
    }
}
