//! Opened files as tabs.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::ExplorerState;
use crate::models::FileRef;

stylance::import_crate_style!(css, "src/components/explorer/tabs.module.css");

#[component]
pub fn OpenTabs() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let session = ctx.session;
    let opened = Memo::new(move |_| session.with(|s| s.opened().to_vec()));

    view! {
        <Show when=move || opened.with(|files| !files.is_empty())>
            <div class=css::tabs role="tablist" aria-label="Open files">
                <For
                    each=move || opened.get()
                    key=|file| file.path.clone()
                    children=move |file| view! { <Tab file=file /> }
                />
                <button class=css::closeAll on:click=move |_| session.update(ExplorerState::close_all)>
                    "Close all"
                </button>
            </div>
        </Show>
    }
}

#[component]
fn Tab(file: FileRef) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let session = ctx.session;

    let path = file.path.clone();
    let is_selected = Signal::derive(move || session.with(|s| s.is_selected(&path)));

    let on_select = {
        let file = file.clone();
        move |_: leptos::ev::MouseEvent| session.update(|s| s.select(file.clone()))
    };

    let on_close = {
        let path = file.path.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.stop_propagation();
            session.update(|s| s.close_opened(&path));
        }
    };

    let class = move || {
        if is_selected.get() {
            format!("{} {}", css::tab, css::tabSelected)
        } else {
            css::tab.to_string()
        }
    };

    view! {
        <div
            class=class
            role="tab"
            title=file.path
            aria-selected=move || is_selected.get().to_string()
            on:click=on_select
        >
            <span class=css::tabIcon aria-hidden="true"><Icon icon=ic::FILE /></span>
            <span class=css::tabName>{file.name}</span>
            <button class=css::tabClose aria-label="Close" on:click=on_close>
                <Icon icon=ic::CLOSE />
            </button>
        </div>
    }
}
