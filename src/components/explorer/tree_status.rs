//! Loading, retry and error state of the tree.

use leptos::prelude::*;

use crate::app::AppContext;

stylance::import_crate_style!(css, "src/components/explorer/tree_status.module.css");

/// Spinner while loading, retry progress, and a terminal error with a
/// Retry button.
#[component]
pub fn TreeStatus() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let tree = ctx.tree;

    let loading = Memo::new(move |_| tree.with(|t| t.loading && t.retry.is_none()));
    let retry = Memo::new(move |_| tree.with(|t| t.retry));
    let error = Memo::new(move |_| {
        tree.with(|t| if t.retry.is_some() { None } else { t.error.clone() })
    });

    view! {
        <div class=css::status role="status">
            <Show when=move || loading.get()>
                <div class=css::loading>
                    <span class=css::spinner aria-hidden="true"></span>
                    "Loading files…"
                </div>
            </Show>

            {move || retry.get().map(|status| view! {
                <div class=css::loading>
                    <span class=css::spinner aria-hidden="true"></span>
                    {status.to_string()}
                </div>
            })}

            {move || error.get().map(|message| view! {
                <div class=css::error role="alert">
                    <span class=css::message>{message}</span>
                    <button
                        class=css::retry
                        disabled=move || tree.with(|t| t.loading)
                        on:click=move |_| ctx.refresh()
                    >
                        "Retry"
                    </button>
                </div>
            })}
        </div>
    }
}
