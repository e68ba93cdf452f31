//! File actions on the tree.
//!
//! Actions apply to the last clicked row. New entries are created in the
//! clicked folder, or next to the clicked file. Failures show in a
//! dismissible banner.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::ExplorerState;
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

fn child_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

#[component]
pub fn ActionBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let target = ctx.target;
    let action_error = ctx.action_error;

    let has_target = Signal::derive(move || target.with(Option::is_some));
    let can_rename =
        Signal::derive(move || target.with(|t| t.as_ref().is_some_and(|t| !t.is_folder)));

    let base_dir = move || {
        target.with_untracked(|t| {
            t.as_ref()
                .map(|t| t.parent_dir().to_string())
                .unwrap_or_default()
        })
    };

    let on_new_file = move |_: leptos::ev::MouseEvent| {
        let Some(name) = dom::prompt("New file name", "") else {
            return;
        };
        let path = child_path(&base_dir(), &name);
        ctx.spawn_mutation(move |engine, _| async move {
            engine.reconciler.create_file(&path, &engine.store).await
        });
    };

    let on_new_folder = move |_: leptos::ev::MouseEvent| {
        let Some(name) = dom::prompt("New folder name", "") else {
            return;
        };
        let path = child_path(&base_dir(), &name);
        ctx.spawn_mutation(move |engine, _| async move {
            engine.reconciler.create_folder(&path, &engine.store).await
        });
    };

    let on_rename = move |_: leptos::ev::MouseEvent| {
        let Some(current) = target.get_untracked().filter(|t| !t.is_folder) else {
            return;
        };
        let Some(new_name) = dom::prompt("Rename to", &current.name) else {
            return;
        };
        if new_name == current.name {
            return;
        }
        let new_path = child_path(current.parent_dir(), &new_name);
        target.set(None);
        ctx.spawn_mutation(move |engine, session| async move {
            engine
                .reconciler
                .rename_file(&current.path, &new_path, &session, &engine.store)
                .await
        });
    };

    let on_delete = move |_: leptos::ev::MouseEvent| {
        let Some(current) = target.get_untracked() else {
            return;
        };
        let kind = if current.is_folder { "folder" } else { "file" };
        if !dom::confirm(&format!("Delete {} '{}'?", kind, current.name)) {
            return;
        }
        target.set(None);
        ctx.spawn_mutation(move |engine, session| async move {
            let reconciler = &engine.reconciler;
            if current.is_folder {
                reconciler
                    .delete_folder(&current.path, &session, &engine.store)
                    .await
            } else {
                reconciler
                    .delete_file(&current.path, &session, &engine.store)
                    .await
            }
        });
    };

    let session = ctx.session;
    let on_expand_all = move |_: leptos::ev::MouseEvent| {
        ctx.tree
            .with_untracked(|t| session.update(|s| s.expand_all(&t.nodes)));
    };
    let on_collapse_all =
        move |_: leptos::ev::MouseEvent| session.update(ExplorerState::collapse_all);

    view! {
        <div class=css::actionBar>
            <div class=css::actions role="toolbar" aria-label="File actions">
                <button class=css::actionButton title="New file" on:click=on_new_file>
                    <Icon icon=ic::NEW_FILE />
                </button>
                <button class=css::actionButton title="New folder" on:click=on_new_folder>
                    <Icon icon=ic::NEW_FOLDER />
                </button>
                <button
                    class=css::actionButton
                    title="Rename"
                    disabled=move || !can_rename.get()
                    on:click=on_rename
                >
                    <Icon icon=ic::EDIT />
                </button>
                <button
                    class=css::actionButton
                    title="Delete"
                    disabled=move || !has_target.get()
                    on:click=on_delete
                >
                    <Icon icon=ic::DELETE />
                </button>
                <button class=css::actionButton title="Refresh" on:click=move |_| ctx.refresh()>
                    <Icon icon=ic::REFRESH />
                </button>
                <button class=css::actionButton title="Expand all" on:click=on_expand_all>
                    <Icon icon=ic::EXPAND_ALL />
                </button>
                <button class=css::actionButton title="Collapse all" on:click=on_collapse_all>
                    <Icon icon=ic::COLLAPSE_ALL />
                </button>
            </div>

            {move || action_error.get().map(|message| view! {
                <div class=css::actionError role="alert">
                    <span>{message}</span>
                    <button
                        class=css::dismiss
                        aria-label="Dismiss"
                        on:click=move |_| action_error.set(None)
                    >
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_path() {
        assert_eq!(child_path("", "a.rs"), "a.rs");
        assert_eq!(child_path("src/util", "a.rs"), "src/util/a.rs");
    }
}
