//! Recursive file tree.
//!
//! Folders toggle expansion on click; files are selected (and opened).
//! While a search is active every folder of the filtered tree is shown
//! expanded so matches are visible.

use icondata::Icon as IconData;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{ActionTarget, AppContext};
use crate::components::icons as ic;
use crate::models::{FileNode, FileRef};

stylance::import_crate_style!(css, "src/components/explorer/file_tree.module.css");

#[component]
pub fn FileTree(
    #[prop(into)] nodes: Signal<Vec<FileNode>>,
    #[prop(into)] searching: Signal<bool>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class=css::tree role="tree" aria-label="Project files">
            {move || {
                nodes.with(|nodes| {
                    nodes
                        .iter()
                        .map(|node| tree_row(ctx, node.clone(), 0, searching))
                        .collect::<Vec<_>>()
                })
            }}
            <Show when=move || searching.get() && nodes.with(Vec::is_empty)>
                <div class=css::empty>"No matching files"</div>
            </Show>
        </div>
    }
}

/// One row and, for expanded folders, its subtree.
fn tree_row(ctx: AppContext, node: FileNode, depth: usize, searching: Signal<bool>) -> AnyView {
    let name = node.name().to_string();
    let path = node.path().to_string();
    let indent = format!("padding-left: {:.2}rem", 0.5 + depth as f32 * 0.9);
    let name_class = if node.is_hidden() {
        format!("{} {}", css::name, css::nameHidden)
    } else {
        css::name.to_string()
    };

    let targeted = {
        let path = path.clone();
        Signal::derive(move || {
            ctx.target
                .with(|t| t.as_ref().is_some_and(|t| t.path == path))
        })
    };

    match node {
        FileNode::Folder { children, .. } => {
            let session = ctx.session;
            let expanded = {
                let path = path.clone();
                Signal::derive(move || searching.get() || session.with(|s| s.is_expanded(&path)))
            };

            let on_click = {
                let name = name.clone();
                let path = path.clone();
                move |_: leptos::ev::MouseEvent| {
                    ctx.target.set(Some(ActionTarget {
                        name: name.clone(),
                        path: path.clone(),
                        is_folder: true,
                    }));
                    ctx.tree.with_untracked(|t| {
                        session.update(|s| {
                            s.toggle_expand(&t.nodes, &path);
                        })
                    });
                }
            };

            let row_class = move || row_class(false, targeted.get());
            let chevron = move || -> IconData {
                if expanded.get() { ic::CHEVRON_DOWN } else { ic::CHEVRON_RIGHT }
            };
            let folder_icon = move || -> IconData {
                if expanded.get() { ic::FOLDER_OPEN } else { ic::FOLDER }
            };

            view! {
                <div role="treeitem" aria-expanded=move || expanded.get().to_string()>
                    <div class=row_class style=indent title=path on:click=on_click>
                        <span class=css::chevron aria-hidden="true">
                            {move || view! { <Icon icon=chevron() /> }}
                        </span>
                        <span class=css::icon aria-hidden="true">
                            {move || view! { <Icon icon=folder_icon() /> }}
                        </span>
                        <span class=name_class>{name}</span>
                    </div>
                    {move || {
                        expanded.get().then(|| {
                            children
                                .iter()
                                .map(|child| tree_row(ctx, child.clone(), depth + 1, searching))
                                .collect::<Vec<_>>()
                        })
                    }}
                </div>
            }
            .into_any()
        }
        FileNode::File { .. } => {
            let session = ctx.session;
            let selected = {
                let path = path.clone();
                Signal::derive(move || session.with(|s| s.is_selected(&path)))
            };

            let on_click = {
                let name = name.clone();
                let path = path.clone();
                move |_: leptos::ev::MouseEvent| {
                    ctx.target.set(Some(ActionTarget {
                        name: name.clone(),
                        path: path.clone(),
                        is_folder: false,
                    }));
                    session.update(|s| s.select(FileRef::new(name.clone(), path.clone())));
                }
            };

            let row_class = move || row_class(selected.get(), targeted.get());

            view! {
                <div
                    class=row_class
                    style=indent
                    title=path
                    role="treeitem"
                    aria-selected=move || selected.get().to_string()
                    on:click=on_click
                >
                    <span class=css::chevron aria-hidden="true"></span>
                    <span class=css::icon aria-hidden="true"><Icon icon=ic::FILE /></span>
                    <span class=name_class>{name}</span>
                </div>
            }
            .into_any()
        }
    }
}

fn row_class(selected: bool, targeted: bool) -> String {
    let mut class = css::row.to_string();
    if selected {
        class = format!("{} {}", class, css::rowSelected);
    }
    if targeted {
        class = format!("{} {}", class, css::rowTargeted);
    }
    class
}
