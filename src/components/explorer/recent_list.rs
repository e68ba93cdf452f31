//! Recently selected files.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::FileRef;

stylance::import_crate_style!(css, "src/components/explorer/tabs.module.css");

#[component]
pub fn RecentList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let session = ctx.session;
    let recent = Memo::new(move |_| session.with(|s| s.recent().entries().to_vec()));

    view! {
        <Show when=move || session.with(|s| !s.recent().is_empty())>
            <section class=css::recent aria-label="Recent files">
                <h3 class=css::sectionTitle>
                    <Icon icon=ic::RECENT />
                    "Recent"
                </h3>
                <For
                    each=move || recent.get()
                    key=|file| file.path.clone()
                    children=move |file: FileRef| {
                        let title = file.path.clone();
                        let name = file.name.clone();
                        view! {
                            <button
                                class=css::recentItem
                                title=title
                                on:click=move |_| session.update(|s| s.select(file.clone()))
                            >
                                {name}
                            </button>
                        }
                    }
                />
            </section>
        </Show>
    }
}
