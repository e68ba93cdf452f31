//! Search input, filter toggles and result counts.
//!
//! Typing updates the visible input immediately; the search term used for
//! filtering settles after a quiet period. Filter changes apply at once.

use std::time::Duration;

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::{MODIFIED_WITHIN_CHOICES, SEARCH_DEBOUNCE_MS};
use crate::models::{self, SearchFilters};
use crate::utils::Debouncer;

stylance::import_crate_style!(css, "src/components/explorer/search_bar.module.css");

/// Boolean search options shown as toggle buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flag {
    CaseSensitive,
    Regex,
    WholeWord,
    ShowHidden,
}

impl Flag {
    const ALL: [Flag; 4] = [Flag::CaseSensitive, Flag::WholeWord, Flag::Regex, Flag::ShowHidden];

    fn slot(self, filters: &mut SearchFilters) -> &mut bool {
        match self {
            Flag::CaseSensitive => &mut filters.case_sensitive,
            Flag::Regex => &mut filters.regex,
            Flag::WholeWord => &mut filters.whole_word,
            Flag::ShowHidden => &mut filters.show_hidden,
        }
    }

    fn is_set(self, filters: &SearchFilters) -> bool {
        match self {
            Flag::CaseSensitive => filters.case_sensitive,
            Flag::Regex => filters.regex,
            Flag::WholeWord => filters.whole_word,
            Flag::ShowHidden => filters.show_hidden,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Flag::CaseSensitive => "Aa",
            Flag::Regex => ".*",
            Flag::WholeWord => "ab",
            Flag::ShowHidden => ".f",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Flag::CaseSensitive => "Match case",
            Flag::Regex => "Use regular expression",
            Flag::WholeWord => "Match whole word",
            Flag::ShowHidden => "Show hidden files",
        }
    }
}

/// Search box with debounced term and filter controls.
#[component]
pub fn SearchBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let term = ctx.search.term;
    let filters = ctx.search.filters;

    let input = RwSignal::new(term.get_untracked());
    let debouncer = StoredValue::new_local(Debouncer::new(SEARCH_DEBOUNCE_MS));
    on_cleanup(move || {
        debouncer.try_with_value(Debouncer::cancel);
    });

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        input.set(value.clone());
        debouncer.with_value(|d| {
            d.schedule(move || {
                let _ = term.try_set(value);
            })
        });
    };

    let on_clear = move |_: leptos::ev::MouseEvent| {
        debouncer.with_value(Debouncer::cancel);
        input.set(String::new());
        term.set(String::new());
    };

    let on_types = move |ev: leptos::ev::Event| {
        let types = SearchFilters::parse_file_types(&event_target_value(&ev));
        filters.update(|f| f.file_types = types);
    };

    let on_modified = move |ev: leptos::ev::Event| {
        let window = event_target_value(&ev).parse::<u64>().ok().map(Duration::from_secs);
        filters.update(|f| f.modified_within = window);
    };

    view! {
        <div class=css::searchBar role="search">
            <div class=css::inputRow>
                <span class=css::searchIcon aria-hidden="true"><Icon icon=ic::SEARCH /></span>
                <input
                    class=css::input
                    type="text"
                    placeholder="Search files"
                    aria-label="Search files"
                    prop:value=move || input.get()
                    on:input=on_input
                />
                <Show when=move || input.with(|v| !v.is_empty())>
                    <button class=css::clear aria-label="Clear search" on:click=on_clear>
                        <Icon icon=ic::CLOSE />
                    </button>
                </Show>
                {Flag::ALL.into_iter().map(|flag| view! { <FlagToggle flag=flag /> }).collect::<Vec<_>>()}
            </div>

            <div class=css::filterRow>
                <input
                    class=css::types
                    type="text"
                    placeholder="Types: rs, toml"
                    aria-label="File types"
                    on:change=on_types
                />
                <select class=css::modified aria-label="Modified within" on:change=on_modified>
                    <option value="">"Any time"</option>
                    {MODIFIED_WITHIN_CHOICES
                        .iter()
                        .map(|(label, secs)| view! { <option value=secs.to_string()>{*label}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </div>
        </div>
    }
}

#[component]
fn FlagToggle(flag: Flag) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let filters = ctx.search.filters;
    let active = Memo::new(move |_| filters.with(|f| flag.is_set(f)));

    let class = move || {
        if active.get() {
            format!("{} {}", css::toggle, css::toggleActive)
        } else {
            css::toggle.to_string()
        }
    };

    view! {
        <button
            class=class
            title=flag.title()
            aria-pressed=move || active.get().to_string()
            on:click=move |_| {
                filters.update(|f| {
                    let slot = flag.slot(f);
                    *slot = !*slot;
                })
            }
        >
            {flag.label()}
        </button>
    }
}

/// Match counts for the active search.
#[component]
pub fn SearchSummary(#[prop(into)] summary: Signal<models::SearchSummary>) -> impl IntoView {
    view! {
        <div class=css::summary role="status">
            {move || summary.get().to_string()}
        </div>
    }
}
