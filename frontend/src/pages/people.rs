use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys;
use wasm_bindgen::JsCast;

use directory_core::dropdown::DropdownState;
use directory_core::links;
use directory_core::{
    Person, PersonFilter, SortOrder, filter_people, highlight_segments, sort_people, tokenize,
};

use crate::types::{DirectoryData, load_directory};

const SEARCH_INPUT_ID: &str = "people-search";

// ── DOM helpers ──────────────────────────────────────────────────────────

fn search_input() -> Option<web_sys::HtmlInputElement> {
    document()
        .get_element_by_id(SEARCH_INPUT_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
}

fn blur_search_input() {
    if let Some(input) = search_input() {
        let _ = input.blur();
    }
}

fn scroll_option_into_view(idx: Option<usize>) {
    if let Some(idx) = idx
        && let Some(el) = document().get_element_by_id(&format!("search-option-{idx}"))
    {
        el.scroll_into_view_with_bool(false);
    }
}

// ── Page ─────────────────────────────────────────────────────────────────

#[component]
pub fn PeoplePage() -> impl IntoView {
    let data: RwSignal<Option<DirectoryData>> = RwSignal::new(None);
    let query = RwSignal::new(String::new());
    let filter = RwSignal::new(PersonFilter::All);
    let sort_by = RwSignal::new(SortOrder::Works);
    let dropdown = RwSignal::new(DropdownState::default());

    spawn_local(async move {
        data.set(Some(load_directory().await));
    });

    // `/` focuses the search input from anywhere on the page.
    let slash_handle = window_event_listener(leptos::ev::keydown, move |ev| {
        let already_focused = document()
            .active_element()
            .is_some_and(|el| el.id() == SEARCH_INPUT_ID);
        if ev.key() == "/" && !already_focused {
            ev.prevent_default();
            if let Some(input) = search_input() {
                let _ = input.focus();
                input.select();
            }
        }
    });
    on_cleanup(move || slash_handle.remove());

    let select_item = move |label: String| {
        query.set(label);
        dropdown.update(|d| d.close());
    };

    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let items = if value.trim().is_empty() {
            Vec::new()
        } else {
            data.with_untracked(|d| {
                d.as_ref()
                    .map(|dir| dir.autocomplete.suggest(&value))
                    .unwrap_or_default()
            })
        };
        query.set(value);
        dropdown.update(|d| if items.is_empty() { d.close() } else { d.open(items) });
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        match ev.key().as_str() {
            "ArrowDown" => {
                if dropdown.with_untracked(|d| d.is_open()) {
                    ev.prevent_default();
                    dropdown.update(|d| d.step_down());
                    scroll_option_into_view(dropdown.with_untracked(|d| d.active_index()));
                }
            }
            "ArrowUp" => {
                if dropdown.with_untracked(|d| d.is_open()) {
                    ev.prevent_default();
                    dropdown.update(|d| d.step_up());
                    scroll_option_into_view(dropdown.with_untracked(|d| d.active_index()));
                }
            }
            "Enter" => {
                match dropdown.with_untracked(|d| d.active_item().cloned()) {
                    Some(item) => select_item(item.label),
                    // Commit the raw input: keep it as the local query.
                    // No routing away from the directory on this path.
                    None => {
                        dropdown.update(|d| d.close());
                        blur_search_input();
                    }
                }
            }
            "Escape" => {
                if dropdown.with_untracked(|d| d.is_open()) {
                    dropdown.update(|d| d.close());
                } else {
                    blur_search_input();
                }
            }
            _ => {}
        }
    };

    // Delay so a click on a dropdown item still lands before it closes.
    let on_blur = move |_: web_sys::FocusEvent| {
        set_timeout(
            move || {
                let _ = dropdown.try_update(|d| d.close());
            },
            Duration::from_millis(150),
        );
    };

    let on_clear = move |_: web_sys::MouseEvent| {
        query.set(String::new());
        dropdown.update(|d| d.close());
        if let Some(input) = search_input() {
            let _ = input.focus();
        }
    };

    let on_global = move |_: web_sys::MouseEvent| {
        let url = links::global_search(&query.get_untracked());
        let _ = window().location().set_href(&url);
    };

    view! {
        <div>
            <h2>"People"</h2>
            <div class="people-controls">
                <div class="search-box">
                    <input
                        id="people-search"
                        type="text"
                        placeholder="Search people… (press / to focus)"
                        autocomplete="off"
                        prop:value=query
                        on:input=on_input
                        on:keydown=on_keydown
                        on:blur=on_blur
                    />
                    <button id="people-search-clear" type="button" on:click=on_clear>
                        "Clear"
                    </button>
                    <button id="search-global" type="button" on:click=on_global>
                        "Search everything"
                    </button>
                    {move || dropdown_view(dropdown, select_item)}
                </div>
                <div class="filter-chips">
                    {[
                        (PersonFilter::All, "All"),
                        (PersonFilter::Talks, "Talks"),
                        (PersonFilter::Papers, "Papers"),
                        (PersonFilter::Merged, "Merged"),
                    ]
                        .into_iter()
                        .map(|(f, label)| {
                            view! {
                                <button
                                    type="button"
                                    class="chip"
                                    class:active=move || filter.get() == f
                                    data-people-filter=f.as_str()
                                    on:click=move |_| filter.set(f)
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <select
                    id="people-sort-select"
                    on:change=move |ev| sort_by.set(SortOrder::from_str(&event_target_value(&ev)))
                >
                    <option value="works">"Most works"</option>
                    <option value="citations">"Most citations"</option>
                    <option value="alpha">"Name A–Z"</option>
                    <option value="alpha-desc">"Name Z–A"</option>
                </select>
            </div>

            {move || match data.get() {
                None => view! { <p class="loading">"Loading directory…"</p> }.into_any(),
                Some(dir) => {
                    let q = query.get();
                    let tokens = tokenize(&q);
                    let mut matched = filter_people(&dir.people, filter.get(), &q);
                    sort_people(&mut matched, sort_by.get());
                    let count = matched.len();

                    let subtitle = if q.trim().is_empty() {
                        view! {
                            <p id="people-subtitle" class="subtitle">
                                "Browse " <strong>{dir.people.len()}</strong>
                                " unified speaker/author profiles"
                            </p>
                        }.into_any()
                    } else {
                        view! {
                            <p id="people-subtitle" class="subtitle">
                                "Results for " <strong>{q.trim().to_string()}</strong>
                            </p>
                        }.into_any()
                    };

                    let grid = if count == 0 {
                        view! {
                            <div class="empty-state" role="status">
                                <p>"No people match the current search and filter."</p>
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div id="people-grid" class="people-grid">
                                {matched.into_iter().map(|p| person_card(p, &tokens)).collect_view()}
                            </div>
                        }.into_any()
                    };

                    view! {
                        {subtitle}
                        <p id="people-results-count" class="results-count">
                            <strong>{count}</strong> " people"
                        </p>
                        {grid}
                    }.into_any()
                }
            }}
        </div>
    }
}

// ── Dropdown ─────────────────────────────────────────────────────────────

fn dropdown_view(
    dropdown: RwSignal<DropdownState>,
    select_item: impl Fn(String) + Copy + 'static,
) -> AnyView {
    let state = dropdown.get();
    if !state.is_open() {
        return view! { <div id="search-dropdown" class="search-dropdown" hidden=true></div> }
            .into_any();
    }

    let active = state.active_index();
    let mut rows: Vec<AnyView> = Vec::new();
    let mut current_section = None;

    for (idx, item) in state.items().iter().enumerate() {
        if current_section != Some(item.section) {
            if current_section.is_some() {
                rows.push(view! { <div class="dropdown-divider"></div> }.into_any());
            }
            rows.push(
                view! { <div class="dropdown-heading">{item.section.heading()}</div> }.into_any(),
            );
            current_section = Some(item.section);
        }

        let label = item.label.clone();
        let clicked_label = item.label.clone();
        let is_active = active == Some(idx);
        rows.push(
            view! {
                <button
                    type="button"
                    id=format!("search-option-{idx}")
                    class=if is_active { "dropdown-item active" } else { "dropdown-item" }
                    role="option"
                    aria-selected=is_active.to_string()
                    on:click=move |_| select_item(clicked_label.clone())
                >
                    <span class="dropdown-label">{label}</span>
                    <span class="dropdown-count">{item.count}</span>
                </button>
            }
            .into_any(),
        );
    }

    view! {
        <div id="search-dropdown" class="search-dropdown" role="listbox">
            {rows}
        </div>
    }
    .into_any()
}

// ── Person card ──────────────────────────────────────────────────────────

fn person_card(p: &Person, tokens: &[String]) -> impl IntoView {
    let name = highlight_segments(&p.name, tokens)
        .into_iter()
        .map(|(text, matched)| {
            if matched {
                view! { <mark>{text}</mark> }.into_any()
            } else {
                view! { <span>{text}</span> }.into_any()
            }
        })
        .collect_view();

    let affiliation = if p.affiliation.is_empty() {
        view! { <p class="affiliation muted">"Affiliation unavailable"</p> }.into_any()
    } else {
        view! { <p class="affiliation">{p.affiliation.clone()}</p> }.into_any()
    };

    let variants = if p.variant_names.is_empty() {
        view! { <span/> }.into_any()
    } else {
        view! {
            <ul class="variant-list">
                {p.variant_names.iter().take(4).map(|v| view! {
                    <li class="variant">{v.clone()}</li>
                }).collect_view()}
            </ul>
        }
        .into_any()
    };

    let citation_badge = if p.citation_count > 0 {
        view! { <span class="badge citations">{p.citation_count} " citations"</span> }.into_any()
    } else {
        view! { <span/> }.into_any()
    };

    let talks_link = if p.talk_count > 0 {
        let name = p.talk_filter_name.clone().unwrap_or_else(|| p.name.clone());
        view! { <a class="card-link" href=links::talks_by(&name)>"View talks"</a> }.into_any()
    } else {
        view! { <span class="card-link disabled" aria-disabled="true">"View talks"</span> }
            .into_any()
    };

    let papers_link = if p.paper_count > 0 {
        let name = p.paper_filter_name.clone().unwrap_or_else(|| p.name.clone());
        view! { <a class="card-link" href=links::papers_by(&name)>"View papers"</a> }.into_any()
    } else {
        view! { <span class="card-link disabled" aria-disabled="true">"View papers"</span> }
            .into_any()
    };

    let search_link = links::search_work_by(&p.name);

    view! {
        <article class="person-card">
            <h3 class="person-name">{name}</h3>
            {affiliation}
            {variants}
            <div class="badges">
                <span class="badge works">{p.total_count} " works"</span>
                {citation_badge}
            </div>
            <footer class="card-links">
                {talks_link}
                {papers_link}
                <a class="card-link" href=search_link>"Search all work"</a>
            </footer>
        </article>
    }
}
