use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::types::{DirectoryData, load_directory};

#[component]
pub fn HomePage() -> impl IntoView {
    let data: RwSignal<Option<DirectoryData>> = RwSignal::new(None);

    spawn_local(async move {
        data.set(Some(load_directory().await));
    });

    view! {
        <div>
            <h2>"Corpus overview"</h2>
            {move || match data.get() {
                None => view! { <p class="loading">"Loading…"</p> }.into_any(),
                Some(dir) => {
                    let s = &dir.stats;
                    view! {
                        <div class="stats-grid">
                            <div class="stat-card">
                                <div class="num">{s.people}</div>
                                <div class="label">"people"</div>
                            </div>
                            <div class="stat-card">
                                <div class="num">{s.talks}</div>
                                <div class="label">"talks"</div>
                            </div>
                            <div class="stat-card">
                                <div class="num">{s.papers}</div>
                                <div class="label">"papers"</div>
                            </div>
                            <div class="stat-card">
                                <div class="num">{s.citations}</div>
                                <div class="label">"citations"</div>
                            </div>
                            <div class="stat-card">
                                <div class="num">{s.talk_only}</div>
                                <div class="label">"talk-only"</div>
                            </div>
                            <div class="stat-card">
                                <div class="num">{s.paper_only}</div>
                                <div class="label">"paper-only"</div>
                            </div>
                            <div class="stat-card">
                                <div class="num">{s.multi_variant}</div>
                                <div class="label">"merged identities"</div>
                            </div>
                        </div>
                        {if !s.top_affiliations.is_empty() {
                            view! {
                                <div class="card">
                                    <h3>"Top affiliations"</h3>
                                    <ul style="list-style:none;display:flex;flex-wrap:wrap;gap:0.4rem;">
                                        {s.top_affiliations.iter().map(|(name, count)| view! {
                                            <li style="background:#f0f2f7;border-radius:3px;padding:0.15rem 0.4rem;font-size:0.85rem;">
                                                {name.clone()}
                                                <span style="color:#999;margin-left:0.25rem;">{count.to_string()}</span>
                                            </li>
                                        }).collect_view()}
                                    </ul>
                                </div>
                            }.into_any()
                        } else {
                            view! { <span/> }.into_any()
                        }}
                        {if !dir.autocomplete.topics.is_empty() {
                            view! {
                                <div class="card">
                                    <h3>"Top topics"</h3>
                                    <ul style="list-style:none;display:flex;flex-wrap:wrap;gap:0.4rem;">
                                        {dir.autocomplete.topics.iter().take(20).map(|t| view! {
                                            <li style="background:#f0f2f7;border-radius:3px;padding:0.15rem 0.4rem;font-size:0.85rem;">
                                                {t.label.clone()}
                                                <span style="color:#999;margin-left:0.25rem;">{t.count.to_string()}</span>
                                            </li>
                                        }).collect_view()}
                                    </ul>
                                </div>
                            }.into_any()
                        } else {
                            view! { <span/> }.into_any()
                        }}
                    }.into_any()
                }
            }}
        </div>
    }
}
