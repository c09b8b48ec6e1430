use directory_core::{
    AutocompleteIndex, DirectoryStats, Person, build_people, build_stats, normalize_papers,
    normalize_talks,
};

// ── Loaded directory snapshot ────────────────────────────────────────────

/// Everything the pages need, built once after both corpora resolve.
/// Immutable for the rest of the session.
#[derive(Debug, Clone)]
pub struct DirectoryData {
    pub people: Vec<Person>,
    pub autocomplete: AutocompleteIndex,
    pub stats: DirectoryStats,
}

async fn fetch_payload(url: &str) -> Option<serde_json::Value> {
    let resp = gloo_net::http::Request::get(url).send().await.ok()?;
    resp.json::<serde_json::Value>().await.ok()
}

/// Load both corpora and build the index. Either fetch may fail; a failed
/// side degrades to an empty corpus and the directory is built over
/// whatever was returned.
pub async fn load_directory() -> DirectoryData {
    let talks_payload = fetch_payload("/data/talks.json")
        .await
        .unwrap_or(serde_json::Value::Null);
    let papers_payload = fetch_payload("/data/papers.json")
        .await
        .unwrap_or(serde_json::Value::Null);

    let talks = normalize_talks(&talks_payload);
    let papers = normalize_papers(&papers_payload);
    let people = build_people(&talks, &papers);
    let stats = build_stats(&people, &talks, &papers);
    let autocomplete = AutocompleteIndex::build(&talks, &papers, &people);

    DirectoryData {
        people,
        autocomplete,
        stats,
    }
}
