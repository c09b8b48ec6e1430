use serde::{Deserialize, Serialize};

pub mod autocomplete;
pub mod dropdown;
pub mod index;
pub mod key;
pub mod links;
pub mod normalize;
pub mod search;

pub use autocomplete::{AutocompleteIndex, DropdownItem, SuggestEntry, SuggestSection};
pub use dropdown::DropdownState;
pub use index::{DirectoryStats, build_people, build_stats};
pub use key::identity_key;
pub use normalize::{normalize_papers, normalize_talks};
pub use search::{
    PersonFilter, SortOrder, filter_people, highlight_segments, person_cmp, sort_people, tokenize,
};

// ── Contributor ──────────────────────────────────────────────────────────

/// A canonical speaker or author entry. `name` is always non-empty;
/// both fields are whitespace-collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub affiliation: String,
}

// ── Normalized corpus records ────────────────────────────────────────────

/// A conference talk after normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talk {
    pub title: String,
    pub speakers: Vec<Contributor>,
    #[serde(rename = "abstract", default, skip_serializing_if = "String::is_empty")]
    pub abstract_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub meeting_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub meeting_location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub meeting_date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub meeting: String,
}

/// A research paper after normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub title: String,
    pub authors: Vec<Contributor>,
    #[serde(rename = "abstract", default, skip_serializing_if = "String::is_empty")]
    pub abstract_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub publication: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub venue: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub year: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(rename = "citationCount", default)]
    pub citation_count: u64,
}

// ── Person: the central aggregate ────────────────────────────────────────

/// One unified directory entry per identity key.
///
/// `name` is the most frequent observed spelling (ties broken
/// lexicographically); every entry in `variant_names` shares this
/// person's identity key and differs from `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub affiliation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variant_names: Vec<String>,
    pub talk_count: usize,
    pub paper_count: usize,
    /// Always `talk_count + paper_count`, kept denormalized for sorting.
    pub total_count: usize,
    pub citation_count: u64,
    /// Spelling to pass as `speaker=` on the talks page, if they have talks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talk_filter_name: Option<String>,
    /// Spelling to pass as `speaker=` on the papers page, if they have papers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_filter_name: Option<String>,
}

impl Person {
    /// Lowercase haystack the search tokens are tested against.
    /// Affiliation is deliberately excluded.
    pub fn search_blob(&self) -> String {
        let mut blob = self.name.clone();
        for v in &self.variant_names {
            blob.push(' ');
            blob.push_str(v);
        }
        blob.to_lowercase()
    }
}
