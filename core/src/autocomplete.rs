//! Multi-category autocomplete over the combined corpus.
//!
//! Four parallel ordered lists (topics, people, talk titles, paper titles)
//! built once after load, plus the dropdown intersection and the
//! cross-corpus routing decision for the global search page.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Paper, Person, Talk};

/// Per-entry caps for the dropdown, in section order.
const TOPIC_LIMIT: usize = 6;
const PEOPLE_LIMIT: usize = 6;
const TALK_LIMIT: usize = 4;
const PAPER_LIMIT: usize = 4;

/// How many tags a single record contributes to the topic list.
const TAGS_PER_RECORD: usize = 12;

// ── Entries ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestEntry {
    pub label: String,
    pub count: usize,
    /// Extra lowercase haystack for substring matching (people entries
    /// carry all their spellings here).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
}

impl SuggestEntry {
    fn matches(&self, needle: &str) -> bool {
        match &self.search_text {
            Some(text) => text.contains(needle),
            None => self.label.to_lowercase().contains(needle),
        }
    }

    fn exact(&self, needle: &str) -> bool {
        self.label.to_lowercase() == needle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestSection {
    Topic,
    Person,
    TalkTitle,
    PaperTitle,
}

impl SuggestSection {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Topic => "Topics",
            Self::Person => "People",
            Self::TalkTitle => "Talks",
            Self::PaperTitle => "Papers",
        }
    }
}

/// One row of the open dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownItem {
    pub label: String,
    pub count: usize,
    pub section: SuggestSection,
}

// ── Index ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteIndex {
    pub topics: Vec<SuggestEntry>,
    pub people: Vec<SuggestEntry>,
    pub talk_titles: Vec<SuggestEntry>,
    pub paper_titles: Vec<SuggestEntry>,
}

/// Case-insensitive label counter that keeps the first observed spelling.
#[derive(Default)]
struct LabelCounter {
    // lowercase key → (first spelling, count)
    counts: HashMap<String, (String, usize)>,
}

impl LabelCounter {
    fn add(&mut self, label: &str) {
        self.counts
            .entry(label.to_lowercase())
            .and_modify(|e| e.1 += 1)
            .or_insert_with(|| (label.to_string(), 1));
    }

    fn into_entries(self) -> Vec<SuggestEntry> {
        let mut entries: Vec<SuggestEntry> = self
            .counts
            .into_values()
            .map(|(label, count)| SuggestEntry {
                label,
                count,
                search_text: None,
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        entries
    }
}

/// The first `limit` distinct-by-lowercase strings from `lists` chained.
fn leading_topic_set<'a>(
    lists: impl IntoIterator<Item = &'a [String]>,
    limit: usize,
) -> Vec<&'a str> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for tag in lists.into_iter().flatten() {
        let key = tag.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(tag.as_str());
        if out.len() == limit {
            break;
        }
    }
    out
}

impl AutocompleteIndex {
    pub fn build(talks: &[Talk], papers: &[Paper], people: &[Person]) -> Self {
        // Topics: each talk contributes its leading tag set, each paper
        // its merged tags ∪ keywords, both capped per record.
        let mut topics = LabelCounter::default();
        for talk in talks {
            for tag in leading_topic_set([talk.tags.as_slice()], TAGS_PER_RECORD) {
                topics.add(tag);
            }
        }
        for paper in papers {
            let merged = leading_topic_set(
                [paper.tags.as_slice(), paper.keywords.as_slice()],
                TAGS_PER_RECORD,
            );
            for tag in merged {
                topics.add(tag);
            }
        }

        // People: derived from the built index so counts agree with the
        // directory, searchable under every spelling.
        let mut people_entries: Vec<SuggestEntry> = people
            .iter()
            .map(|p| SuggestEntry {
                label: p.name.clone(),
                count: p.total_count,
                search_text: Some(p.search_blob()),
            })
            .collect();
        people_entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

        AutocompleteIndex {
            topics: topics.into_entries(),
            people: people_entries,
            talk_titles: title_entries(talks.iter().map(|t| t.title.as_str())),
            paper_titles: title_entries(papers.iter().map(|p| p.title.as_str())),
        }
    }

    /// Intersect the four lists with a case-insensitive substring match,
    /// capped per section, flattened in section order.
    pub fn suggest(&self, query: &str) -> Vec<DropdownItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut items = Vec::new();
        for (entries, limit, section) in [
            (&self.topics, TOPIC_LIMIT, SuggestSection::Topic),
            (&self.people, PEOPLE_LIMIT, SuggestSection::Person),
            (&self.talk_titles, TALK_LIMIT, SuggestSection::TalkTitle),
            (&self.paper_titles, PAPER_LIMIT, SuggestSection::PaperTitle),
        ] {
            items.extend(
                entries
                    .iter()
                    .filter(|e| e.matches(&needle))
                    .take(limit)
                    .map(|e| DropdownItem {
                        label: e.label.clone(),
                        count: e.count,
                        section,
                    }),
            );
        }
        items
    }

    /// Whether a committed query belongs on the global search page rather
    /// than the local directory: nobody matches it exactly by name, and
    /// either some talk/paper title matches it exactly, or no person
    /// matches it at all while at least one title does.
    pub fn should_route_to_global_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }

        if self.people.iter().any(|p| p.exact(&needle)) {
            return false;
        }

        let titles = self.talk_titles.iter().chain(self.paper_titles.iter());
        if titles.clone().any(|t| t.exact(&needle)) {
            return true;
        }

        let people_hits = self.people.iter().filter(|p| p.matches(&needle)).count();
        let title_hits = titles.filter(|t| t.matches(&needle)).count();
        people_hits == 0 && title_hits >= 1
    }
}

fn title_entries<'a>(titles: impl Iterator<Item = &'a str>) -> Vec<SuggestEntry> {
    let mut counter = LabelCounter::default();
    for title in titles {
        if !title.is_empty() {
            counter.add(title);
        }
    }
    let mut entries = counter.into_entries();
    entries.sort_by(|a, b| a.label.cmp(&b.label));
    entries
}
