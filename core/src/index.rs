//! People index builder.
//!
//! Groups every speaker and author by identity key, aggregates counts and
//! observed spellings, and finalizes one `Person` per key. The index is
//! built once per corpus load and never mutated afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::key::identity_key;
use crate::search::{SortOrder, person_cmp};
use crate::{Contributor, Paper, Person, Talk};

// ── Accumulator ──────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct PersonAccumulator {
    /// Observed spelling → number of appearances.
    label_counts: HashMap<String, usize>,
    /// Non-empty affiliation → number of appearances.
    affiliation_counts: HashMap<String, usize>,
    talk_count: usize,
    paper_count: usize,
    citation_count: u64,
    talk_filter_name: Option<String>,
    paper_filter_name: Option<String>,
}

impl PersonAccumulator {
    fn observe(&mut self, c: &Contributor) {
        *self.label_counts.entry(c.name.clone()).or_insert(0) += 1;
        if !c.affiliation.is_empty() {
            *self
                .affiliation_counts
                .entry(c.affiliation.clone())
                .or_insert(0) += 1;
        }
    }

    /// Pick the winner of a frequency map: highest count, ties broken by
    /// lexicographically smallest label.
    fn frequency_winner(counts: &HashMap<String, usize>) -> Option<String> {
        counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(label, _)| label.clone())
    }

    fn finalize(self) -> Person {
        let name = Self::frequency_winner(&self.label_counts).unwrap_or_default();
        let mut variant_names: Vec<String> = self
            .label_counts
            .keys()
            .filter(|l| **l != name)
            .cloned()
            .collect();
        variant_names.sort();

        Person {
            name,
            affiliation: Self::frequency_winner(&self.affiliation_counts).unwrap_or_default(),
            variant_names,
            talk_count: self.talk_count,
            paper_count: self.paper_count,
            total_count: self.talk_count + self.paper_count,
            citation_count: self.citation_count,
            talk_filter_name: self.talk_filter_name,
            paper_filter_name: self.paper_filter_name,
        }
    }
}

// ── Build ────────────────────────────────────────────────────────────────

/// Build the unified people index over both corpora. Contributors whose
/// identity key is empty are dropped silently. The result comes back in
/// the default `works` order.
pub fn build_people(talks: &[Talk], papers: &[Paper]) -> Vec<Person> {
    let mut acc: HashMap<String, PersonAccumulator> = HashMap::new();

    for talk in talks {
        for speaker in &talk.speakers {
            let k = identity_key(&speaker.name);
            if k.is_empty() {
                continue;
            }
            let a = acc.entry(k).or_default();
            a.observe(speaker);
            a.talk_count += 1;
            if a.talk_filter_name.is_none() {
                a.talk_filter_name = Some(speaker.name.clone());
            }
        }
    }

    for paper in papers {
        for author in &paper.authors {
            let k = identity_key(&author.name);
            if k.is_empty() {
                continue;
            }
            let a = acc.entry(k).or_default();
            a.observe(author);
            a.paper_count += 1;
            a.citation_count += paper.citation_count;
            if a.paper_filter_name.is_none() {
                a.paper_filter_name = Some(author.name.clone());
            }
        }
    }

    let mut people: Vec<Person> = acc.into_values().map(PersonAccumulator::finalize).collect();
    people.sort_by(|a, b| person_cmp(SortOrder::Works, a, b));
    people
}

// ── Corpus statistics ────────────────────────────────────────────────────

/// Overview numbers for the CLI banner and the frontend home page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    pub people: usize,
    pub talk_only: usize,
    pub paper_only: usize,
    /// Persons seen under three or more spellings.
    pub multi_variant: usize,
    pub talks: usize,
    pub papers: usize,
    pub citations: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_affiliations: Vec<(String, usize)>,
}

pub fn build_stats(people: &[Person], talks: &[Talk], papers: &[Paper]) -> DirectoryStats {
    let mut by_affiliation: HashMap<&str, usize> = HashMap::new();
    for p in people {
        if !p.affiliation.is_empty() {
            *by_affiliation.entry(p.affiliation.as_str()).or_insert(0) += 1;
        }
    }
    let mut top_affiliations: Vec<(String, usize)> = by_affiliation
        .into_iter()
        .map(|(a, c)| (a.to_string(), c))
        .collect();
    top_affiliations.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_affiliations.truncate(10);

    DirectoryStats {
        people: people.len(),
        talk_only: people.iter().filter(|p| p.paper_count == 0).count(),
        paper_only: people.iter().filter(|p| p.talk_count == 0).count(),
        multi_variant: people.iter().filter(|p| p.variant_names.len() >= 2).count(),
        talks: talks.len(),
        papers: papers.len(),
        citations: people.iter().map(|p| p.citation_count).sum(),
        top_affiliations,
    }
}
