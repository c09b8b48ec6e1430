//! Tokenized search, category filtering, and the four sort orders.

use std::cmp::Ordering;

use regex::RegexBuilder;

use crate::Person;

// ── Tokenization ─────────────────────────────────────────────────────────

/// Split a query into lowercase whitespace-delimited tokens of at least
/// two characters. Shorter tokens are discarded, so a single-character or
/// all-whitespace query yields no tokens and matches everything.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

// ── Category filter ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersonFilter {
    #[default]
    All,
    Talks,
    Papers,
    /// Persons observed under three or more spellings, i.e. identities
    /// coalesced across sources.
    Merged,
}

impl PersonFilter {
    pub fn from_str(s: &str) -> Self {
        match s {
            "talks" => Self::Talks,
            "papers" => Self::Papers,
            "merged" => Self::Merged,
            _ => Self::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Talks => "talks",
            Self::Papers => "papers",
            Self::Merged => "merged",
        }
    }

    fn keeps(&self, p: &Person) -> bool {
        match self {
            Self::All => true,
            Self::Talks => p.talk_count > 0,
            Self::Papers => p.paper_count > 0,
            Self::Merged => p.variant_names.len() >= 2,
        }
    }
}

// ── Sort orders ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Works,
    Citations,
    Alpha,
    AlphaDesc,
}

impl SortOrder {
    /// Unknown values fall back to the default `works` order.
    pub fn from_str(s: &str) -> Self {
        match s {
            "citations" => Self::Citations,
            "alpha" => Self::Alpha,
            "alpha-desc" => Self::AlphaDesc,
            _ => Self::Works,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Works => "works",
            Self::Citations => "citations",
            Self::Alpha => "alpha",
            Self::AlphaDesc => "alpha-desc",
        }
    }
}

/// Full comparator chain for one sort order.
pub fn person_cmp(order: SortOrder, a: &Person, b: &Person) -> Ordering {
    match order {
        SortOrder::Works => b
            .total_count
            .cmp(&a.total_count)
            .then_with(|| b.citation_count.cmp(&a.citation_count))
            .then_with(|| a.name.cmp(&b.name)),
        SortOrder::Citations => b
            .citation_count
            .cmp(&a.citation_count)
            .then_with(|| b.total_count.cmp(&a.total_count))
            .then_with(|| a.name.cmp(&b.name)),
        SortOrder::Alpha => a.name.cmp(&b.name),
        SortOrder::AlphaDesc => b.name.cmp(&a.name),
    }
}

// ── Engine ───────────────────────────────────────────────────────────────

/// Apply the category filter and the tokenized substring match.
/// Every token must be a substring of the person's search blob.
pub fn filter_people<'a>(
    people: &'a [Person],
    filter: PersonFilter,
    query: &str,
) -> Vec<&'a Person> {
    let tokens = tokenize(query);
    people
        .iter()
        .filter(|p| filter.keeps(p))
        .filter(|p| {
            if tokens.is_empty() {
                return true;
            }
            let blob = p.search_blob();
            tokens.iter().all(|t| blob.contains(t.as_str()))
        })
        .collect()
}

/// Stable sort of a filtered result set.
pub fn sort_people(people: &mut [&Person], order: SortOrder) {
    people.sort_by(|a, b| person_cmp(order, a, b));
}

// ── Match highlighting ───────────────────────────────────────────────────

/// Split a display name into `(text, matched)` runs, marking every
/// case-insensitive occurrence of any token. Tokens are regex-escaped, so
/// punctuation in a query never changes the match semantics.
/// Concatenating the segment texts reproduces the input.
pub fn highlight_segments(name: &str, tokens: &[String]) -> Vec<(String, bool)> {
    if tokens.is_empty() || name.is_empty() {
        return vec![(name.to_string(), false)];
    }
    let pattern = tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(_) => return vec![(name.to_string(), false)],
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(name) {
        if m.start() > last {
            segments.push((name[last..m.start()].to_string(), false));
        }
        segments.push((m.as_str().to_string(), true));
        last = m.end();
    }
    if last < name.len() {
        segments.push((name[last..].to_string(), false));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, variants: &[&str], talks: usize, papers: usize, cites: u64) -> Person {
        Person {
            name: name.to_string(),
            affiliation: String::new(),
            variant_names: variants.iter().map(|v| v.to_string()).collect(),
            talk_count: talks,
            paper_count: papers,
            total_count: talks + papers,
            citation_count: cites,
            talk_filter_name: None,
            paper_filter_name: None,
        }
    }

    #[test]
    fn tokens_shorter_than_two_chars_are_discarded() {
        assert_eq!(tokenize("chris lattner"), ["chris", "lattner"]);
        assert_eq!(tokenize("x"), Vec::<String>::new());
        assert_eq!(tokenize("   "), Vec::<String>::new());
        assert_eq!(tokenize("a bc d"), ["bc"]);
        assert_eq!(tokenize(""), Vec::<String>::new());
    }

    #[test]
    fn single_char_query_matches_everyone() {
        let people = vec![person("Chris Lattner", &[], 1, 1, 0)];
        assert_eq!(filter_people(&people, PersonFilter::All, "x").len(), 1);
        assert_eq!(filter_people(&people, PersonFilter::All, "").len(), 1);
    }

    #[test]
    fn every_token_must_match_the_blob() {
        let people = vec![
            person("Chris Lattner", &[], 1, 0, 0),
            person("Chris Bieneman", &[], 1, 0, 0),
        ];
        let hits = filter_people(&people, PersonFilter::All, "chris lattner");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Chris Lattner");
    }

    #[test]
    fn substring_match_reaches_variants_but_not_affiliation() {
        let mut p = person("C. Lattner", &["Chris Lattner"], 1, 0, 0);
        p.affiliation = "Modular".to_string();
        let people = vec![p];
        assert_eq!(filter_people(&people, PersonFilter::All, "chris").len(), 1);
        // Middle-of-name substring, not a prefix.
        assert_eq!(filter_people(&people, PersonFilter::All, "attn").len(), 1);
        assert_eq!(filter_people(&people, PersonFilter::All, "modular").len(), 0);
    }

    #[test]
    fn category_filters() {
        let people = vec![
            person("Talk Only", &[], 2, 0, 0),
            person("Paper Only", &[], 0, 1, 3),
            person("Merged Name", &["M. Name", "merged name"], 1, 1, 0),
        ];
        assert_eq!(filter_people(&people, PersonFilter::All, "").len(), 3);
        let talks = filter_people(&people, PersonFilter::Talks, "");
        assert!(talks.iter().all(|p| p.talk_count > 0));
        assert_eq!(talks.len(), 2);
        let papers = filter_people(&people, PersonFilter::Papers, "");
        assert_eq!(papers.len(), 2);
        let merged = filter_people(&people, PersonFilter::Merged, "");
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Merged Name");
    }

    #[test]
    fn filter_beats_matching_query() {
        let people = vec![person("Talk Only", &[], 1, 0, 0)];
        assert_eq!(filter_people(&people, PersonFilter::Papers, "talk").len(), 0);
    }

    #[test]
    fn two_author_paper_scenario() {
        let people = vec![person("A", &[], 0, 1, 0), person("B", &[], 0, 1, 0)];
        assert_eq!(filter_people(&people, PersonFilter::Merged, "").len(), 0);
        assert_eq!(filter_people(&people, PersonFilter::Papers, "").len(), 2);
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let people = vec![
            person("Alpha Beta", &[], 1, 0, 0),
            person("Gamma Delta", &[], 0, 1, 0),
        ];
        let once: Vec<&str> = filter_people(&people, PersonFilter::Talks, "alpha")
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        let twice: Vec<&str> = filter_people(&people, PersonFilter::Talks, "alpha")
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn works_order_chain() {
        let people = vec![
            person("Zed", &[], 1, 1, 9),
            person("Ann", &[], 1, 1, 9),
            person("Big", &[], 3, 0, 0),
            person("Cit", &[], 1, 1, 20),
        ];
        let mut refs: Vec<&Person> = people.iter().collect();
        sort_people(&mut refs, SortOrder::Works);
        let names: Vec<&str> = refs.iter().map(|p| p.name.as_str()).collect();
        // total desc, then citations desc, then name asc.
        assert_eq!(names, ["Big", "Cit", "Ann", "Zed"]);
    }

    #[test]
    fn citations_order_puts_cited_first() {
        let people = vec![person("A", &[], 0, 1, 5), person("B", &[], 5, 5, 0)];
        let mut refs: Vec<&Person> = people.iter().collect();
        sort_people(&mut refs, SortOrder::Citations);
        assert_eq!(refs[0].name, "A");
    }

    #[test]
    fn alpha_orders_are_mirrors() {
        let people = vec![
            person("Bb", &[], 1, 0, 0),
            person("Aa", &[], 1, 0, 0),
            person("Cc", &[], 1, 0, 0),
        ];
        let mut asc: Vec<&Person> = people.iter().collect();
        sort_people(&mut asc, SortOrder::Alpha);
        let mut desc: Vec<&Person> = people.iter().collect();
        sort_people(&mut desc, SortOrder::AlphaDesc);
        let up: Vec<&str> = asc.iter().map(|p| p.name.as_str()).collect();
        let down: Vec<&str> = desc.iter().rev().map(|p| p.name.as_str()).collect();
        assert_eq!(up, down);
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let people = vec![
            person("Mid", &[], 1, 1, 0),
            person("Top", &[], 4, 0, 0),
            person("Low", &[], 1, 0, 0),
        ];
        for order in [
            SortOrder::Works,
            SortOrder::Citations,
            SortOrder::Alpha,
            SortOrder::AlphaDesc,
        ] {
            let mut once: Vec<&Person> = people.iter().collect();
            sort_people(&mut once, order);
            let mut twice: Vec<&Person> = once.clone();
            sort_people(&mut twice, order);
            assert_eq!(
                once.iter().map(|p| &p.name).collect::<Vec<_>>(),
                twice.iter().map(|p| &p.name).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn unknown_sort_and_filter_strings_fall_back() {
        assert_eq!(SortOrder::from_str("nonsense"), SortOrder::Works);
        assert_eq!(PersonFilter::from_str("nonsense"), PersonFilter::All);
        assert_eq!(SortOrder::from_str("alpha-desc"), SortOrder::AlphaDesc);
    }

    #[test]
    fn highlight_marks_case_insensitive_runs() {
        let segs = highlight_segments("Chris Lattner", &tokenize("lattner"));
        assert_eq!(
            segs,
            vec![
                ("Chris ".to_string(), false),
                ("Lattner".to_string(), true)
            ]
        );
        let joined: String = segs.into_iter().map(|(t, _)| t).collect();
        assert_eq!(joined, "Chris Lattner");
    }

    #[test]
    fn highlight_escapes_regex_metacharacters() {
        let segs = highlight_segments("A+B Team", &["a+b".to_string()]);
        assert_eq!(
            segs,
            vec![("A+B".to_string(), true), (" Team".to_string(), false)]
        );
    }

    #[test]
    fn highlight_without_tokens_is_one_plain_segment() {
        assert_eq!(
            highlight_segments("Anyone", &[]),
            vec![("Anyone".to_string(), false)]
        );
    }
}
