//! Lenient conversion of raw corpus payloads into canonical records.
//!
//! Payloads arrive as arbitrary JSON (`{"talks": [...]}` / `{"papers":
//! [...]}`, or a bare array). A malformed entry is dropped locally; its
//! siblings survive. Nothing here panics on bad input.

use serde_json::Value;

use crate::{Contributor, Paper, Talk};

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Coerce a JSON value to a collapsed string. Numbers and booleans go
/// through their string representation; null, arrays, objects and missing
/// fields coerce to empty.
fn coerce_str(v: &Value) -> String {
    match v {
        Value::String(s) => collapse_ws(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn field_str(record: &Value, field: &str) -> String {
    record.get(field).map(coerce_str).unwrap_or_default()
}

/// Coerce an array field to its non-empty string members.
fn field_list(record: &Value, field: &str) -> Vec<String> {
    match record.get(field) {
        Some(Value::Array(items)) => items
            .iter()
            .map(coerce_str)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Coerce a contributor entry. Accepts `{name, affiliation?}` objects and
/// bare string names. Entries with an empty coerced name are dropped.
fn coerce_contributor(v: &Value) -> Option<Contributor> {
    let (name, affiliation) = match v {
        Value::Object(_) => (
            coerce_str(v.get("name").unwrap_or(&Value::Null)),
            coerce_str(v.get("affiliation").unwrap_or(&Value::Null)),
        ),
        Value::String(_) => (coerce_str(v), String::new()),
        _ => return None,
    };
    if name.is_empty() {
        return None;
    }
    Some(Contributor { name, affiliation })
}

fn contributor_list(record: &Value, field: &str) -> Vec<Contributor> {
    match record.get(field) {
        Some(Value::Array(items)) => items.iter().filter_map(coerce_contributor).collect(),
        _ => Vec::new(),
    }
}

/// Coerce a citation count to a non-negative integer. Accepts integers,
/// floats (truncated) and numeric strings; anything else is 0.
fn coerce_citation_count(v: Option<&Value>) -> u64 {
    match v {
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                u
            } else if let Some(f) = n.as_f64() {
                if f > 0.0 { f as u64 } else { 0 }
            } else {
                0
            }
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| *f > 0.0).map(|f| f as u64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Pull the record array out of a payload: either `payload[field]` or a
/// bare top-level array. Anything else reads as empty.
fn payload_records<'a>(payload: &'a Value, field: &str) -> &'a [Value] {
    match payload {
        Value::Object(map) => match map.get(field) {
            Some(Value::Array(items)) => items,
            _ => &[],
        },
        Value::Array(items) => items,
        _ => &[],
    }
}

/// Normalize a `{"talks": [...]}` payload.
pub fn normalize_talks(payload: &Value) -> Vec<Talk> {
    payload_records(payload, "talks")
        .iter()
        .filter(|r| r.is_object())
        .map(|r| Talk {
            title: field_str(r, "title"),
            speakers: contributor_list(r, "speakers"),
            abstract_text: field_str(r, "abstract"),
            tags: field_list(r, "tags"),
            meeting_name: field_str(r, "meetingName"),
            meeting_location: field_str(r, "meetingLocation"),
            meeting_date: field_str(r, "meetingDate"),
            meeting: field_str(r, "meeting"),
        })
        .collect()
}

/// Normalize a `{"papers": [...]}` payload.
pub fn normalize_papers(payload: &Value) -> Vec<Paper> {
    payload_records(payload, "papers")
        .iter()
        .filter(|r| r.is_object())
        .map(|r| Paper {
            title: field_str(r, "title"),
            authors: contributor_list(r, "authors"),
            abstract_text: field_str(r, "abstract"),
            tags: field_list(r, "tags"),
            keywords: field_list(r, "keywords"),
            publication: field_str(r, "publication"),
            venue: field_str(r, "venue"),
            year: field_str(r, "year"),
            kind: field_str(r, "type"),
            citation_count: coerce_citation_count(r.get("citationCount")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collapses_whitespace_everywhere() {
        let talks = normalize_talks(&json!({
            "talks": [{"title": "  A\t Talk \n Title ", "speakers": [{"name": " Jane\t Doe "}]}]
        }));
        assert_eq!(talks[0].title, "A Talk Title");
        assert_eq!(talks[0].speakers[0].name, "Jane Doe");
    }

    #[test]
    fn unnamed_contributors_are_dropped_locally() {
        let talks = normalize_talks(&json!({
            "talks": [{"title": "T", "speakers": [
                {"name": "  "},
                {"affiliation": "Somewhere"},
                {"name": "Kept One"},
                42,
                "Bare Name"
            ]}]
        }));
        let names: Vec<&str> = talks[0].speakers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Kept One", "Bare Name"]);
    }

    #[test]
    fn non_string_fields_coerce_via_string_repr() {
        let papers = normalize_papers(&json!({
            "papers": [{"title": 2024, "authors": [{"name": true, "affiliation": 7}], "year": 1999}]
        }));
        assert_eq!(papers[0].title, "2024");
        assert_eq!(papers[0].authors[0].name, "true");
        assert_eq!(papers[0].authors[0].affiliation, "7");
        assert_eq!(papers[0].year, "1999");
    }

    #[test]
    fn malformed_records_drop_but_siblings_survive() {
        let talks = normalize_talks(&json!({"talks": ["not a record", null, {"title": "Ok"}]}));
        assert_eq!(talks.len(), 1);
        assert_eq!(talks[0].title, "Ok");
    }

    #[test]
    fn missing_or_garbage_payload_is_empty() {
        assert!(normalize_talks(&json!(null)).is_empty());
        assert!(normalize_papers(&json!({"talks": []})).is_empty());
        assert!(normalize_talks(&json!({"talks": "nope"})).is_empty());
    }

    #[test]
    fn bare_array_payload_is_accepted() {
        let talks = normalize_talks(&json!([{"title": "Loose"}]));
        assert_eq!(talks.len(), 1);
    }

    #[test]
    fn citation_count_coercion() {
        let papers = normalize_papers(&json!({"papers": [
            {"title": "a", "authors": [], "citationCount": 12},
            {"title": "b", "authors": [], "citationCount": "34"},
            {"title": "c", "authors": [], "citationCount": 5.9},
            {"title": "d", "authors": [], "citationCount": -3},
            {"title": "e", "authors": [], "citationCount": "junk"},
            {"title": "f", "authors": []}
        ]}));
        let counts: Vec<u64> = papers.iter().map(|p| p.citation_count).collect();
        assert_eq!(counts, [12, 34, 5, 0, 0, 0]);
    }

    #[test]
    fn tag_and_keyword_lists_keep_nonempty_strings() {
        let papers = normalize_papers(&json!({"papers": [
            {"title": "p", "authors": [], "tags": ["LLVM", "", 3], "keywords": [null, " mlir "]}
        ]}));
        assert_eq!(papers[0].tags, ["LLVM", "3"]);
        assert_eq!(papers[0].keywords, ["mlir"]);
    }
}
