use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use directory_core::{Paper, Talk, normalize_papers, normalize_talks};

/// Everything discovered under a data directory.
#[derive(Debug, Default)]
pub struct Corpus {
    pub talks: Vec<Talk>,
    pub papers: Vec<Paper>,
    pub talk_files: Vec<PathBuf>,
    pub paper_files: Vec<PathBuf>,
    /// JSON files that were unreadable or carried neither corpus shape.
    pub skipped: Vec<PathBuf>,
}

/// Scan the data root for talk and paper payloads.
///
/// Accepted shapes per file: `{"talks": [...]}`, `{"papers": [...]}`, or a
/// bare array of records (classified by whether its first object carries
/// `speakers` or `authors`). Unreadable files are skipped, not fatal.
pub fn scan_corpus(root: &Path) -> Corpus {
    let mut corpus = Corpus::default();

    for entry in WalkDir::new(root)
        .max_depth(4)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let payload: Value = match std::fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
        {
            Some(v) => v,
            None => {
                corpus.skipped.push(path.to_path_buf());
                continue;
            }
        };

        match classify(&payload) {
            Some(PayloadKind::Talks) => {
                corpus.talks.extend(normalize_talks(&payload));
                corpus.talk_files.push(path.to_path_buf());
            }
            Some(PayloadKind::Papers) => {
                corpus.papers.extend(normalize_papers(&payload));
                corpus.paper_files.push(path.to_path_buf());
            }
            None => corpus.skipped.push(path.to_path_buf()),
        }
    }

    corpus
}

enum PayloadKind {
    Talks,
    Papers,
}

fn classify(payload: &Value) -> Option<PayloadKind> {
    match payload {
        Value::Object(map) => {
            if map.get("talks").is_some_and(Value::is_array) {
                Some(PayloadKind::Talks)
            } else if map.get("papers").is_some_and(Value::is_array) {
                Some(PayloadKind::Papers)
            } else {
                None
            }
        }
        Value::Array(items) => {
            let first = items.iter().find(|v| v.is_object())?;
            if first.get("speakers").is_some() {
                Some(PayloadKind::Talks)
            } else if first.get("authors").is_some() {
                Some(PayloadKind::Papers)
            } else {
                None
            }
        }
        _ => None,
    }
}
