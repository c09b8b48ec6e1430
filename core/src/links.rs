//! Outbound navigation URLs for the corpus pages.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Query-component set: alphanumerics plus the unreserved marks stay raw,
/// everything else (spaces included) is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `talks/?speaker=<name>` — the talks archive filtered to one speaker.
pub fn talks_by(name: &str) -> String {
    format!("talks/?speaker={}", encode(name))
}

/// `papers.html?speaker=<name>` — the papers page filtered to one author.
pub fn papers_by(name: &str) -> String {
    format!("papers.html?speaker={}", encode(name))
}

/// `work.html?mode=search&q=<name>` — combined search over all of one
/// person's work.
pub fn search_work_by(name: &str) -> String {
    global_search(name)
}

/// `work.html?mode=search&q=<query>` — global search commit for a raw query.
pub fn global_search(query: &str) -> String {
    format!("work.html?mode=search&q={}", encode(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_percent_encoded() {
        assert_eq!(talks_by("Chris Lattner"), "talks/?speaker=Chris%20Lattner");
        assert_eq!(papers_by("Núñez & Co"), "papers.html?speaker=N%C3%BA%C3%B1ez%20%26%20Co");
    }

    #[test]
    fn unreserved_marks_pass_through() {
        assert_eq!(
            global_search("a-b_c.d~e"),
            "work.html?mode=search&q=a-b_c.d~e"
        );
    }

    #[test]
    fn query_metacharacters_are_escaped() {
        assert_eq!(
            global_search("foo=bar&baz?"),
            "work.html?mode=search&q=foo%3Dbar%26baz%3F"
        );
    }
}
