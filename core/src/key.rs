//! Identity keying for person names.
//!
//! Two contributor entries belong to the same person iff their keys match.
//! The key is never shown to the user; it exists only to group spellings.

/// Case-, whitespace-, and punctuation-insensitive fingerprint of a name.
///
/// Lowercases the input and drops every non-alphanumeric character, so
/// `"Chris Lattner"`, `"chris lattner"` and `"Chris  Lattner!"` collapse
/// to the same key. Alphanumeric is Unicode-aware: non-ASCII names keep
/// their letters.
pub fn identity_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_and_punctuation_insensitive() {
        assert_eq!(identity_key("Chris Lattner"), "chrislattner");
        assert_eq!(identity_key("chris lattner"), "chrislattner");
        assert_eq!(identity_key("Chris  Lattner!"), "chrislattner");
        assert_eq!(identity_key("O'Brien, Kathryn"), "obrienkathryn");
    }

    #[test]
    fn keeps_unicode_letters_and_digits() {
        assert_eq!(identity_key("José Núñez"), "josénúñez");
        assert_eq!(identity_key("R2-D2"), "r2d2");
    }

    #[test]
    fn punctuation_only_input_keys_empty() {
        assert_eq!(identity_key("—  ··· "), "");
        assert_eq!(identity_key(""), "");
    }
}
