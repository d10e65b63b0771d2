//! AND-of-substring matching over an entry's searchable text.

use crate::catalog::Entry;

/// Separator between fields so a token can never straddle two of them.
const FIELD_SEPARATOR: char = ' ';

/// Lowercased, concatenated searchable text of one entry.
///
/// Built once per entry when a [`super::SearchIndex`] is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Haystack(String);

impl Haystack {
    /// Label, secondary text, tags and synonyms, in that order.
    pub fn from_entry(entry: &Entry) -> Self {
        let fields = std::iter::once(entry.label.as_str())
            .chain(entry.secondary_text.as_deref())
            .chain(entry.tags.iter().map(String::as_str))
            .chain(entry.synonyms.iter().map(String::as_str));

        let mut text = String::with_capacity(entry.label.len() * 2);
        for (i, field) in fields.enumerate() {
            if i > 0 {
                text.push(FIELD_SEPARATOR);
            }
            text.push_str(&field.to_lowercase());
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True iff every token occurs somewhere in the haystack.
    ///
    /// Tokens are expected to be lowercase already (see
    /// [`super::tokenize`]). No tokens means no filter.
    pub fn matches<T: AsRef<str>>(&self, tokens: &[T]) -> bool {
        tokens.iter().all(|token| self.0.contains(token.as_ref()))
    }
}

/// Decide whether `entry` satisfies every token.
///
/// Convenience for one-off checks; [`super::SearchIndex`] keeps prebuilt
/// haystacks instead of rebuilding them per keystroke.
pub fn is_match<T: AsRef<str>>(entry: &Entry, tokens: &[T]) -> bool {
    tokens.is_empty() || Haystack::from_entry(entry).matches(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tokenize;
    use assert2::check;
    use rstest::rstest;

    fn devtools() -> Entry {
        Entry::new("Devtools")
            .secondary("Inspect every dispatched action")
            .tags(["debugging", "tooling"])
            .synonyms(["time travel"])
    }

    #[test]
    fn test_haystack_joins_fields_with_separator() {
        let haystack = Haystack::from_entry(&devtools());
        check!(
            haystack.as_str()
                == "devtools inspect every dispatched action debugging tooling time travel"
        );
    }

    #[test]
    fn test_label_only_entry_matches_on_label() {
        let entry = Entry::new("Reducer");
        check!(is_match(&entry, &tokenize("redu")));
        check!(is_match(&entry, &tokenize("REDUCER")));
        check!(!is_match(&entry, &tokenize("reducer core")));
    }

    #[test]
    fn test_empty_tokens_match() {
        let tokens: [&str; 0] = [];
        check!(is_match(&Entry::new("Store"), &tokens));
    }

    #[rstest]
    #[case("devtools", true)]
    #[case("dispatched", true)]
    #[case("tooling", true)]
    #[case("time travel", true)]
    #[case("travel devtools", true)]
    #[case("devtools redux", false)]
    #[case("toolsdebug", false)]
    fn test_and_semantics_across_fields(#[case] query: &str, #[case] expected: bool) {
        check!(is_match(&devtools(), &tokenize(query)) == expected);
    }

    #[test]
    fn test_separator_prevents_field_merge() {
        // "action" ends the secondary text and "debugging" starts the tags
        check!(!is_match(&devtools(), &tokenize("actiondebugging")));
    }
}
