//! Property tests for filtering, grouping and query persistence.

use docsite_search::{
    Catalog, Entry, GroupKey, MemoryStore, QueryPersistence, SearchIndex, WriteMode, group,
    tokenize,
};
use proptest::prelude::*;

fn entry_strategy() -> impl Strategy<Value = Entry> {
    (
        "[A-Za-z0-9$@][A-Za-z ]{0,10}",
        proptest::option::of("[a-z ]{0,16}"),
        prop::collection::vec("[a-z]{1,6}", 0..3),
        prop::collection::vec("[a-z ]{1,10}", 0..2),
    )
        .prop_map(|(label, secondary, tags, synonyms)| {
            let entry = Entry::new(label).tags(tags).synonyms(synonyms);
            match secondary {
                Some(text) => entry.secondary(text),
                None => entry,
            }
        })
}

fn index_strategy() -> impl Strategy<Value = SearchIndex> {
    prop::collection::vec(entry_strategy(), 0..24).prop_map(|entries| {
        SearchIndex::new(Catalog::new(entries).expect("labels start with a non-space character"))
    })
}

proptest! {
    #[test]
    fn prop_blank_query_matches_everything(index in index_strategy(), blank in "[ \t]{0,4}") {
        prop_assert_eq!(index.filter(&blank).len(), index.len());
    }

    #[test]
    fn prop_extra_token_only_narrows(
        index in index_strategy(),
        query in "[a-z ]{0,8}",
        extra in "[a-z]{1,4}"
    ) {
        let broad = index.filter(&query);
        let narrow = index.filter(&format!("{query} {extra}"));
        prop_assert!(narrow.len() <= broad.len());
        for id in narrow.ids() {
            prop_assert!(broad.contains(*id));
        }
    }

    #[test]
    fn prop_longer_token_only_narrows(
        index in index_strategy(),
        query in "[a-z]{1,6}",
        suffix in "[a-z]{1,3}"
    ) {
        let broad = index.filter(&query);
        let narrow = index.filter(&format!("{query}{suffix}"));
        for id in narrow.ids() {
            prop_assert!(broad.contains(*id));
        }
    }

    #[test]
    fn prop_query_case_is_irrelevant(index in index_strategy(), query in "[a-zA-Z ]{0,10}") {
        let upper = index.filter(&query.to_uppercase());
        let lower = index.filter(&query.to_lowercase());
        prop_assert_eq!(upper.ids(), lower.ids());
    }

    #[test]
    fn prop_tokens_are_lowercase_and_nonempty(raw in "[A-Za-z0-9 \\t.$-]{0,24}") {
        for token in tokenize(&raw) {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.chars().any(char::is_whitespace));
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }

    #[test]
    fn prop_grouping_partitions_result(index in index_strategy(), query in "[a-z ]{0,6}") {
        let result = index.filter(&query);
        let grouped = result.grouped();

        prop_assert_eq!(grouped.total(), result.len());
        let mut seen: Vec<_> = grouped.ids_in_order().collect();
        seen.sort();
        prop_assert_eq!(seen.as_slice(), result.ids());

        for (key, ids) in grouped.iter() {
            prop_assert!(!ids.is_empty());
            let labels: Vec<&str> = ids
                .iter()
                .filter_map(|id| index.entry(*id).map(|entry| entry.label.as_str()))
                .collect();
            for label in &labels {
                prop_assert_eq!(GroupKey::of(label), key);
            }
            for pair in labels.windows(2) {
                prop_assert!(pair[0].to_lowercase() <= pair[1].to_lowercase());
            }
        }
    }

    #[test]
    fn prop_grouping_is_deterministic(index in index_strategy(), query in "[a-z ]{0,6}") {
        let result = index.filter(&query);
        prop_assert_eq!(result.grouped(), group(result.entries()));
        prop_assert_eq!(result.grouped(), index.filter(&query).grouped());
    }

    #[test]
    fn prop_persisted_query_round_trips(
        values in prop::collection::vec("\\PC{0,12}", 1..6),
        coalesced in any::<bool>()
    ) {
        let mode = if coalesced { WriteMode::Coalesced } else { WriteMode::Immediate };
        let mut persistence = QueryPersistence::new(MemoryStore::new(), "q", mode);
        for value in &values {
            persistence.save(value);
        }
        let store = persistence.into_store();

        let mut restored = QueryPersistence::new(store, "q", WriteMode::Immediate);
        prop_assert_eq!(restored.load(), values.last().cloned().unwrap_or_default());
    }
}
