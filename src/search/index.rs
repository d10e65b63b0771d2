//! Prepared search index over a fixed catalog.

use crate::catalog::{Catalog, Entry, EntryId};
use std::sync::Arc;

use super::{
    group::{GroupKey, GroupedIndex, Keyed},
    matching::Haystack,
    tokenize::tokenize,
};

/// Per-entry data derived once at construction.
#[derive(Debug)]
struct Prepared {
    haystack: Haystack,
    key: GroupKey,
    /// Lowercased label for in-bucket sorting
    folded: String,
}

/// A catalog with every entry's haystack and group key computed up front.
///
/// Construct one per catalog and hand it to whichever view needs it.
/// Cloning shares the prepared data.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    catalog: Catalog,
    prepared: Arc<[Prepared]>,
}

impl SearchIndex {
    pub fn new(catalog: Catalog) -> Self {
        let start = std::time::Instant::now();

        let prepared: Arc<[Prepared]> = catalog
            .entries()
            .iter()
            .map(|entry| Prepared {
                haystack: Haystack::from_entry(entry),
                key: GroupKey::of(&entry.label),
                folded: entry.label.to_lowercase(),
            })
            .collect();

        let index = Self { catalog, prepared };

        tracing::info!(
            "Built search index: {} entries, {} groups in {:?}",
            index.catalog.len(),
            index.all().grouped().len(),
            start.elapsed()
        );

        index
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.catalog.get(id)
    }

    /// The precomputed group key of an entry.
    pub fn group_key(&self, id: EntryId) -> Option<GroupKey> {
        self.prepared.get(id.0).map(|p| p.key)
    }

    pub fn haystack(&self, id: EntryId) -> Option<&Haystack> {
        self.prepared.get(id.0).map(|p| &p.haystack)
    }

    /// Tokenize `raw` and keep the entries matching every token, in
    /// catalog order.
    pub fn filter(&self, raw: &str) -> MatchResult<'_> {
        let result = self.filter_tokens(tokenize(raw));
        tracing::trace!(
            query = raw,
            tokens = result.tokens.len(),
            matches = result.len(),
            "Filtered catalog"
        );
        result
    }

    /// Filter with already-tokenized input.
    pub fn filter_tokens(&self, tokens: Vec<String>) -> MatchResult<'_> {
        let ids = self
            .prepared
            .iter()
            .enumerate()
            .filter(|(_, p)| p.haystack.matches(&tokens))
            .map(|(i, _)| EntryId(i))
            .collect();

        MatchResult {
            index: self,
            tokens,
            ids,
        }
    }

    /// The unfiltered view: every entry.
    pub fn all(&self) -> MatchResult<'_> {
        MatchResult {
            index: self,
            tokens: vec![],
            ids: (0..self.len()).map(EntryId).collect(),
        }
    }

    /// Group an arbitrary subset of this index's entries.
    ///
    /// Ids outside the catalog are skipped.
    pub fn group_ids<I>(&self, ids: I) -> GroupedIndex
    where
        I: IntoIterator<Item = EntryId>,
    {
        GroupedIndex::build(ids.into_iter().filter_map(|id| {
            let prepared = self.prepared.get(id.0)?;
            Some(Keyed {
                key: prepared.key,
                id,
                folded: &prepared.folded,
                label: &self.catalog[id].label,
            })
        }))
    }
}

/// Entries satisfying a query, in catalog order.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    index: &'a SearchIndex,
    tokens: Vec<String>,
    ids: Vec<EntryId>,
}

impl<'a> MatchResult<'a> {
    pub fn index(&self) -> &'a SearchIndex {
        self.index
    }

    /// The tokens this result was filtered with.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn ids(&self) -> &[EntryId] {
        &self.ids
    }

    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &'a Entry)> + '_ {
        self.ids.iter().map(|id| (*id, &self.index.catalog[*id]))
    }

    pub fn labels(&self) -> Vec<&'a str> {
        self.entries().map(|(_, e)| e.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: EntryId) -> bool {
        // ids are ascending because filtering walks the catalog in order
        self.ids.binary_search(&id).is_ok()
    }

    /// Bucket this result for alphabetical display.
    pub fn grouped(&self) -> GroupedIndex {
        self.index.group_ids(self.ids.iter().copied())
    }
}
