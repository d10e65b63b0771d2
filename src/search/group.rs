//! Alphabetical grouping of matched entries.
//!
//! Entries are bucketed by the first letter of their label. Labels that do
//! not start with an ASCII letter share one catch-all bucket, rendered after
//! `Z`. Within a bucket entries read A→Z regardless of catalog order.

use crate::catalog::{Entry, EntryId};
use std::{cmp::Ordering, collections::BTreeMap, fmt, str::FromStr};

/// Marker shown for the catch-all bucket.
pub const OTHER_MARKER: char = '#';

/// Bucket key for an entry.
///
/// Ordering puts every letter before [`GroupKey::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    /// Uppercase ASCII letter.
    Letter(char),
    /// Digits, symbols and non-ASCII leading characters.
    Other,
}

impl GroupKey {
    /// Derive the key from a label's first character.
    pub fn of(label: &str) -> Self {
        match label.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => Self::Letter(c.to_ascii_uppercase()),
            _ => Self::Other,
        }
    }

    /// Every possible key in render order: `A..=Z` then the catch-all.
    pub fn all() -> impl Iterator<Item = Self> {
        ('A'..='Z').map(Self::Letter).chain(std::iter::once(Self::Other))
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Letter(c) => c,
            Self::Other => OTHER_MARKER,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error returned when parsing a [`GroupKey`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a group key")]
pub struct ParseGroupKeyError(pub String);

impl FromStr for GroupKey {
    type Err = ParseGroupKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(OTHER_MARKER), None) => Ok(Self::Other),
            (Some(c), None) if c.is_ascii_alphabetic() => Ok(Self::Letter(c.to_ascii_uppercase())),
            _ => Err(ParseGroupKeyError(s.to_string())),
        }
    }
}

/// Case-insensitive label order, falling back to the exact label so the
/// comparison is total.
pub(crate) fn compare_labels(a_folded: &str, a: &str, b_folded: &str, b: &str) -> Ordering {
    a_folded.cmp(b_folded).then_with(|| a.cmp(b))
}

/// One item fed to [`GroupedIndex::build`].
pub(crate) struct Keyed<'a> {
    pub(crate) key: GroupKey,
    pub(crate) id: EntryId,
    pub(crate) folded: &'a str,
    pub(crate) label: &'a str,
}

/// Matched entries partitioned into alphabetical buckets.
///
/// Only non-empty buckets are present; callers use presence to decide
/// whether to draw a section header or enable a jump-to-letter control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedIndex {
    groups: BTreeMap<GroupKey, Vec<EntryId>>,
}

impl GroupedIndex {
    /// Bucket pre-keyed items and sort each bucket.
    ///
    /// Ties on label fall back to catalog position.
    pub(crate) fn build<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = Keyed<'a>>,
    {
        let mut buckets: BTreeMap<GroupKey, Vec<Keyed<'a>>> = BTreeMap::new();
        for item in items {
            buckets.entry(item.key).or_default().push(item);
        }

        let groups: BTreeMap<GroupKey, Vec<EntryId>> = buckets
            .into_iter()
            .map(|(key, mut bucket)| {
                bucket.sort_by(|a, b| {
                    compare_labels(a.folded, a.label, b.folded, b.label).then(a.id.cmp(&b.id))
                });
                (key, bucket.into_iter().map(|item| item.id).collect())
            })
            .collect();

        Self { groups }
    }

    /// Present keys in render order.
    pub fn keys(&self) -> impl Iterator<Item = GroupKey> + '_ {
        self.groups.keys().copied()
    }

    pub fn get(&self, key: GroupKey) -> Option<&[EntryId]> {
        self.groups.get(&key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: GroupKey) -> bool {
        self.groups.contains_key(&key)
    }

    /// Buckets in render order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupKey, &[EntryId])> {
        self.groups.iter().map(|(key, ids)| (*key, ids.as_slice()))
    }

    /// Entries in render order: bucket by bucket, sorted within each.
    pub fn ids_in_order(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.groups.values().flatten().copied()
    }

    /// First entry in render order, if any.
    pub fn first(&self) -> Option<EntryId> {
        self.ids_in_order().next()
    }

    /// Total number of entries across all buckets.
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Which jump-to-letter controls should be enabled.
    pub fn letter_bar(&self) -> LetterBar {
        LetterBar::from_present(self.keys())
    }
}

/// Group an ordered sequence of entries.
///
/// Pure: the same input always produces the same buckets in the same order.
pub fn group<'a, I>(entries: I) -> GroupedIndex
where
    I: IntoIterator<Item = (EntryId, &'a Entry)>,
{
    let prepared: Vec<(EntryId, &Entry, String)> = entries
        .into_iter()
        .map(|(id, entry)| (id, entry, entry.label.to_lowercase()))
        .collect();

    GroupedIndex::build(prepared.iter().map(|(id, entry, folded)| Keyed {
        key: GroupKey::of(&entry.label),
        id: *id,
        folded,
        label: &entry.label,
    }))
}

/// The glossary's A–Z (plus `#`) jump strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterBar {
    slots: Vec<(GroupKey, bool)>,
}

impl LetterBar {
    /// Enable exactly the slots whose group is present.
    pub fn from_present<I>(present: I) -> Self
    where
        I: IntoIterator<Item = GroupKey>,
    {
        let present: Vec<GroupKey> = present.into_iter().collect();
        Self {
            slots: GroupKey::all()
                .map(|key| (key, present.contains(&key)))
                .collect(),
        }
    }

    /// Every slot in display order with its enabled flag.
    pub fn iter(&self) -> impl Iterator<Item = (GroupKey, bool)> + '_ {
        self.slots.iter().copied()
    }

    pub fn is_enabled(&self, key: GroupKey) -> bool {
        self.slots
            .iter()
            .any(|(slot, enabled)| *slot == key && *enabled)
    }

    pub fn enabled(&self) -> impl Iterator<Item = GroupKey> + '_ {
        self.iter()
            .filter_map(|(key, enabled)| enabled.then_some(key))
    }
}
