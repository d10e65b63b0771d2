//! Immutable catalog of searchable entries.
//!
//! A catalog is fixed when the site is built: sidebar links or glossary terms
//! embedded as literal data. The search core only ever filters and groups a
//! read-only view of it.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Index, sync::Arc};

/// Position of an entry in its catalog.
///
/// Entries never move, so the position doubles as a stable identity for
/// render strategies and sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub usize);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One searchable record: a navigation link or a glossary term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Primary display text.
    pub label: String,
    /// Tooltip, description or full definition. Searched but usually not shown.
    #[serde(default, alias = "secondaryText", skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Alternate terms ("aka") that should find this entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    /// Opaque destination handed to the host's router.
    #[serde(default, alias = "targetPath", skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
}

impl Entry {
    /// Create an entry with only a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            secondary_text: None,
            tags: Vec::new(),
            synonyms: Vec::new(),
            target_path: None,
        }
    }

    pub fn secondary(mut self, text: impl Into<String>) -> Self {
        self.secondary_text = Some(text.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    pub fn target(mut self, path: impl Into<String>) -> Self {
        self.target_path = Some(path.into());
        self
    }
}

/// A validated, immutable list of entries.
///
/// Cloning is cheap: the entries live behind an `Arc` shared by every clone.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Arc<[Entry]>,
}

impl Catalog {
    /// Validate and freeze a list of entries.
    ///
    /// Every entry must have a non-blank label; this is the only place that
    /// requirement is checked.
    pub fn new(entries: Vec<Entry>) -> Result<Self, CatalogError> {
        if let Some(index) = entries
            .iter()
            .position(|entry| entry.label.trim().is_empty())
        {
            return Err(CatalogError::EmptyLabel { index });
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Parse a catalog from a JSON array literal, typically embedded with
    /// `include_str!`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<Entry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Start building a catalog in code.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.0)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate entries together with their ids, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (EntryId(i), entry))
    }
}

impl Index<EntryId> for Catalog {
    type Output = Entry;

    fn index(&self, id: EntryId) -> &Self::Output {
        &self.entries[id.0]
    }
}

/// Chained construction for catalogs written in code.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<Entry>,
}

impl CatalogBuilder {
    /// Append a fully built entry.
    pub fn push(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Append a label-only entry.
    pub fn label(self, label: impl Into<String>) -> Self {
        self.push(Entry::new(label))
    }

    pub fn build(self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[test]
    fn test_builder_preserves_order() {
        let catalog = Catalog::builder()
            .label("Selector")
            .push(Entry::new("Action").tags(["core"]).target("/docs/action"))
            .build()
            .unwrap();

        check!(catalog.len() == 2);
        check!(catalog[EntryId(0)].label == "Selector");
        check!(catalog[EntryId(1)].target_path.as_deref() == Some("/docs/action"));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_label_rejected(#[case] label: &str) {
        let result = Catalog::new(vec![Entry::new("Store"), Entry::new(label)]);
        let_assert!(Err(CatalogError::EmptyLabel { index }) = result);
        check!(index == 1);
    }

    #[test]
    fn test_from_json_accepts_camel_case_fields() {
        let json = r#"[
            {"label": "Thunk", "secondaryText": "A function returned by an action creator", "targetPath": "/glossary#thunk"},
            {"label": "Slice", "tags": ["core"], "synonyms": ["reducer module"]}
        ]"#;

        let catalog = Catalog::from_json(json).unwrap();
        check!(catalog.len() == 2);
        check!(catalog[EntryId(0)].target_path.as_deref() == Some("/glossary#thunk"));
        check!(catalog[EntryId(1)].synonyms == vec!["reducer module".to_string()]);
        check!(catalog[EntryId(1)].secondary_text.is_none());
    }

    #[test]
    fn test_from_json_missing_label_is_error() {
        let result = Catalog::from_json(r#"[{"tags": ["core"]}]"#);
        check!(matches!(result, Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_clone_shares_entries() {
        let catalog = Catalog::builder().label("Middleware").build().unwrap();
        let clone = catalog.clone();
        check!(std::ptr::eq(catalog.entries(), clone.entries()));
    }
}
