//! Static tree with per-row visibility markers.

use super::{RenderStrategy, StrategyKind};
use crate::{
    catalog::EntryId,
    search::{GroupKey, MatchResult, SearchIndex},
};
use ahash::AHashMap;

/// Marker a web host sets on hidden rows.
pub const HIDDEN_ATTRIBUTE: &str = "data-search-hidden";

/// One row of the rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Header { key: GroupKey, hidden: bool },
    Entry { id: EntryId, hidden: bool },
}

impl Row {
    pub const fn is_hidden(&self) -> bool {
        match self {
            Self::Header { hidden, .. } | Self::Entry { hidden, .. } => *hidden,
        }
    }

    pub const fn is_header(&self) -> bool {
        matches!(self, Self::Header { .. })
    }

    /// The attribute to set on the row's element, if any.
    pub const fn attribute(&self) -> Option<&'static str> {
        if self.is_hidden() {
            Some(HIDDEN_ATTRIBUTE)
        } else {
            None
        }
    }
}

/// The full catalog rendered once; filtering only flips markers.
///
/// Rows are never added, removed or reordered after construction, so focus
/// and scroll state on unrelated rows survive every keystroke.
#[derive(Debug, Clone)]
pub struct AttributeTree {
    rows: Vec<Row>,
    /// Row position of every entry
    positions: AHashMap<EntryId, usize>,
    headers: AHashMap<GroupKey, usize>,
}

impl AttributeTree {
    pub fn new(index: &SearchIndex) -> Self {
        let grouped = index.all().grouped();
        let mut rows = Vec::with_capacity(index.len() + grouped.len());
        let mut positions = AHashMap::with_capacity(index.len());
        let mut headers = AHashMap::with_capacity(grouped.len());

        for (key, ids) in grouped.iter() {
            headers.insert(key, rows.len());
            rows.push(Row::Header { key, hidden: false });
            for id in ids {
                positions.insert(*id, rows.len());
                rows.push(Row::Entry {
                    id: *id,
                    hidden: false,
                });
            }
        }

        Self {
            rows,
            positions,
            headers,
        }
    }

    /// The static rows in render order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn refresh_headers(&mut self) {
        for position in 0..self.rows.len() {
            if !self.rows[position].is_header() {
                continue;
            }

            let any_visible = self.rows[position + 1..]
                .iter()
                .take_while(|row| !row.is_header())
                .any(|row| !row.is_hidden());

            if let Row::Header { hidden, .. } = &mut self.rows[position] {
                *hidden = !any_visible;
            }
        }
    }
}

impl RenderStrategy for AttributeTree {
    fn render(&mut self, result: &MatchResult<'_>) {
        for row in &mut self.rows {
            if let Row::Entry { id, hidden } = row {
                *hidden = !result.contains(*id);
            }
        }
        self.refresh_headers();
    }

    fn is_entry_visible(&self, id: EntryId) -> bool {
        self.positions
            .get(&id)
            .is_some_and(|position| !self.rows[*position].is_hidden())
    }

    fn is_header_visible(&self, key: GroupKey) -> bool {
        self.headers
            .get(&key)
            .is_some_and(|position| !self.rows[*position].is_hidden())
    }

    fn match_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| !row.is_header() && !row.is_hidden())
            .count()
    }

    fn visible_in_order(&self) -> Vec<EntryId> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                Row::Entry { id, hidden: false } => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn visible_headers(&self) -> Vec<GroupKey> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                Row::Header { key, hidden: false } => Some(*key),
                _ => None,
            })
            .collect()
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Attribute
    }
}
