//! Re-render from the grouped result on every change.

use super::{RenderStrategy, StrategyKind};
use crate::{
    catalog::EntryId,
    search::{GroupKey, MatchResult},
};
use ahash::AHashSet;

/// Holds only what is currently visible, recomputed from scratch each time.
#[derive(Debug, Clone, Default)]
pub struct DerivedView {
    groups: Vec<(GroupKey, Vec<EntryId>)>,
    visible: AHashSet<EntryId>,
    renders: usize,
}

impl DerivedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered sections in order.
    pub fn groups(&self) -> &[(GroupKey, Vec<EntryId>)] {
        &self.groups
    }

    /// How many times the view has been rebuilt.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl RenderStrategy for DerivedView {
    fn render(&mut self, result: &MatchResult<'_>) {
        let grouped = result.grouped();
        self.groups = grouped
            .iter()
            .map(|(key, ids)| (key, ids.to_vec()))
            .collect();
        self.visible = grouped.ids_in_order().collect();
        self.renders += 1;
    }

    fn is_entry_visible(&self, id: EntryId) -> bool {
        self.visible.contains(&id)
    }

    fn is_header_visible(&self, key: GroupKey) -> bool {
        self.groups.iter().any(|(group, _)| *group == key)
    }

    fn match_count(&self) -> usize {
        self.visible.len()
    }

    fn visible_in_order(&self) -> Vec<EntryId> {
        self.groups
            .iter()
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect()
    }

    fn visible_headers(&self) -> Vec<GroupKey> {
        self.groups.iter().map(|(key, _)| *key).collect()
    }

    fn first_visible(&self) -> Option<EntryId> {
        self.groups.first().and_then(|(_, ids)| ids.first().copied())
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Derived
    }
}
