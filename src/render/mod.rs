//! Presentation of filtered results.
//!
//! Two mechanisms share one observable contract: which entries are visible,
//! which group headers are visible, and how many entries matched.
//! [`AttributeTree`] renders the whole catalog once and toggles a hidden
//! marker per row; [`DerivedView`] rebuilds only the matched groups on every
//! change.

pub(crate) mod attribute;
pub(crate) mod derived;

pub use attribute::{AttributeTree, HIDDEN_ATTRIBUTE, Row};
pub use derived::DerivedView;

use crate::{
    catalog::EntryId,
    search::{GroupKey, MatchResult, SearchIndex},
};
use serde::{Deserialize, Serialize};

/// Visible-set contract shared by both render mechanisms.
pub trait RenderStrategy {
    /// Apply a new filter result.
    fn render(&mut self, result: &MatchResult<'_>);

    fn is_entry_visible(&self, id: EntryId) -> bool;

    fn is_header_visible(&self, key: GroupKey) -> bool;

    /// Number of visible entries.
    fn match_count(&self) -> usize;

    /// Visible entries in render order: group by group, A→Z within each.
    fn visible_in_order(&self) -> Vec<EntryId>;

    /// Group keys whose header is visible, in render order.
    fn visible_headers(&self) -> Vec<GroupKey>;

    /// The entry Enter would activate.
    fn first_visible(&self) -> Option<EntryId> {
        self.visible_in_order().first().copied()
    }

    fn kind(&self) -> StrategyKind;
}

/// Which render mechanism a search instance uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Rebuild from the grouped result on every change.
    #[default]
    Derived,
    /// Static tree with per-row hidden markers.
    Attribute,
}

impl StrategyKind {
    /// Build an unfiltered strategy for `index`.
    pub fn build(self, index: &SearchIndex) -> Box<dyn RenderStrategy> {
        match self {
            Self::Derived => {
                let mut view = DerivedView::new();
                view.render(&index.all());
                Box::new(view)
            }
            Self::Attribute => Box::new(AttributeTree::new(index)),
        }
    }
}
