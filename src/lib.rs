//! Search, grouping and keyboard navigation for a documentation site's
//! sidebar filter and glossary browser.
//!
//! Build a [`SearchIndex`] once from a [`Catalog`], then mount a
//! [`SearchSession`] per search box. The session owns the query, persists it
//! to a [`SessionStore`], renders through a [`RenderStrategy`] and reacts to
//! key chords via [`KeyboardController`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod persist;
pub mod render;
pub mod scroll;
pub mod search;
pub mod session;
pub mod tracing;

pub use catalog::{Catalog, CatalogBuilder, Entry, EntryId};
pub use config::SearchConfig;
pub use error::{CatalogError, ConfigError, Error, Result, ScrollError, StorageError};
pub use keyboard::{
    InputSurface, Key, KeyAction, KeyEvent, KeyboardController, ListenerGuard, LocalSurface,
    Modifiers, Platform,
};
pub use persist::{MemoryStore, QueryPersistence, SessionStore, WriteMode};
pub use render::{AttributeTree, DerivedView, RenderStrategy, StrategyKind};
pub use scroll::{
    AnchorId, JumpOutcome, ScrollAlign, ScrollBehavior, ScrollContainer, ScrollNavigator, Scroller,
};
pub use search::{GroupKey, GroupedIndex, LetterBar, MatchResult, SearchIndex, group, is_match, tokenize};
pub use session::{Navigator, QueryInput, SearchSession, SessionOutcome, bind_keyboard};
