//! Client-side search over a fixed catalog.
//!
//! This module provides tokenization, AND-of-substring matching and
//! alphabetical grouping, tied together by [`SearchIndex`].

// Module declarations
pub(crate) mod group;
pub(crate) mod index;
pub(crate) mod matching;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use group::{GroupKey, GroupedIndex, LetterBar, OTHER_MARKER, ParseGroupKeyError, group};
pub use index::{MatchResult, SearchIndex};
pub use matching::{Haystack, is_match};
pub use tokenize::tokenize;
