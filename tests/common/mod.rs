//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `scenario_index`: the three-entry catalog used by the end-to-end scenario
//! - `glossary_index`: a realistic glossary with synonyms, tags and a
//!   catch-all entry, loaded from JSON the way a site embeds it
//! - `sidebar_index`: navigation links with targets, in page order
//!
//! `RecordingNavigator` and `RecordingScroller` stand in for the host's
//! router and scroll container; `SharedStore` for its session storage.

#![allow(dead_code)] // Each integration test crate uses a different subset

use docsite_search::{
    AnchorId, Catalog, Entry, EntryId, MemoryStore, Navigator, ScrollAlign, ScrollBehavior,
    ScrollError, Scroller, SearchIndex, SessionStore, StorageError,
};
use rstest::fixture;
use std::{cell::RefCell, rc::Rc};

/// Catalog from the end-to-end scenario: Action, AbortController, Selector.
pub fn scenario_catalog() -> Catalog {
    Catalog::builder()
        .push(Entry::new("Action").tags(["core"]).target("/glossary#action"))
        .push(
            Entry::new("AbortController")
                .tags(["async"])
                .target("/glossary#abortcontroller"),
        )
        .push(
            Entry::new("Selector")
                .tags(["core", "perf"])
                .target("/glossary#selector"),
        )
        .build()
        .expect("scenario catalog is valid")
}

#[fixture]
pub fn scenario_index() -> SearchIndex {
    docsite_search::tracing::init();
    SearchIndex::new(scenario_catalog())
}

pub const GLOSSARY_JSON: &str = r#"[
    {"label": "Store", "secondaryText": "The object holding the whole state tree", "tags": ["core"], "targetPath": "/glossary#store"},
    {"label": "Reducer", "secondaryText": "A pure function of state and action returning new state", "tags": ["core"], "synonyms": ["reducing function"], "targetPath": "/glossary#reducer"},
    {"label": "Action", "secondaryText": "A plain object describing what happened", "tags": ["core"], "targetPath": "/glossary#action"},
    {"label": "Thunk", "secondaryText": "A function returned by an action creator for async logic", "tags": ["async", "middleware"], "targetPath": "/glossary#thunk"},
    {"label": "Middleware", "secondaryText": "Extension point between dispatching an action and the reducer", "tags": ["advanced"], "targetPath": "/glossary#middleware"},
    {"label": "Immer", "secondaryText": "Library for writing immutable updates with mutable syntax", "synonyms": ["immutable updates", "produce"], "targetPath": "/glossary#immer"},
    {"label": "Devtools", "secondaryText": "Browser extension for time-travel debugging", "tags": ["tooling"], "synonyms": ["time travel"], "targetPath": "/glossary#devtools"},
    {"label": "action creator", "secondaryText": "A function that returns an action", "tags": ["core"], "targetPath": "/glossary#action-creator"},
    {"label": "Selector", "secondaryText": "Derives data from the state tree", "tags": ["core", "perf"], "synonyms": ["memoized selector"], "targetPath": "/glossary#selector"},
    {"label": "$state", "secondaryText": "Conventional name for the root state in examples", "targetPath": "/glossary#state-var"}
]"#;

#[fixture]
pub fn glossary_index() -> SearchIndex {
    docsite_search::tracing::init();
    SearchIndex::new(Catalog::from_json(GLOSSARY_JSON).expect("glossary catalog is valid"))
}

#[fixture]
pub fn sidebar_index() -> SearchIndex {
    docsite_search::tracing::init();
    let links = [
        ("Getting Started", "/docs/getting-started"),
        ("Core Concepts", "/docs/core-concepts"),
        ("Actions", "/docs/actions"),
        ("Reducers", "/docs/reducers"),
        ("Selectors", "/docs/selectors"),
        ("Theme Tokens", "/docs/theme"),
        ("Middleware", "/docs/middleware"),
        ("Cheatsheet", "/cheatsheet"),
    ];
    let catalog = Catalog::new(
        links
            .into_iter()
            .map(|(label, path)| {
                Entry::new(label)
                    .target(path)
                    .secondary(format!("Go to {}", label))
            })
            .collect(),
    )
    .expect("sidebar catalog is valid");
    SearchIndex::new(catalog)
}

/// Navigator that records every target it is asked to route to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, target_path: &str) {
        self.visited.push(target_path.to_string());
    }
}

/// Scroller that records requests and can be told to refuse smooth scrolling.
#[derive(Debug, Default)]
pub struct RecordingScroller {
    pub smooth: bool,
    pub requests: Vec<(AnchorId, ScrollBehavior, ScrollAlign)>,
}

impl RecordingScroller {
    pub fn smooth() -> Self {
        Self {
            smooth: true,
            requests: Vec::new(),
        }
    }
}

impl Scroller for RecordingScroller {
    fn supports_smooth(&self) -> bool {
        self.smooth
    }

    fn scroll_into_view(
        &mut self,
        anchor: &AnchorId,
        behavior: ScrollBehavior,
        align: ScrollAlign,
    ) -> Result<(), ScrollError> {
        self.requests.push((anchor.clone(), behavior, align));
        Ok(())
    }
}

/// Store handle that outlives the session owning a clone of it, so tests
/// can inspect what was persisted after the session is gone.
#[derive(Debug, Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl SessionStore for SharedStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.borrow().get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().remove_item(key)
    }
}

/// Labels of a set of ids, for readable assertions.
pub fn labels<I>(index: &SearchIndex, ids: I) -> Vec<String>
where
    I: IntoIterator<Item = EntryId>,
{
    ids.into_iter()
        .filter_map(|id| index.entry(id).map(|entry| entry.label.clone()))
        .collect()
}
