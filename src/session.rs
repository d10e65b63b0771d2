//! A mounted search instance: query box, filter, render and navigation.
//!
//! [`SearchSession`] is what a hosting view owns between mount and unmount.
//! It restores the persisted query once on mount, re-renders and persists on
//! every query mutation, and applies keyboard actions.

use crate::{
    catalog::EntryId,
    config::SearchConfig,
    keyboard::{InputSurface, KeyAction, KeyEvent, KeyboardController, ListenerGuard},
    persist::{QueryPersistence, SessionStore},
    render::RenderStrategy,
    scroll::{AnchorId, JumpOutcome, ScrollNavigator, Scroller},
    search::{GroupKey, LetterBar, SearchIndex},
};
use std::{cell::RefCell, fmt, rc::Rc};

/// The host's router.
pub trait Navigator {
    /// Route to an opaque target path.
    fn navigate(&mut self, target_path: &str);
}

impl<F: FnMut(&str)> Navigator for F {
    fn navigate(&mut self, target_path: &str) {
        self(target_path);
    }
}

/// State of the search text box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    value: String,
    focused: bool,
    /// Whole value selected; the next keystroke replaces it
    all_selected: bool,
}

impl QueryInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    fn set(&mut self, value: &str) {
        value.clone_into(&mut self.value);
        self.all_selected = false;
    }

    fn insert(&mut self, c: char) {
        if self.all_selected {
            self.value.clear();
            self.all_selected = false;
        }
        self.value.push(c);
    }

    fn delete_back(&mut self) {
        if self.all_selected {
            self.value.clear();
            self.all_selected = false;
        } else {
            self.value.pop();
        }
    }

    fn focus(&mut self, select_all: bool) {
        self.focused = true;
        self.all_selected = select_all && !self.value.is_empty();
    }

    fn blur(&mut self) {
        self.focused = false;
        self.all_selected = false;
    }
}

/// What [`SearchSession::handle_key`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The event was not for this session.
    Unhandled,
    /// Query box focused with its contents selected.
    Focused,
    /// Query reset to empty.
    Cleared,
    /// Navigated to this entry's target.
    Activated(EntryId),
    /// Enter with no visible result, or a result without a target.
    NothingToActivate,
}

impl SessionOutcome {
    pub const fn prevents_default(self) -> bool {
        matches!(
            self,
            Self::Focused | Self::Activated(_) | Self::NothingToActivate
        )
    }
}

pub struct SearchSession<S: SessionStore> {
    index: SearchIndex,
    input: QueryInput,
    persistence: QueryPersistence<S>,
    strategy: Box<dyn RenderStrategy>,
    keyboard: KeyboardController,
    scroll: ScrollNavigator,
    anchor_prefix: String,
}

impl<S: SessionStore> SearchSession<S> {
    /// Mount a search instance, seeding the query from `store`.
    pub fn mount(index: SearchIndex, config: &SearchConfig, store: S) -> Self {
        let mut persistence =
            QueryPersistence::new(store, config.storage_key.as_str(), config.write_mode);
        let restored = persistence.load();
        if !restored.is_empty() {
            tracing::debug!("Restored query '{}' from '{}'", restored, config.storage_key);
        }

        let strategy = config.strategy.build(&index);
        let mut session = Self {
            index,
            input: QueryInput::default(),
            persistence,
            strategy,
            keyboard: KeyboardController::new(config.platform, config.find_key),
            scroll: ScrollNavigator::new(config.scroll_align),
            anchor_prefix: config.anchor_prefix.clone(),
        };
        session.input.set(&restored);
        session.refresh();
        session
    }

    /// Persist any pending query and give back the store. Dropping the
    /// session instead also persists it, but keeps the store.
    pub fn unmount(self) -> S {
        self.persistence.into_store()
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn query(&self) -> &str {
        self.input.value()
    }

    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    pub fn strategy(&self) -> &dyn RenderStrategy {
        self.strategy.as_ref()
    }

    pub fn scroll_navigator(&self) -> &ScrollNavigator {
        &self.scroll
    }

    /// Replace the whole query.
    pub fn set_query(&mut self, value: &str) {
        self.input.set(value);
        self.changed();
    }

    /// A keystroke typed into the focused box.
    pub fn type_char(&mut self, c: char) {
        self.input.insert(c);
        self.changed();
    }

    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.input.insert(c);
        }
        self.changed();
    }

    pub fn backspace(&mut self) {
        self.input.delete_back();
        self.changed();
    }

    pub fn clear(&mut self) {
        self.set_query("");
    }

    /// Focus the box without selecting (a click).
    pub fn focus(&mut self) {
        self.input.focus(false);
    }

    pub fn blur(&mut self) {
        self.input.blur();
    }

    /// Apply a global key event.
    pub fn handle_key(&mut self, event: &KeyEvent, navigator: &mut dyn Navigator) -> SessionOutcome {
        let action = self.keyboard.handle(event, self.input.is_focused());
        if action != KeyAction::Ignore {
            tracing::debug!("Key {:?} -> {:?}", event.key, action);
        }

        match action {
            KeyAction::FocusQuery => {
                self.input.focus(true);
                SessionOutcome::Focused
            }
            KeyAction::ClearQuery => {
                self.clear();
                SessionOutcome::Cleared
            }
            KeyAction::ActivateFirst => self.activate_first(navigator),
            KeyAction::Ignore => SessionOutcome::Unhandled,
        }
    }

    /// Navigate to the first visible result, as if it were clicked.
    ///
    /// The query is left untouched.
    pub fn activate_first(&self, navigator: &mut dyn Navigator) -> SessionOutcome {
        let Some(id) = self.strategy.first_visible() else {
            tracing::debug!("Enter with no visible results for '{}'", self.query());
            return SessionOutcome::NothingToActivate;
        };

        match self
            .index
            .entry(id)
            .and_then(|entry| entry.target_path.as_deref())
        {
            Some(target) => {
                navigator.navigate(target);
                SessionOutcome::Activated(id)
            }
            None => {
                tracing::debug!("First result {} has no target path", id);
                SessionOutcome::NothingToActivate
            }
        }
    }

    /// Scroll a group header into view.
    pub fn jump_to(&self, key: GroupKey, scroller: &mut dyn Scroller) -> JumpOutcome {
        self.scroll.jump_to(key, scroller)
    }

    pub fn visible_count(&self) -> usize {
        self.strategy.match_count()
    }

    pub fn is_entry_visible(&self, id: EntryId) -> bool {
        self.strategy.is_entry_visible(id)
    }

    pub fn is_header_visible(&self, key: GroupKey) -> bool {
        self.strategy.is_header_visible(key)
    }

    /// Visible entry labels in render order.
    pub fn visible_labels(&self) -> Vec<&str> {
        self.strategy
            .visible_in_order()
            .into_iter()
            .filter_map(|id| self.index.entry(id).map(|entry| entry.label.as_str()))
            .collect()
    }

    pub fn letter_bar(&self) -> LetterBar {
        LetterBar::from_present(self.strategy.visible_headers())
    }

    fn changed(&mut self) {
        self.persistence.save(self.input.value());
        self.refresh();
    }

    fn refresh(&mut self) {
        let result = self.index.filter(self.input.value());
        self.strategy.render(&result);

        let prefix = &self.anchor_prefix;
        self.scroll.sync(self.strategy.visible_headers(), |key| {
            AnchorId::for_group(prefix, key)
        });
    }
}

impl<S: SessionStore> fmt::Debug for SearchSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSession")
            .field("query", &self.input.value())
            .field("focused", &self.input.is_focused())
            .field("strategy", &self.strategy.kind())
            .field("visible", &self.strategy.match_count())
            .finish()
    }
}

/// Attach `session`'s key handling to a page-wide input surface.
///
/// The returned guard must live as long as the view; dropping it removes
/// the listener. Events arriving while the session or navigator is already
/// borrowed are ignored.
pub fn bind_keyboard<S, I, N>(
    session: Rc<RefCell<SearchSession<S>>>,
    surface: I,
    navigator: Rc<RefCell<N>>,
) -> ListenerGuard<I>
where
    S: SessionStore + 'static,
    I: InputSurface,
    N: Navigator + 'static,
{
    ListenerGuard::attach(
        surface,
        Box::new(move |event: &KeyEvent| {
            let (Ok(mut session), Ok(mut navigator)) =
                (session.try_borrow_mut(), navigator.try_borrow_mut())
            else {
                tracing::debug!("Search session busy, dropping {:?}", event.key);
                return false;
            };
            session.handle_key(event, &mut *navigator).prevents_default()
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{Catalog, Entry},
        keyboard::{Key, Modifiers, Platform},
        persist::MemoryStore,
        render::StrategyKind,
    };
    use assert2::check;
    use rstest::rstest;

    fn index() -> SearchIndex {
        let catalog = Catalog::builder()
            .push(Entry::new("Devtools").target("/docs/devtools"))
            .push(Entry::new("Action").target("/docs/action"))
            .push(Entry::new("Thunk"))
            .build()
            .unwrap();
        SearchIndex::new(catalog)
    }

    fn config(strategy: StrategyKind) -> SearchConfig {
        SearchConfig {
            platform: Platform::Other,
            strategy,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_query_input_selection() {
        let mut input = QueryInput::default();
        input.set("abc");
        input.focus(true);
        check!(input.is_all_selected());
        input.insert('x');
        check!(input.value() == "x");
        input.insert('y');
        check!(input.value() == "xy");
        input.delete_back();
        check!(input.value() == "x");
    }

    #[test]
    fn test_focus_on_empty_selects_nothing() {
        let mut input = QueryInput::default();
        input.focus(true);
        check!(input.is_focused());
        check!(!input.is_all_selected());
    }

    #[rstest]
    #[case(StrategyKind::Derived)]
    #[case(StrategyKind::Attribute)]
    fn test_enter_without_target_is_nothing(#[case] strategy: StrategyKind) {
        let mut session = SearchSession::mount(index(), &config(strategy), MemoryStore::new());
        session.focus();
        session.set_query("thunk");

        let mut visited = Vec::new();
        let mut navigator = |path: &str| visited.push(path.to_string());
        let outcome = session.handle_key(&KeyEvent::plain(Key::Enter), &mut navigator);
        check!(outcome == SessionOutcome::NothingToActivate);
        check!(visited.is_empty());
    }

    #[rstest]
    #[case(StrategyKind::Derived)]
    #[case(StrategyKind::Attribute)]
    fn test_anchors_follow_visible_groups(#[case] strategy: StrategyKind) {
        let mut session = SearchSession::mount(index(), &config(strategy), MemoryStore::new());
        check!(session.scroll_navigator().is_registered(GroupKey::Letter('T')));

        session.set_query("action");
        check!(session.scroll_navigator().is_registered(GroupKey::Letter('A')));
        check!(!session.scroll_navigator().is_registered(GroupKey::Letter('T')));
        check!(session.letter_bar().enabled().collect::<Vec<_>>() == [GroupKey::Letter('A')]);
    }

    #[test]
    fn test_unhandled_keys_pass_through() {
        let mut session =
            SearchSession::mount(index(), &config(StrategyKind::Derived), MemoryStore::new());
        let mut navigator = |_: &str| {};
        let ctrl_j = KeyEvent::new(Key::Char('j'), Modifiers::CTRL);
        check!(session.handle_key(&ctrl_j, &mut navigator) == SessionOutcome::Unhandled);
        check!(
            session.handle_key(&KeyEvent::plain(Key::Escape), &mut navigator)
                == SessionOutcome::Unhandled
        );
    }
}
