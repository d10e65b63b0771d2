//! Global key chords for a search box.
//!
//! [`KeyboardController`] is a pure mapping from a key event (plus whether
//! the query box has focus) to a [`KeyAction`]. Wiring it to a page-wide
//! input surface goes through [`ListenerGuard`], which removes exactly the
//! listener it added when dropped.

use serde::{Deserialize, Serialize};
use std::{cell::RefCell, fmt, rc::Rc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };
    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    pub const fn is_empty(self) -> bool {
        !(self.ctrl || self.meta || self.shift || self.alt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key pressed with no modifiers.
    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// Which modifier acts as the platform's command key.
///
/// The host knows the user's OS at runtime (a wasm build cannot tell from
/// its compile target), so it should pass `Mac` or `Other` when it can.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Unknown: either Cmd or Ctrl counts.
    #[default]
    Auto,
    /// Cmd (meta).
    Mac,
    /// Ctrl.
    Other,
}

impl Platform {
    const fn command_held(self, modifiers: Modifiers) -> bool {
        match self {
            Self::Auto => modifiers.meta || modifiers.ctrl,
            Self::Mac => modifiers.meta,
            Self::Other => modifiers.ctrl,
        }
    }
}

/// What the host should do in response to a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Focus the query box and select its contents.
    FocusQuery,
    /// Reset the query to empty.
    ClearQuery,
    /// Navigate to the first visible result.
    ActivateFirst,
    /// Not ours; let the event propagate untouched.
    Ignore,
}

impl KeyAction {
    /// Whether the browser's default handling should be suppressed.
    ///
    /// Escape is never swallowed so other UI (a modal) can still react.
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::FocusQuery | Self::ActivateFirst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardController {
    platform: Platform,
    find_key: char,
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::new(Platform::Auto, 'f')
    }
}

impl KeyboardController {
    pub fn new(platform: Platform, find_key: char) -> Self {
        Self {
            platform,
            find_key: find_key.to_ascii_lowercase(),
        }
    }

    pub const fn platform(&self) -> Platform {
        self.platform
    }

    pub const fn find_key(&self) -> char {
        self.find_key
    }

    /// Map an event to an action.
    ///
    /// The find chord works wherever focus is. Escape and Enter only count
    /// while the query box itself is focused.
    pub fn handle(&self, event: &KeyEvent, query_focused: bool) -> KeyAction {
        match event.key {
            Key::Char(c)
                if c.to_ascii_lowercase() == self.find_key
                    && self.platform.command_held(event.modifiers)
                    && !event.modifiers.alt =>
            {
                KeyAction::FocusQuery
            }
            Key::Escape if query_focused => KeyAction::ClearQuery,
            Key::Enter if query_focused => KeyAction::ActivateFirst,
            _ => KeyAction::Ignore,
        }
    }
}

/// Handle to a listener registered on an [`InputSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// A key listener. Returns `true` when it handled the event and the default
/// action should be prevented.
pub type KeyHandler = Box<dyn FnMut(&KeyEvent) -> bool>;

/// The page-wide source of key-down events.
///
/// Implementations are cheap handles (clone shares the same surface).
pub trait InputSurface {
    fn add_key_listener(&self, handler: KeyHandler) -> ListenerId;
    /// Returns `false` if `id` was not registered.
    fn remove_key_listener(&self, id: ListenerId) -> bool;
}

/// Keeps one listener attached for as long as it lives.
///
/// Dropping the guard (normal teardown, early return, unwinding) removes
/// the listener it added and nothing else.
#[must_use = "the listener is removed as soon as the guard is dropped"]
pub struct ListenerGuard<I: InputSurface> {
    surface: I,
    id: Option<ListenerId>,
}

impl<I: InputSurface> ListenerGuard<I> {
    pub fn attach(surface: I, handler: KeyHandler) -> Self {
        let id = surface.add_key_listener(handler);
        tracing::debug!("Attached key {}", id);
        Self {
            surface,
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    /// Remove the listener now. Returns whether it was still registered.
    pub fn detach(mut self) -> bool {
        self.remove()
    }

    fn remove(&mut self) -> bool {
        let Some(id) = self.id.take() else {
            return false;
        };
        let removed = self.surface.remove_key_listener(id);
        tracing::debug!("Detached key {} (registered: {})", id, removed);
        removed
    }
}

impl<I: InputSurface> Drop for ListenerGuard<I> {
    fn drop(&mut self) {
        self.remove();
    }
}

impl<I: InputSurface> fmt::Debug for ListenerGuard<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

#[derive(Default)]
struct SurfaceState {
    next_id: u64,
    listeners: Vec<(ListenerId, Rc<RefCell<KeyHandler>>)>,
}

/// In-process input surface for hosts without a DOM (terminal UIs, tests).
#[derive(Clone, Default)]
pub struct LocalSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl LocalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Deliver an event to every listener in registration order.
    ///
    /// Returns whether any listener prevented the default action. Listeners
    /// may attach or detach others while running.
    pub fn dispatch(&self, event: &KeyEvent) -> bool {
        let listeners: Vec<_> = self
            .state
            .borrow()
            .listeners
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        let mut prevented = false;
        for handler in listeners {
            // A listener re-entering dispatch is skipped rather than aliased
            if let Ok(mut handler) = handler.try_borrow_mut() {
                prevented |= handler(event);
            }
        }
        prevented
    }
}

impl InputSurface for LocalSurface {
    fn add_key_listener(&self, handler: KeyHandler) -> ListenerId {
        let mut state = self.state.borrow_mut();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, Rc::new(RefCell::new(handler))));
        id
    }

    fn remove_key_listener(&self, id: ListenerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(existing, _)| *existing != id);
        state.listeners.len() != before
    }
}

impl fmt::Debug for LocalSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSurface")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
