//! Jump-to-group scrolling.
//!
//! Each rendered group header registers an anchor. Jumping to a group asks
//! the host's scroll container to bring that anchor into view, smoothly if
//! it can and instantly otherwise.

use crate::{error::ScrollError, search::GroupKey};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a rendered anchor element, e.g. `glossary-A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnchorId(String);

impl AnchorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The conventional anchor id for a group header.
    pub fn for_group(prefix: &str, key: GroupKey) -> Self {
        match key {
            GroupKey::Letter(c) => Self(format!("{}-{}", prefix, c)),
            GroupKey::Other => Self(format!("{}-other", prefix)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Where the anchor should land inside the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollAlign {
    /// Top of the container (glossary page).
    #[default]
    Start,
    /// Middle of the container (sidebar).
    Center,
}

/// A scroll container supplied by the host.
pub trait Scroller {
    /// Whether smooth scrolling is available at all.
    fn supports_smooth(&self) -> bool;

    fn scroll_into_view(
        &mut self,
        anchor: &AnchorId,
        behavior: ScrollBehavior,
        align: ScrollAlign,
    ) -> Result<(), ScrollError>;
}

impl<S: Scroller + ?Sized> Scroller for &mut S {
    fn supports_smooth(&self) -> bool {
        (**self).supports_smooth()
    }

    fn scroll_into_view(
        &mut self,
        anchor: &AnchorId,
        behavior: ScrollBehavior,
        align: ScrollAlign,
    ) -> Result<(), ScrollError> {
        (**self).scroll_into_view(anchor, behavior, align)
    }
}

/// Result of [`ScrollNavigator::jump_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JumpOutcome {
    Smooth(AnchorId),
    /// Smooth scrolling was unsupported or refused.
    Instant(AnchorId),
    /// No anchor is registered for the key; nothing happened.
    NoAnchor,
    /// The container refused both attempts.
    Failed(AnchorId),
}

impl JumpOutcome {
    /// Whether the anchor is now in view.
    pub const fn scrolled(&self) -> bool {
        matches!(self, Self::Smooth(_) | Self::Instant(_))
    }
}

/// Maps group keys to their anchors and performs best-effort jumps.
#[derive(Debug, Clone, Default)]
pub struct ScrollNavigator {
    anchors: AHashMap<GroupKey, AnchorId>,
    align: ScrollAlign,
}

impl ScrollNavigator {
    pub fn new(align: ScrollAlign) -> Self {
        Self {
            anchors: AHashMap::new(),
            align,
        }
    }

    pub fn align(&self) -> ScrollAlign {
        self.align
    }

    /// Register (or replace) the anchor for a group.
    pub fn register(&mut self, key: GroupKey, anchor: AnchorId) {
        self.anchors.insert(key, anchor);
    }

    pub fn unregister(&mut self, key: GroupKey) -> Option<AnchorId> {
        self.anchors.remove(&key)
    }

    pub fn clear(&mut self) {
        self.anchors.clear();
    }

    pub fn anchor(&self, key: GroupKey) -> Option<&AnchorId> {
        self.anchors.get(&key)
    }

    pub fn is_registered(&self, key: GroupKey) -> bool {
        self.anchors.contains_key(&key)
    }

    /// Replace all anchors with one per currently rendered group.
    pub fn sync<I, F>(&mut self, keys: I, anchor_for: F)
    where
        I: IntoIterator<Item = GroupKey>,
        F: Fn(GroupKey) -> AnchorId,
    {
        self.anchors.clear();
        for key in keys {
            self.anchors.insert(key, anchor_for(key));
        }
    }

    /// Bring the anchor for `key` into view.
    ///
    /// An unregistered key is a no-op. Smooth scrolling is tried only when
    /// the container advertises it; any refusal falls back to an instant
    /// jump. Failures are logged, never returned.
    pub fn jump_to(&self, key: GroupKey, scroller: &mut dyn Scroller) -> JumpOutcome {
        let Some(anchor) = self.anchors.get(&key) else {
            tracing::debug!("No anchor registered for group '{}'", key);
            return JumpOutcome::NoAnchor;
        };

        if scroller.supports_smooth() {
            match scroller.scroll_into_view(anchor, ScrollBehavior::Smooth, self.align) {
                Ok(()) => return JumpOutcome::Smooth(anchor.clone()),
                Err(e) => {
                    tracing::debug!("Smooth scroll to '{}' failed, jumping instead: {}", anchor, e);
                }
            }
        }

        match scroller.scroll_into_view(anchor, ScrollBehavior::Instant, self.align) {
            Ok(()) => JumpOutcome::Instant(anchor.clone()),
            Err(e) => {
                tracing::debug!("Could not scroll to '{}': {}", anchor, e);
                JumpOutcome::Failed(anchor.clone())
            }
        }
    }
}

/// A laid-out anchor inside a [`ScrollContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    top: usize,
    height: usize,
}

/// A one-dimensional scroll container model: anchors at fixed offsets in a
/// content area taller than the viewport.
///
/// Terminal hosts use it directly (offsets are rows); web hosts can use it
/// to reason about layout in tests.
#[derive(Debug, Clone)]
pub struct ScrollContainer {
    placements: AHashMap<AnchorId, Placement>,
    viewport: usize,
    content: usize,
    offset: usize,
    smooth: bool,
}

impl ScrollContainer {
    pub fn new(viewport: usize, content: usize) -> Self {
        Self {
            placements: AHashMap::new(),
            viewport,
            content,
            offset: 0,
            smooth: true,
        }
    }

    /// Model a container without smooth-scroll support.
    pub fn without_smooth(mut self) -> Self {
        self.smooth = false;
        self
    }

    pub fn place(&mut self, anchor: AnchorId, top: usize, height: usize) {
        self.placements.insert(anchor, Placement { top, height });
    }

    pub fn remove(&mut self, anchor: &AnchorId) {
        self.placements.remove(anchor);
    }

    /// Current scroll offset from the top of the content.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn max_offset(&self) -> usize {
        self.content.saturating_sub(self.viewport)
    }

    /// Whether the anchor overlaps the visible viewport.
    pub fn is_visible(&self, anchor: &AnchorId) -> bool {
        self.placements.get(anchor).is_some_and(|p| {
            let bottom = p.top + p.height.max(1);
            p.top < self.offset + self.viewport && bottom > self.offset
        })
    }
}

impl Scroller for ScrollContainer {
    fn supports_smooth(&self) -> bool {
        self.smooth
    }

    fn scroll_into_view(
        &mut self,
        anchor: &AnchorId,
        behavior: ScrollBehavior,
        align: ScrollAlign,
    ) -> Result<(), ScrollError> {
        if behavior == ScrollBehavior::Smooth && !self.smooth {
            return Err(ScrollError::Unsupported);
        }

        let placement = self
            .placements
            .get(anchor)
            .ok_or_else(|| ScrollError::Detached(anchor.to_string()))?;

        let target = match align {
            ScrollAlign::Start => placement.top,
            ScrollAlign::Center => {
                (placement.top + placement.height / 2).saturating_sub(self.viewport / 2)
            }
        };
        // Animation is the host's concern; both behaviors end at the same offset
        self.offset = target.min(self.max_offset());
        Ok(())
    }
}
