//! Session-scoped persistence of the raw query string.
//!
//! The query survives a reload or remount within the same tab. Storage is
//! best-effort: when the backing store is unavailable or refuses a write the
//! feature degrades to "no persisted query" and the caller never sees an
//! error.

use crate::error::StorageError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// A tab-lifetime key/value store supplied by the host.
///
/// Every call may fail; [`QueryPersistence`] absorbs those failures.
pub trait SessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-memory session store.
///
/// Doubles as a stand-in for disabled storage ([`MemoryStore::unavailable`])
/// and for a store with a byte quota ([`MemoryStore::with_quota`]).
#[derive(Debug, Clone)]
pub struct MemoryStore {
    items: AHashMap<String, String>,
    /// Max total bytes of keys plus values
    quota: Option<usize>,
    available: bool,
    reads: Cell<usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            items: AHashMap::new(),
            quota: None,
            available: true,
            reads: Cell::new(0),
            writes: 0,
        }
    }

    /// A store that fails every call, as in private browsing.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::new()
        }
    }

    /// Number of successful `get_item` calls.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// Number of successful `set_item`/`remove_item` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable)
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        self.reads.set(self.reads.get() + 1);
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;

        if let Some(limit) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.items.remove(key);
        self.writes += 1;
        Ok(())
    }
}

/// When query mutations reach the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Write through on every change.
    #[default]
    Immediate,
    /// Hold the latest value until [`QueryPersistence::flush`].
    Coalesced,
}

/// Saves and restores one query string under a fixed key.
///
/// Dropping it flushes a coalesced value, so the store holds the latest
/// query even when the owner is discarded without [`Self::into_store`].
#[derive(Debug)]
pub struct QueryPersistence<S: SessionStore> {
    /// Taken only by `into_store`
    store: Option<S>,
    key: String,
    mode: WriteMode,
    /// Last value known to be in the store
    written: Option<String>,
    /// Value waiting for a flush in coalesced mode
    pending: Option<String>,
}

impl<S: SessionStore> QueryPersistence<S> {
    pub fn new(store: S, key: impl Into<String>, mode: WriteMode) -> Self {
        Self {
            store: Some(store),
            key: key.into(),
            mode,
            written: None,
            pending: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted query. Absent key or storage failure yields `""`.
    pub fn load(&mut self) -> String {
        let Some(store) = self.store.as_ref() else {
            return String::new();
        };

        match store.get_item(&self.key) {
            Ok(value) => {
                let value = value.unwrap_or_default();
                self.written = Some(value.clone());
                value
            }
            Err(e) => {
                tracing::debug!("Could not restore query from '{}': {}", self.key, e);
                String::new()
            }
        }
    }

    /// Record the current query. Never fails.
    pub fn save(&mut self, value: &str) {
        match self.mode {
            WriteMode::Immediate => self.write(value),
            WriteMode::Coalesced => {
                if self.written.as_deref() == Some(value) {
                    self.pending = None;
                } else {
                    self.pending = Some(value.to_string());
                }
            }
        }
    }

    /// Push any coalesced value to the store.
    pub fn flush(&mut self) {
        if let Some(value) = self.pending.take() {
            self.write(&value);
        }
    }

    /// Whether a coalesced value is waiting for [`Self::flush`].
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Flush and hand back the store.
    pub fn into_store(mut self) -> S {
        self.flush();
        match self.store.take() {
            Some(store) => store,
            // `store` is only emptied here, and `self` is consumed
            None => unreachable!("store taken twice"),
        }
    }

    /// The backing store, absent only while the value is being consumed.
    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    fn write(&mut self, value: &str) {
        let Some(store) = self.store.as_mut() else {
            return;
        };

        // A cleared box restores as empty without leaving a key behind
        let result = if value.is_empty() {
            store.remove_item(&self.key)
        } else {
            store.set_item(&self.key, value)
        };

        match result {
            Ok(()) => self.written = Some(value.to_string()),
            Err(e) => {
                tracing::debug!("Could not persist query under '{}': {}", self.key, e);
                self.written = None;
            }
        }
    }
}

impl<S: SessionStore> Drop for QueryPersistence<S> {
    fn drop(&mut self) {
        if self.has_pending() {
            tracing::debug!("Flushing pending query under '{}' on drop", self.key);
            self.flush();
        }
    }
}
