//! Per-instance search configuration.
//!
//! The sidebar filter and the glossary browser are two instances of the same
//! search core with different settings. Hosts usually embed a TOML snippet
//! per instance:
//!
//! ```toml
//! storage_key = "docsite-search:sidebar"
//! strategy = "attribute"
//! scroll_align = "center"
//! anchor_prefix = "sidebar"
//! ```

use crate::{
    error::ConfigError, keyboard::Platform, persist::WriteMode, render::StrategyKind,
    scroll::ScrollAlign,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "docsite-search:query";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Fixed key the raw query is persisted under.
    pub storage_key: String,
    pub platform: Platform,
    /// Letter combined with the platform modifier to focus the search box
    /// (Ctrl+F / Cmd+F by default).
    pub find_key: char,
    pub strategy: StrategyKind,
    pub scroll_align: ScrollAlign,
    pub write_mode: WriteMode,
    /// Prefix for group header anchor ids.
    pub anchor_prefix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            platform: Platform::Auto,
            find_key: 'f',
            strategy: StrategyKind::Derived,
            scroll_align: ScrollAlign::Start,
            write_mode: WriteMode::Immediate,
            anchor_prefix: "group".to_string(),
        }
    }
}

impl SearchConfig {
    /// Preset for the sidebar link filter.
    pub fn sidebar() -> Self {
        Self {
            storage_key: "docsite-search:sidebar".to_string(),
            strategy: StrategyKind::Attribute,
            scroll_align: ScrollAlign::Center,
            anchor_prefix: "sidebar".to_string(),
            ..Self::default()
        }
    }

    /// Preset for the glossary browser.
    pub fn glossary() -> Self {
        Self {
            storage_key: "docsite-search:glossary".to_string(),
            strategy: StrategyKind::Derived,
            scroll_align: ScrollAlign::Start,
            anchor_prefix: "glossary".to_string(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read search config {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse search config {}", path.display()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}
