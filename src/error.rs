//! Error handling types and utilities.
//!
//! Nothing in this crate is fatal to the hosting page. Storage and scroll
//! failures are recovered where they occur (see [`crate::persist`] and
//! [`crate::scroll`]); the only error a caller must handle up front is an
//! invalid catalog, which is a construction-time problem.

/// A specialized Result type for docsite-search operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error for every failure domain in the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Scroll(#[from] ScrollError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error returned when a catalog cannot be constructed.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// An entry's label is empty or whitespace-only.
    #[error("entry {index} has an empty label")]
    EmptyLabel { index: usize },

    /// The embedded catalog literal is not valid JSON for a list of entries.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error raised by a session storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or inaccessible (private browsing, sandboxed frame).
    #[error("session storage is unavailable")]
    Unavailable,

    /// The write would exceed the store's quota.
    #[error("session storage quota exceeded ({needed} bytes needed, {limit} allowed)")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Any other backend-specific failure.
    #[error("session storage error: {0}")]
    Backend(String),
}

/// Error raised by a scroll container when it refuses a scroll request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrollError {
    /// The anchor is no longer attached to the container.
    #[error("anchor '{0}' is detached from its scroll container")]
    Detached(String),

    /// The requested scroll behavior is not supported.
    #[error("scroll behavior not supported")]
    Unsupported,
}

/// Error returned when search configuration cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid search configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("storage key must not be empty")]
    EmptyStorageKey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    fn load_catalog(json: &str) -> Result<crate::Catalog> {
        Ok(crate::Catalog::from_json(json)?)
    }

    #[test]
    fn test_domain_errors_convert_to_umbrella() {
        let_assert!(Err(Error::Catalog(CatalogError::Json(_))) = load_catalog("not json"));
        let_assert!(
            Err(Error::Catalog(CatalogError::EmptyLabel { index: 0 })) =
                load_catalog(r#"[{"label": " "}]"#)
        );

        let error: Error = StorageError::QuotaExceeded { needed: 12, limit: 8 }.into();
        check!(error.to_string() == "session storage quota exceeded (12 bytes needed, 8 allowed)");
    }
}
