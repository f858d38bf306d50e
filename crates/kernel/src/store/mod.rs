//! Indexed entity store.
//!
//! Generic in-memory persistence for named record collections. Each
//! collection is an [`IndexedStore`] owned by the service responsible for
//! it; there is no process-wide registry.
//!
//! Records are kept in insertion order and paginated with opaque cursors.
//! Every record sits behind its own lock, so read-modify-write cycles on
//! one id are serialized without blocking mutations of other ids.

mod cursor;
mod indexed;

pub use cursor::{decode_cursor, encode_cursor};
pub use indexed::IndexedStore;
pub use muse_sdk::types::Page;

use thiserror::Error;

/// A record that can live in an [`IndexedStore`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Singular name used in log lines and error messages.
    const ENTITY_NAME: &'static str;

    /// Name of the collection holding this entity.
    const INDEX_NAME: &'static str;

    /// Primary key.
    fn id(&self) -> &str;

    /// Current version, for entities that track one.
    fn version(&self) -> Option<u64> {
        None
    }

    /// Overwrite the version. No-op for unversioned entities.
    fn set_version(&mut self, _version: u64) {}

    /// Fixture records installed by [`IndexedStore::ensure_seed`].
    fn seed_data() -> Vec<Self> {
        Vec::new()
    }
}

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} '{id}' already exists")]
    DuplicateKey { entity: &'static str, id: String },

    #[error("invalid cursor")]
    InvalidCursor,

    /// Optimistic-concurrency check failed; nothing was written.
    #[error("version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u64, actual: u64 },

    /// A transform or pre-write check refused the record.
    #[error("{0}")]
    Invalid(String),
}

impl StoreError {
    pub(crate) fn not_found<E: Entity>(id: &str) -> Self {
        Self::NotFound {
            entity: E::ENTITY_NAME,
            id: id.to_string(),
        }
    }

    pub(crate) fn duplicate<E: Entity>(id: &str) -> Self {
        Self::DuplicateKey {
            entity: E::ENTITY_NAME,
            id: id.to_string(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_version_mismatch() {
        let err = StoreError::VersionMismatch {
            expected: 3,
            actual: 1,
        };
        assert_eq!(err.to_string(), "version mismatch: expected 3, got 1");
    }

    #[test]
    fn test_error_display_not_found() {
        let err = StoreError::NotFound {
            entity: "entry",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "entry 'abc' not found");
    }
}
