//! Key-value persistence for whole record collections.
//!
//! Every entity kind is stored as one document holding the full serialized
//! collection. Documents are overwritten wholesale on each change.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::db::DbPool;
use crate::repository::errors::RepositoryResult;

pub mod collection;
pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// One serialized collection addressed by its storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDocument {
    pub key: &'static str,
    pub body: String,
}

impl CollectionDocument {
    /// Serializes the full collection into a document.
    pub fn encode<T: Serialize>(key: &'static str, records: &[T]) -> RepositoryResult<Self> {
        Ok(Self {
            key,
            body: serde_json::to_string(records)?,
        })
    }

    /// Deserializes a stored body without further validation.
    pub fn decode<T: DeserializeOwned>(body: &str) -> RepositoryResult<Vec<T>> {
        Ok(serde_json::from_str(body)?)
    }
}

pub trait CollectionReader {
    /// Returns the stored body for `key`, or `None` when nothing was stored.
    fn load_collection(&self, key: &str) -> RepositoryResult<Option<String>>;
}

pub trait CollectionWriter {
    fn save_collection(&self, document: &CollectionDocument) -> RepositoryResult<()>;
    /// Writes all documents atomically: either every one is stored or none.
    fn save_collections(&self, documents: &[CollectionDocument]) -> RepositoryResult<()>;
}

/// Diesel-backed repository storing collections in SQLite.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<crate::db::DbConnection> {
        Ok(self.pool.get()?)
    }
}
