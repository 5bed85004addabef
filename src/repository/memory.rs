//! Process-local repository used for ephemeral stores and tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CollectionDocument, CollectionReader, CollectionWriter};

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    documents: Mutex<HashMap<String, String>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with a raw stored body.
    pub fn with_document(self, key: &str, body: impl Into<String>) -> Self {
        if let Ok(mut documents) = self.documents.lock() {
            documents.insert(key.to_string(), body.into());
        }
        self
    }

    /// Returns the raw body stored under `key`.
    pub fn document(&self, key: &str) -> Option<String> {
        self.documents
            .lock()
            .ok()
            .and_then(|documents| documents.get(key).cloned())
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, HashMap<String, String>>> {
        self.documents
            .lock()
            .map_err(|err| RepositoryError::Unexpected(format!("storage lock poisoned: {err}")))
    }
}

impl CollectionReader for InMemoryRepository {
    fn load_collection(&self, key: &str) -> RepositoryResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }
}

impl CollectionWriter for InMemoryRepository {
    fn save_collection(&self, document: &CollectionDocument) -> RepositoryResult<()> {
        self.lock()?
            .insert(document.key.to_string(), document.body.clone());
        Ok(())
    }

    fn save_collections(&self, documents: &[CollectionDocument]) -> RepositoryResult<()> {
        let mut stored = self.lock()?;
        for document in documents {
            stored.insert(document.key.to_string(), document.body.clone());
        }
        Ok(())
    }
}
