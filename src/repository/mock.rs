//! Mock repository implementations for isolating the store in tests.

use mockall::mock;

use crate::repository::errors::RepositoryResult;
use crate::repository::{CollectionDocument, CollectionReader, CollectionWriter};

mock! {
    pub Repository {}

    impl CollectionReader for Repository {
        fn load_collection(&self, key: &str) -> RepositoryResult<Option<String>>;
    }

    impl CollectionWriter for Repository {
        fn save_collection(&self, document: &CollectionDocument) -> RepositoryResult<()>;
        fn save_collections(&self, documents: &[CollectionDocument]) -> RepositoryResult<()>;
    }
}
