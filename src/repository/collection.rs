use chrono::Utc;
use diesel::prelude::*;

use crate::models::collection::{NewStoredCollection, StoredCollection};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CollectionDocument, CollectionReader, CollectionWriter, DieselRepository};

impl CollectionReader for DieselRepository {
    fn load_collection(&self, key: &str) -> RepositoryResult<Option<String>> {
        use crate::schema::collections;

        let mut conn = self.conn()?;
        let stored = collections::table
            .find(key)
            .select(StoredCollection::as_select())
            .first::<StoredCollection>(&mut conn)
            .optional()?;

        Ok(stored.map(|row| {
            log::debug!("Loaded '{}' last written at {}", row.key, row.updated_at);
            row.body
        }))
    }
}

impl CollectionWriter for DieselRepository {
    fn save_collection(&self, document: &CollectionDocument) -> RepositoryResult<()> {
        use crate::schema::collections;

        let mut conn = self.conn()?;
        let row = NewStoredCollection::from_document(document, Utc::now().naive_utc());
        diesel::replace_into(collections::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(())
    }

    fn save_collections(&self, documents: &[CollectionDocument]) -> RepositoryResult<()> {
        use crate::schema::collections;

        let mut conn = self.conn()?;
        let updated_at = Utc::now().naive_utc();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            for document in documents {
                let row = NewStoredCollection::from_document(document, updated_at);
                diesel::replace_into(collections::table)
                    .values(&row)
                    .execute(conn)?;
            }
            Ok(())
        })
    }
}
