use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::repository::CollectionDocument;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::collections)]
/// Diesel model for one serialized record collection.
pub struct StoredCollection {
    pub key: String,
    pub body: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::collections)]
/// Insertable form of [`StoredCollection`].
pub struct NewStoredCollection<'a> {
    pub key: &'a str,
    pub body: &'a str,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewStoredCollection<'a> {
    pub fn from_document(document: &'a CollectionDocument, updated_at: NaiveDateTime) -> Self {
        Self {
            key: document.key,
            body: document.body.as_str(),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn from_document_borrows_key_and_body() {
        let document = CollectionDocument {
            key: "barber_clients",
            body: "[]".to_string(),
        };
        let now = Utc::now().naive_utc();
        let row = NewStoredCollection::from_document(&document, now);
        assert_eq!(row.key, "barber_clients");
        assert_eq!(row.body, "[]");
        assert_eq!(row.updated_at, now);
    }
}
