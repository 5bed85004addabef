use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, non_blank};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(name: String, phone: String, email: Option<String>) -> Self {
        Self {
            name,
            phone,
            email: non_blank(email),
        }
    }
}

/// Partial update; `None` leaves the field untouched.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub phone: Option<String>,
    /// `Some(None)` clears the email.
    pub email: Option<Option<String>>,
}

impl Client {
    /// Builds a stored client from the creation payload.
    pub fn create(new_client: NewClient, created_at: NaiveDateTime) -> Self {
        Self {
            id: ClientId::new(),
            name: new_client.name,
            phone: new_client.phone,
            email: new_client.email,
            created_at,
        }
    }

    /// Merges the provided partial update over this record.
    pub fn apply(&mut self, updates: &UpdateClient) {
        if let Some(name) = &updates.name {
            self.name = name.clone();
        }
        if let Some(phone) = &updates.phone {
            self.phone = phone.clone();
        }
        if let Some(email) = &updates.email {
            self.email = email.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;

    #[test]
    fn apply_only_touches_provided_fields() {
        let mut client = Client::create(
            NewClient::new("João".into(), "1199".into(), Some("j@x.com".into())),
            Local::now().naive_local(),
        );
        let original = client.clone();

        client.apply(&UpdateClient {
            phone: Some("2288".into()),
            ..UpdateClient::default()
        });

        assert_eq!(client.phone, "2288");
        assert_eq!(client.name, original.name);
        assert_eq!(client.email, original.email);
        assert_eq!(client.id, original.id);

        client.apply(&UpdateClient {
            email: Some(None),
            ..UpdateClient::default()
        });
        assert_eq!(client.email, None);
    }

    #[test]
    fn new_client_drops_blank_email() {
        let client = NewClient::new("A".into(), "1".into(), Some("   ".into()));
        assert_eq!(client.email, None);
    }
}
