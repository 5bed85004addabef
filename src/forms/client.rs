use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::non_blank;

/// Rejects values made only of whitespace.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Email is optional, but when present it must look like an address.
fn optional_email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for registering a new client.
pub struct AddClientForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    #[serde(default)]
    #[validate(custom(function = "optional_email"))]
    pub email: String,
}

impl AddClientForm {
    pub fn to_new_client(&self) -> NewClient {
        NewClient::new(
            self.name.trim().to_string(),
            self.phone.trim().to_string(),
            Some(self.email.clone()),
        )
    }
}

#[derive(Deserialize, Validate)]
/// Form data for editing an existing client.
pub struct SaveClientForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    /// A blank value clears the stored email.
    #[serde(default)]
    #[validate(custom(function = "optional_email"))]
    pub email: String,
}

impl From<&SaveClientForm> for UpdateClient {
    fn from(form: &SaveClientForm) -> Self {
        UpdateClient {
            name: Some(form.name.trim().to_string()),
            phone: Some(form.phone.trim().to_string()),
            email: Some(non_blank(Some(form.email.clone()))),
        }
    }
}
