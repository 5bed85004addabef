use serde::Deserialize;
use validator::Validate;

use crate::domain::service::{NewService, UpdateService};
use crate::domain::types::{Money, non_blank};
use crate::forms::FormError;
use crate::forms::client::not_blank;

fn clean_description(description: &str) -> Option<String> {
    non_blank(Some(ammonia::clean(description)))
}

#[derive(Deserialize, Validate)]
/// Form data for adding a service to the catalog.
pub struct AddServiceForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Price as typed, e.g. `25` or `25,50`.
    #[validate(custom(function = "not_blank"))]
    pub price: String,
    #[validate(range(min = 1))]
    pub duration: u32,
    #[serde(default)]
    pub description: String,
}

impl AddServiceForm {
    pub fn to_new_service(&self) -> Result<NewService, FormError> {
        let price: Money = self.price.parse().map_err(|_| FormError::InvalidAmount)?;
        let new_service = NewService::new(
            self.name.trim().to_string(),
            price,
            self.duration,
            clean_description(&self.description),
        )?;
        Ok(new_service)
    }
}

#[derive(Deserialize, Validate)]
/// Form data for editing a catalog entry.
pub struct SaveServiceForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub price: String,
    #[validate(range(min = 1))]
    pub duration: u32,
    #[serde(default)]
    pub description: String,
}

impl SaveServiceForm {
    pub fn to_update(&self) -> Result<UpdateService, FormError> {
        let price: Money = self.price.parse().map_err(|_| FormError::InvalidAmount)?;
        Ok(UpdateService {
            name: Some(self.name.trim().to_string()),
            price: Some(price),
            duration: Some(self.duration),
            description: Some(clean_description(&self.description)),
        })
    }
}
