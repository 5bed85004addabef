use serde::Deserialize;
use validator::Validate;

use crate::domain::payment::{PaymentMethod, UpdatePayment};
use crate::forms::FormError;
use crate::forms::client::not_blank;

#[derive(Deserialize, Validate)]
/// Form data for correcting how a payment was made.
pub struct UpdatePaymentMethodForm {
    #[validate(custom(function = "not_blank"))]
    pub method: String,
}

impl UpdatePaymentMethodForm {
    pub fn to_update(&self) -> Result<UpdatePayment, FormError> {
        let method: PaymentMethod = self.method.parse().map_err(|_| FormError::InvalidMethod)?;
        Ok(UpdatePayment {
            method: Some(method),
            ..UpdatePayment::default()
        })
    }
}
