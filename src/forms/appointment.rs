use serde::Deserialize;
use validator::Validate;

use crate::domain::appointment::NewAppointment;
use crate::domain::payment::PaymentMethod;
use crate::domain::types::{ClientId, ServiceId, non_blank};
use crate::forms::client::not_blank;
use crate::forms::{FormError, parse_date, parse_optional_amount, parse_time};
use crate::store::{Completion, NewVisit};

fn clean_notes(notes: &str) -> Option<String> {
    non_blank(Some(ammonia::clean(notes)))
}

fn parse_method(value: &str) -> Result<PaymentMethod, FormError> {
    value.parse().map_err(|_| FormError::InvalidMethod)
}

#[derive(Deserialize, Validate)]
/// Form data for booking an appointment.
pub struct AddAppointmentForm {
    #[validate(custom(function = "not_blank"))]
    pub client_id: String,
    #[validate(custom(function = "not_blank"))]
    pub service_id: String,
    #[validate(custom(function = "not_blank"))]
    pub date: String,
    #[validate(custom(function = "not_blank"))]
    pub time: String,
    #[serde(default)]
    pub notes: String,
}

impl AddAppointmentForm {
    pub fn to_new_appointment(&self) -> Result<NewAppointment, FormError> {
        let client_id: ClientId = self.client_id.parse()?;
        let service_id: ServiceId = self.service_id.parse()?;
        Ok(NewAppointment::new(
            client_id,
            service_id,
            parse_date(&self.date)?,
            parse_time(&self.time)?,
            clean_notes(&self.notes),
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Payment captured when finishing an appointment.
pub struct CompleteAppointmentForm {
    #[validate(custom(function = "not_blank"))]
    pub method: String,
    /// Optional override of the list price.
    #[serde(default)]
    pub amount: Option<String>,
}

impl CompleteAppointmentForm {
    pub fn to_completion(&self) -> Result<Completion, FormError> {
        Ok(Completion {
            method: parse_method(&self.method)?,
            amount: parse_optional_amount(self.amount.as_deref())?,
        })
    }
}

#[derive(Deserialize, Validate)]
/// Form data for a walk-in that is served and paid immediately.
pub struct RecordVisitForm {
    #[validate(custom(function = "not_blank"))]
    pub client_id: String,
    #[validate(custom(function = "not_blank"))]
    pub service_id: String,
    #[validate(custom(function = "not_blank"))]
    pub date: String,
    #[validate(custom(function = "not_blank"))]
    pub time: String,
    #[validate(custom(function = "not_blank"))]
    pub method: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl RecordVisitForm {
    pub fn to_new_visit(&self) -> Result<NewVisit, FormError> {
        Ok(NewVisit {
            client_id: self.client_id.parse()?,
            service_id: self.service_id.parse()?,
            date: parse_date(&self.date)?,
            time: parse_time(&self.time)?,
            notes: clean_notes(&self.notes),
            completion: Completion {
                method: parse_method(&self.method)?,
                amount: parse_optional_amount(self.amount.as_deref())?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn add_form() -> AddAppointmentForm {
        AddAppointmentForm {
            client_id: ClientId::new().to_string(),
            service_id: ServiceId::new().to_string(),
            date: "2024-05-15".into(),
            time: "14:30".into(),
            notes: "<b>cliente novo</b>".into(),
        }
    }

    #[test]
    fn add_form_converts_to_new_appointment() {
        let form = add_form();
        assert!(form.validate().is_ok());
        let new_appointment = form.to_new_appointment().unwrap();
        assert_eq!(new_appointment.date, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
        assert_eq!(new_appointment.time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(new_appointment.notes.as_deref(), Some("<b>cliente novo</b>"));
    }

    #[test]
    fn add_form_requires_every_reference() {
        let mut form = add_form();
        form.client_id = String::new();
        assert!(form.validate().is_err());

        let mut form = add_form();
        form.service_id = "not-a-uuid".into();
        assert!(matches!(form.to_new_appointment(), Err(FormError::InvalidId)));
    }

    #[test]
    fn completion_defaults_to_list_price() {
        let form = CompleteAppointmentForm {
            method: "pix".into(),
            amount: Some(String::new()),
        };
        let completion = form.to_completion().unwrap();
        assert_eq!(completion.method, PaymentMethod::Pix);
        assert_eq!(completion.amount, None);
    }

    #[test]
    fn completion_rejects_unknown_method() {
        let form = CompleteAppointmentForm {
            method: "cheque".into(),
            amount: None,
        };
        assert!(matches!(form.to_completion(), Err(FormError::InvalidMethod)));
    }

    #[test]
    fn visit_form_carries_override_amount() {
        let form = RecordVisitForm {
            client_id: ClientId::new().to_string(),
            service_id: ServiceId::new().to_string(),
            date: "2024-05-15".into(),
            time: "10:00".into(),
            method: "debit".into(),
            amount: Some("20".into()),
            notes: String::new(),
        };
        let visit = form.to_new_visit().unwrap();
        assert_eq!(visit.completion.amount.map(|m| m.cents()), Some(2000));
        assert_eq!(visit.notes, None);
    }
}
