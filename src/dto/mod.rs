//! DTO modules that bridge services with templates.

use serde::Serialize;

use crate::domain::appointment::AppointmentStatus;
use crate::domain::payment::PaymentMethod;

pub mod appointments;
pub mod catalog;
pub mod clients;
pub mod dashboard;
pub mod payments;

/// Display format used for dates across the pages.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
/// Display format used for times across the pages.
pub const DISPLAY_TIME_FORMAT: &str = "%H:%M";

/// `value`/`label` pair for `<select>` elements.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub fn method_options() -> Vec<SelectOption> {
    PaymentMethod::ALL
        .iter()
        .map(|method| SelectOption::new(method.as_str(), method.label()))
        .collect()
}

/// Compact payment summary shown next to an appointment.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PaymentBadge {
    pub id: String,
    pub amount: String,
    pub method: &'static str,
    pub method_label: &'static str,
}

/// Appointment row resolved against clients, services and payments.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AppointmentRow {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub service_name: String,
    pub price: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub status_label: &'static str,
    pub notes: Option<String>,
    pub payment: Option<PaymentBadge>,
}
