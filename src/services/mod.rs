//! Page loaders and form handlers used by the routes.
//!
//! Each function receives the record store explicitly, validates its input,
//! and returns either a DTO for rendering or the outcome of a mutation.

use std::str::FromStr;

use crate::domain::appointment::Appointment;
use crate::domain::client::Client;
use crate::domain::payment::Payment;
use crate::domain::service::Service;
use crate::dto::{AppointmentRow, DISPLAY_DATE_FORMAT, DISPLAY_TIME_FORMAT, PaymentBadge};
use crate::repository::{CollectionReader, CollectionWriter};
use crate::store::BarberStore;
use crate::views;

pub mod appointments;
pub mod catalog;
pub mod clients;
pub mod dashboard;
pub mod errors;
pub mod payments;

pub use errors::{ServiceError, ServiceResult};

/// Parses an identifier taken from the URL. Malformed ids are reported as
/// missing records.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> ServiceResult<T> {
    raw.parse().map_err(|_| ServiceError::NotFound)
}

/// Borrowed view over the four collections used to resolve rows.
#[derive(Clone, Copy)]
pub(crate) struct Records<'a> {
    pub clients: &'a [Client],
    pub services: &'a [Service],
    pub appointments: &'a [Appointment],
    pub payments: &'a [Payment],
}

impl<'a> Records<'a> {
    pub fn of<R>(store: &'a BarberStore<R>) -> Self
    where
        R: CollectionReader + CollectionWriter,
    {
        Self {
            clients: store.clients(),
            services: store.services(),
            appointments: store.appointments(),
            payments: store.payments(),
        }
    }

    pub fn appointment_row(&self, appointment: &Appointment, privacy: bool) -> AppointmentRow {
        let payment = views::payment_for(self.payments, appointment.id).map(|payment| PaymentBadge {
            id: payment.id.to_string(),
            amount: views::format_currency(payment.amount, privacy),
            method: payment.method.as_str(),
            method_label: payment.method.label(),
        });

        AppointmentRow {
            id: appointment.id.to_string(),
            client_id: appointment.client_id.to_string(),
            client_name: views::client_name(self.clients, appointment.client_id).to_string(),
            service_name: views::service_name(self.services, appointment.service_id).to_string(),
            price: views::format_currency(
                views::service_price(self.services, appointment.service_id),
                privacy,
            ),
            date: appointment.date.format(DISPLAY_DATE_FORMAT).to_string(),
            time: appointment.time.format(DISPLAY_TIME_FORMAT).to_string(),
            status: appointment.status,
            status_label: appointment.status.label(),
            notes: appointment.notes.clone(),
            payment,
        }
    }
}
