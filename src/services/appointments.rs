use chrono::NaiveDate;
use validator::Validate;

use crate::domain::appointment::Appointment;
use crate::domain::types::AppointmentId;
use crate::dto::appointments::AppointmentsPageData;
use crate::dto::{SelectOption, method_options};
use crate::forms::DATE_FORMAT;
use crate::forms::appointment::{AddAppointmentForm, CompleteAppointmentForm, RecordVisitForm};
use crate::repository::{CollectionReader, CollectionWriter};
use crate::services::{Records, ServiceError, ServiceResult, parse_id};
use crate::store::{BarberStore, SettledAppointment};
use crate::views;

/// Lists all appointments, latest first, with the data for the booking forms.
pub fn load_appointments_page<R>(
    store: &BarberStore<R>,
    today: NaiveDate,
    privacy: bool,
) -> ServiceResult<AppointmentsPageData>
where
    R: CollectionReader + CollectionWriter,
{
    let records = Records::of(store);

    let appointments = views::sorted_appointments(store.appointments())
        .into_iter()
        .map(|appointment| records.appointment_row(appointment, privacy))
        .collect();

    let clients = store
        .clients()
        .iter()
        .map(|client| SelectOption::new(client.id.to_string(), client.name.as_str()))
        .collect();

    let services = store
        .services()
        .iter()
        .map(|service| {
            SelectOption::new(
                service.id.to_string(),
                format!(
                    "{} ({})",
                    service.name,
                    views::format_currency(service.price, privacy)
                ),
            )
        })
        .collect();

    Ok(AppointmentsPageData {
        privacy,
        appointments,
        clients,
        services,
        methods: method_options(),
        today: today.format(DATE_FORMAT).to_string(),
    })
}

/// Validates the booking form and stores a scheduled appointment.
pub fn add_appointment<R>(
    store: &mut BarberStore<R>,
    form: &AddAppointmentForm,
) -> ServiceResult<Appointment>
where
    R: CollectionReader + CollectionWriter,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Cliente, serviço, data e horário são obrigatórios".to_string(),
        ));
    }

    let new_appointment = form.to_new_appointment().map_err(|err| {
        log::error!("Failed to parse appointment form: {err}");
        ServiceError::from(err)
    })?;

    store.add_appointment(new_appointment).map_err(|err| {
        log::error!("Failed to add an appointment: {err}");
        ServiceError::from(err)
    })
}

/// Completes a scheduled appointment and records its payment.
pub fn complete_appointment<R>(
    store: &mut BarberStore<R>,
    appointment_id: &str,
    form: &CompleteAppointmentForm,
) -> ServiceResult<SettledAppointment>
where
    R: CollectionReader + CollectionWriter,
{
    let appointment_id: AppointmentId = parse_id(appointment_id)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Forma de pagamento obrigatória".to_string()));
    }
    let completion = form.to_completion()?;

    store
        .complete_appointment(appointment_id, &completion)
        .map_err(|err| {
            log::error!("Failed to complete appointment {appointment_id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

/// Cancels a scheduled appointment.
pub fn cancel_appointment<R>(
    store: &mut BarberStore<R>,
    appointment_id: &str,
) -> ServiceResult<Appointment>
where
    R: CollectionReader + CollectionWriter,
{
    let appointment_id: AppointmentId = parse_id(appointment_id)?;

    store
        .cancel_appointment(appointment_id)
        .map_err(|err| {
            log::error!("Failed to cancel appointment {appointment_id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

/// Records a walk-in visit: a completed appointment with its payment.
pub fn record_visit<R>(
    store: &mut BarberStore<R>,
    form: &RecordVisitForm,
) -> ServiceResult<SettledAppointment>
where
    R: CollectionReader + CollectionWriter,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Cliente, serviço, data, horário e pagamento são obrigatórios".to_string(),
        ));
    }

    let visit = form.to_new_visit().map_err(|err| {
        log::error!("Failed to parse visit form: {err}");
        ServiceError::from(err)
    })?;

    store
        .record_visit(visit)
        .map_err(|err| {
            log::error!("Failed to record visit: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}
