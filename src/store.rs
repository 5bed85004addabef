//! In-memory record store mirrored to key-value storage.
//!
//! The store owns the four record collections for the lifetime of the
//! process. It is hydrated from storage on [`BarberStore::open`] and every
//! mutation writes the full affected collection back before the in-memory
//! copy is replaced, so a failed write leaves the store unchanged.
//!
//! Composite operations that touch two collections (completing an
//! appointment, recording a walk-in visit) go through
//! [`CollectionWriter::save_collections`], which stores both documents or
//! neither.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::appointment::{
    Appointment, AppointmentStatus, NewAppointment, UpdateAppointment,
};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::payment::{NewPayment, Payment, PaymentMethod, UpdatePayment};
use crate::domain::service::{NewService, Service, UpdateService, default_services};
use crate::domain::types::{AppointmentId, ClientId, Money, PaymentId, ServiceId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CollectionDocument, CollectionReader, CollectionWriter};

pub const CLIENTS_KEY: &str = "barber_clients";
pub const SERVICES_KEY: &str = "barber_services";
pub const APPOINTMENTS_KEY: &str = "barber_appointments";
pub const PAYMENTS_KEY: &str = "barber_payments";

/// Payment details captured when an appointment is finished.
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub method: PaymentMethod,
    /// Overrides the service list price when present.
    pub amount: Option<Money>,
}

/// A walk-in: an appointment that is completed and paid at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct NewVisit {
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    pub completion: Completion,
}

/// Result of a composite write.
#[derive(Clone, Debug, PartialEq)]
pub struct SettledAppointment {
    pub appointment: Appointment,
    pub payment: Payment,
}

pub struct BarberStore<R> {
    repo: R,
    clients: Vec<Client>,
    services: Vec<Service>,
    appointments: Vec<Appointment>,
    payments: Vec<Payment>,
}

fn load<R, T>(repo: &R, key: &'static str) -> RepositoryResult<Option<Vec<T>>>
where
    R: CollectionReader,
    T: DeserializeOwned,
{
    repo.load_collection(key)?
        .map(|body| CollectionDocument::decode(&body))
        .transpose()
}

/// Writes `next` under `key` and, on success, makes it the current state.
fn persist<R, T>(
    repo: &R,
    key: &'static str,
    current: &mut Vec<T>,
    next: Vec<T>,
) -> RepositoryResult<()>
where
    R: CollectionWriter,
    T: Serialize,
{
    repo.save_collection(&CollectionDocument::encode(key, &next)?)?;
    *current = next;
    Ok(())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<R> BarberStore<R>
where
    R: CollectionReader + CollectionWriter,
{
    /// Hydrates every collection from storage, seeding the default service
    /// catalog when no services were ever stored.
    pub fn open(repo: R) -> RepositoryResult<Self> {
        let clients = load(&repo, CLIENTS_KEY)?.unwrap_or_default();
        let appointments = load(&repo, APPOINTMENTS_KEY)?.unwrap_or_default();
        let payments = load(&repo, PAYMENTS_KEY)?.unwrap_or_default();
        let services = match load(&repo, SERVICES_KEY)? {
            Some(services) => services,
            None => {
                let seed = default_services();
                repo.save_collection(&CollectionDocument::encode(SERVICES_KEY, &seed)?)?;
                log::info!("Seeded {} default services", seed.len());
                seed
            }
        };

        log::info!(
            "Record store opened: {} clients, {} services, {} appointments, {} payments",
            clients.len(),
            services.len(),
            appointments.len(),
            payments.len()
        );

        Ok(Self {
            repo,
            clients,
            services,
            appointments,
            payments,
        })
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn service(&self, id: ServiceId) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn appointment(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn add_client(&mut self, new_client: NewClient) -> RepositoryResult<Client> {
        let client = Client::create(new_client, now());
        let mut next = self.clients.clone();
        next.push(client.clone());
        persist(&self.repo, CLIENTS_KEY, &mut self.clients, next)?;
        Ok(client)
    }

    /// Returns `Ok(None)` without writing when the id is unknown.
    pub fn update_client(
        &mut self,
        id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Option<Client>> {
        let Some(index) = self.clients.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let mut next = self.clients.clone();
        next[index].apply(updates);
        let updated = next[index].clone();
        persist(&self.repo, CLIENTS_KEY, &mut self.clients, next)?;
        Ok(Some(updated))
    }

    pub fn add_service(&mut self, new_service: NewService) -> RepositoryResult<Service> {
        let service = Service::create(new_service);
        let mut next = self.services.clone();
        next.push(service.clone());
        persist(&self.repo, SERVICES_KEY, &mut self.services, next)?;
        Ok(service)
    }

    pub fn update_service(
        &mut self,
        id: ServiceId,
        updates: &UpdateService,
    ) -> RepositoryResult<Option<Service>> {
        let Some(index) = self.services.iter().position(|s| s.id == id) else {
            return Ok(None);
        };
        let mut next = self.services.clone();
        next[index].apply(updates);
        let updated = next[index].clone();
        persist(&self.repo, SERVICES_KEY, &mut self.services, next)?;
        Ok(Some(updated))
    }

    /// Books a new appointment in `scheduled` status.
    pub fn add_appointment(
        &mut self,
        new_appointment: NewAppointment,
    ) -> RepositoryResult<Appointment> {
        let appointment = Appointment::create(new_appointment);
        let mut next = self.appointments.clone();
        next.push(appointment.clone());
        persist(&self.repo, APPOINTMENTS_KEY, &mut self.appointments, next)?;
        Ok(appointment)
    }

    /// Merges the update. A status change must be a legal transition, and
    /// completion is only reachable through [`Self::complete_appointment`]
    /// so that a payment is always recorded with it.
    pub fn update_appointment(
        &mut self,
        id: AppointmentId,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Option<Appointment>> {
        let Some(index) = self.appointments.iter().position(|a| a.id == id) else {
            return Ok(None);
        };
        let current = self.appointments[index].status;
        if let Some(status) = updates.status.filter(|status| *status != current) {
            if status == AppointmentStatus::Completed {
                return Err(RepositoryError::InvalidTransition {
                    from: current,
                    to: status,
                });
            }
            ensure_transition(current, status)?;
        }
        let mut next = self.appointments.clone();
        next[index].apply(updates);
        let updated = next[index].clone();
        persist(&self.repo, APPOINTMENTS_KEY, &mut self.appointments, next)?;
        Ok(Some(updated))
    }

    pub fn add_payment(&mut self, new_payment: NewPayment) -> RepositoryResult<Payment> {
        let payment = Payment::create(new_payment);
        let mut next = self.payments.clone();
        next.push(payment.clone());
        persist(&self.repo, PAYMENTS_KEY, &mut self.payments, next)?;
        Ok(payment)
    }

    pub fn update_payment(
        &mut self,
        id: PaymentId,
        updates: &UpdatePayment,
    ) -> RepositoryResult<Option<Payment>> {
        let Some(index) = self.payments.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        let mut next = self.payments.clone();
        next[index].apply(updates);
        let updated = next[index].clone();
        persist(&self.repo, PAYMENTS_KEY, &mut self.payments, next)?;
        Ok(Some(updated))
    }

    /// Marks a scheduled appointment completed and records its payment.
    ///
    /// The payment amount is the override from `completion` or the service's
    /// list price. Returns `Ok(None)` when the appointment or its service does
    /// not exist.
    pub fn complete_appointment(
        &mut self,
        id: AppointmentId,
        completion: &Completion,
    ) -> RepositoryResult<Option<SettledAppointment>> {
        let Some(index) = self.appointments.iter().position(|a| a.id == id) else {
            return Ok(None);
        };
        let status = self.appointments[index].status;
        if status != AppointmentStatus::Scheduled {
            return Err(RepositoryError::InvalidTransition {
                from: status,
                to: AppointmentStatus::Completed,
            });
        }
        let Some(price) = self.service(self.appointments[index].service_id).map(|s| s.price)
        else {
            return Ok(None);
        };

        let mut appointments = self.appointments.clone();
        appointments[index].status = AppointmentStatus::Completed;
        let appointment = appointments[index].clone();

        let payment = Payment::create(NewPayment {
            appointment_id: id,
            amount: completion.amount.unwrap_or(price),
            method: completion.method,
            date: now(),
        });

        self.settle(appointments, payment.clone())?;
        Ok(Some(SettledAppointment {
            appointment,
            payment,
        }))
    }

    /// Cancels a scheduled appointment. Returns `Ok(None)` for unknown ids.
    pub fn cancel_appointment(&mut self, id: AppointmentId) -> RepositoryResult<Option<Appointment>> {
        let Some(current) = self.appointment(id).map(|a| a.status) else {
            return Ok(None);
        };
        ensure_transition(current, AppointmentStatus::Cancelled)?;
        self.update_appointment(
            id,
            &UpdateAppointment {
                status: Some(AppointmentStatus::Cancelled),
                ..UpdateAppointment::default()
            },
        )
    }

    /// Records a walk-in: a completed appointment and its payment, sharing one
    /// generated appointment id. Returns `Ok(None)` when the service is unknown.
    pub fn record_visit(&mut self, visit: NewVisit) -> RepositoryResult<Option<SettledAppointment>> {
        let Some(price) = self.service(visit.service_id).map(|s| s.price) else {
            return Ok(None);
        };

        let appointment = Appointment::with_status(
            AppointmentId::new(),
            NewAppointment::new(
                visit.client_id,
                visit.service_id,
                visit.date,
                visit.time,
                visit.notes,
            ),
            AppointmentStatus::Completed,
        );
        let payment = Payment::create(NewPayment {
            appointment_id: appointment.id,
            amount: visit.completion.amount.unwrap_or(price),
            method: visit.completion.method,
            date: now(),
        });

        let mut appointments = self.appointments.clone();
        appointments.push(appointment.clone());

        self.settle(appointments, payment.clone())?;
        Ok(Some(SettledAppointment {
            appointment,
            payment,
        }))
    }

    /// Writes the appointment and payment collections in one transaction.
    fn settle(&mut self, appointments: Vec<Appointment>, payment: Payment) -> RepositoryResult<()> {
        let mut payments = self.payments.clone();
        payments.push(payment);

        self.repo.save_collections(&[
            CollectionDocument::encode(APPOINTMENTS_KEY, &appointments)?,
            CollectionDocument::encode(PAYMENTS_KEY, &payments)?,
        ])?;

        self.appointments = appointments;
        self.payments = payments;
        Ok(())
    }
}

fn ensure_transition(from: AppointmentStatus, to: AppointmentStatus) -> RepositoryResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(RepositoryError::InvalidTransition { from, to })
    }
}
