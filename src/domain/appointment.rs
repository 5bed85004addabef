use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AppointmentId, ClientId, ServiceId, TypeConstraintError, non_blank,
};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Human readable label shown in the interface.
    pub const fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Agendado",
            AppointmentStatus::Completed => "Concluído",
            AppointmentStatus::Cancelled => "Cancelado",
        }
    }

    /// Only scheduled appointments may move, and only to a terminal status.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        self == AppointmentStatus::Scheduled && next != AppointmentStatus::Scheduled
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAppointment {
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
}

impl NewAppointment {
    #[must_use]
    pub fn new(
        client_id: ClientId,
        service_id: ServiceId,
        date: NaiveDate,
        time: NaiveTime,
        notes: Option<String>,
    ) -> Self {
        Self {
            client_id,
            service_id,
            date,
            time,
            notes: non_blank(notes),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateAppointment {
    pub client_id: Option<ClientId>,
    pub service_id: Option<ServiceId>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<Option<String>>,
}

impl Appointment {
    /// New appointments always start as scheduled.
    pub fn create(new_appointment: NewAppointment) -> Self {
        Self::with_status(
            AppointmentId::new(),
            new_appointment,
            AppointmentStatus::Scheduled,
        )
    }

    pub fn with_status(
        id: AppointmentId,
        new_appointment: NewAppointment,
        status: AppointmentStatus,
    ) -> Self {
        Self {
            id,
            client_id: new_appointment.client_id,
            service_id: new_appointment.service_id,
            date: new_appointment.date,
            time: new_appointment.time,
            status,
            notes: new_appointment.notes,
        }
    }

    /// Date and time combined, used for ordering.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Merges the partial update. Status is applied as-is; callers check
    /// [`AppointmentStatus::can_transition_to`] first.
    pub fn apply(&mut self, updates: &UpdateAppointment) {
        if let Some(client_id) = updates.client_id {
            self.client_id = client_id;
        }
        if let Some(service_id) = updates.service_id {
            self.service_id = service_id;
        }
        if let Some(date) = updates.date {
            self.date = date;
        }
        if let Some(time) = updates.time {
            self.time = time;
        }
        if let Some(status) = updates.status {
            self.status = status;
        }
        if let Some(notes) = &updates.notes {
            self.notes = notes.clone();
        }
    }
}
