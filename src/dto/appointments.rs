use serde::Serialize;

use crate::dto::{AppointmentRow, SelectOption};

/// Data required to render the appointments list and its forms.
#[derive(Debug, Serialize)]
pub struct AppointmentsPageData {
    pub privacy: bool,
    pub appointments: Vec<AppointmentRow>,
    pub clients: Vec<SelectOption>,
    pub services: Vec<SelectOption>,
    pub methods: Vec<SelectOption>,
    /// `YYYY-MM-DD`, prefilled in the date inputs.
    pub today: String,
}
