use serde::Serialize;

use crate::dto::AppointmentRow;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ClientRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub created_at: String,
    pub appointment_count: usize,
    pub total_spent: String,
}

/// Data required to render the clients list.
#[derive(Debug, Serialize)]
pub struct ClientsPageData {
    pub privacy: bool,
    pub clients: Vec<ClientRow>,
}

/// Data required to render a single client with its history.
#[derive(Debug, Serialize)]
pub struct ClientPageData {
    pub privacy: bool,
    pub client: ClientRow,
    pub history: Vec<AppointmentRow>,
}
