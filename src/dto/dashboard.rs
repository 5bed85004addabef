use serde::{Deserialize, Serialize};

use crate::dto::AppointmentRow;

/// Query string accepted by every page that shows amounts.
#[derive(Debug, Default, Deserialize)]
pub struct PrivacyQuery {
    #[serde(default)]
    pub privacy: bool,
}

/// Revenue card: formatted total and number of appointments.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RevenueCard {
    pub period: &'static str,
    pub label: &'static str,
    pub total: String,
    pub count: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PopularService {
    pub name: String,
    pub duration: u32,
    pub price: String,
    pub booked: usize,
}

/// Data required to render the dashboard template.
#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    pub privacy: bool,
    pub revenue: Vec<RevenueCard>,
    pub client_count: usize,
    pub upcoming: Vec<AppointmentRow>,
    pub popular_services: Vec<PopularService>,
}
