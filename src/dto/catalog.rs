use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ServiceRow {
    pub id: String,
    pub name: String,
    /// Formatted for display, honoring privacy mode.
    pub price: String,
    /// Raw `0.00` value used to prefill the edit form.
    pub price_input: String,
    pub duration: u32,
    pub description: Option<String>,
    pub booked: usize,
}

/// Data required to render the services catalog.
#[derive(Debug, Serialize)]
pub struct ServicesPageData {
    pub privacy: bool,
    pub services: Vec<ServiceRow>,
}
