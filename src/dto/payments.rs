use serde::{Deserialize, Serialize};

use crate::dto::SelectOption;

/// Query parameters accepted by the payments page.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentsQuery {
    /// Payment method value, or `all`.
    pub method: Option<String>,
    /// `today`, `week`, `month`, or `all`.
    pub period: Option<String>,
    #[serde(default)]
    pub privacy: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PaymentRow {
    pub id: String,
    pub date: String,
    pub client_name: String,
    pub service_name: String,
    pub amount: String,
    pub method: &'static str,
    pub method_label: &'static str,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MethodTotalsRow {
    pub cash: String,
    pub pix: String,
    pub cards: String,
}

/// Data required to render the payments page.
#[derive(Debug, Serialize)]
pub struct PaymentsPageData {
    pub privacy: bool,
    pub payments: Vec<PaymentRow>,
    pub total: String,
    pub count: String,
    pub method_totals: MethodTotalsRow,
    pub selected_method: String,
    pub selected_period: String,
    pub methods: Vec<SelectOption>,
    pub periods: Vec<SelectOption>,
}
