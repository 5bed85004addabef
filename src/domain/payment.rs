use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AppointmentId, Money, PaymentId, TypeConstraintError};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "pix")]
    Pix,
    #[serde(rename = "credit")]
    CreditCard,
    #[serde(rename = "debit")]
    DebitCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Pix,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Pix => "pix",
            PaymentMethod::CreditCard => "credit",
            PaymentMethod::DebitCard => "debit",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::CreditCard => "Cartão Crédito",
            PaymentMethod::DebitCard => "Cartão Débito",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "cash" => Ok(PaymentMethod::Cash),
            "pix" => Ok(PaymentMethod::Pix),
            "credit" | "credit-card" => Ok(PaymentMethod::CreditCard),
            "debit" | "debit-card" => Ok(PaymentMethod::DebitCard),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    /// Appointment this payment settles.
    pub appointment_id: AppointmentId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub date: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewPayment {
    pub appointment_id: AppointmentId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub date: NaiveDateTime,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdatePayment {
    pub amount: Option<Money>,
    pub method: Option<PaymentMethod>,
    pub date: Option<NaiveDateTime>,
}

impl Payment {
    pub fn create(new_payment: NewPayment) -> Self {
        Self {
            id: PaymentId::new(),
            appointment_id: new_payment.appointment_id,
            amount: new_payment.amount,
            method: new_payment.method,
            date: new_payment.date,
        }
    }

    pub fn apply(&mut self, updates: &UpdatePayment) {
        if let Some(amount) = updates.amount {
            self.amount = amount;
        }
        if let Some(method) = updates.method {
            self.method = method;
        }
        if let Some(date) = updates.date {
            self.date = date;
        }
    }
}
