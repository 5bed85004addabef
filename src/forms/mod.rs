//! Form definitions backing the barbershop routes.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::{Money, TypeConstraintError};

pub mod appointment;
pub mod client;
pub mod payment;
pub mod service;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid amount")]
    InvalidAmount,

    #[error("invalid duration")]
    InvalidDuration,

    #[error("invalid date")]
    InvalidDate,

    #[error("invalid time")]
    InvalidTime,

    #[error("invalid identifier")]
    InvalidId,

    #[error("invalid payment method")]
    InvalidMethod,
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::NonPositiveDuration => FormError::InvalidDuration,
            TypeConstraintError::InvalidUuid => FormError::InvalidId,
            _ => FormError::InvalidAmount,
        }
    }
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| FormError::InvalidDate)
}

/// Accepts `HH:MM` from time inputs and `HH:MM:SS` from older browsers.
pub(crate) fn parse_time(value: &str) -> Result<NaiveTime, FormError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| FormError::InvalidTime)
}

/// Parses an optional amount. Blank and zero mean "not provided".
pub(crate) fn parse_optional_amount(value: Option<&str>) -> Result<Option<Money>, FormError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => {
            let amount: Money = raw.parse().map_err(|_| FormError::InvalidAmount)?;
            Ok((!amount.is_zero()).then_some(amount))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dates_and_times() {
        assert_eq!(
            parse_date("2024-05-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
        );
        assert!(matches!(parse_date("15/05/2024"), Err(FormError::InvalidDate)));
        assert_eq!(
            parse_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time("09:30:15").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 15).unwrap()
        );
        assert!(matches!(parse_time("25:00"), Err(FormError::InvalidTime)));
    }

    #[test]
    fn optional_amount_treats_blank_and_zero_as_absent() {
        assert_eq!(parse_optional_amount(None).unwrap(), None);
        assert_eq!(parse_optional_amount(Some("  ")).unwrap(), None);
        assert_eq!(parse_optional_amount(Some("0")).unwrap(), None);
        assert_eq!(
            parse_optional_amount(Some("30,00")).unwrap(),
            Some(Money::from_cents(3000).unwrap())
        );
        assert!(matches!(
            parse_optional_amount(Some("abc")),
            Err(FormError::InvalidAmount)
        ));
    }
}
