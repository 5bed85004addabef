//! Derived read models computed from the current collections.
//!
//! Every function here is pure and recomputed on demand. Lookups that miss
//! degrade to placeholder labels and unmatched payments count as zero.

use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use crate::domain::appointment::Appointment;
use crate::domain::client::Client;
use crate::domain::payment::{Payment, PaymentMethod};
use crate::domain::service::Service;
use crate::domain::types::{AppointmentId, ClientId, Money, ServiceId, TypeConstraintError};

pub const CLIENT_NOT_FOUND: &str = "Cliente não encontrado";
pub const SERVICE_NOT_FOUND: &str = "Serviço não encontrado";
pub const HIDDEN_VALUE: &str = "***";

/// Calendar window anchored to "today".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    /// Sunday through Saturday.
    Week,
    /// First through last day of the month.
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Today, Period::Week, Period::Month];

    pub const fn as_str(self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Period::Today => "Hoje",
            Period::Week => "Esta semana",
            Period::Month => "Este mês",
        }
    }

    /// Half-open `[start, end)` date range containing `today`.
    pub fn range(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Today => (today, today + Duration::days(1)),
            Period::Week => {
                let start =
                    today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
                (start, start + Duration::days(7))
            }
            Period::Month => {
                let start = today.with_day(1).unwrap_or(today);
                let end = start
                    .checked_add_months(Months::new(1))
                    .unwrap_or(NaiveDate::MAX);
                (start, end)
            }
        }
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        let (start, end) = self.range(today);
        date >= start && date < end
    }
}

impl FromStr for Period {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

pub fn client_name(clients: &[Client], id: ClientId) -> &str {
    clients
        .iter()
        .find(|c| c.id == id)
        .map_or(CLIENT_NOT_FOUND, |c| c.name.as_str())
}

pub fn service_name(services: &[Service], id: ServiceId) -> &str {
    services
        .iter()
        .find(|s| s.id == id)
        .map_or(SERVICE_NOT_FOUND, |s| s.name.as_str())
}

pub fn service_price(services: &[Service], id: ServiceId) -> Money {
    services
        .iter()
        .find(|s| s.id == id)
        .map_or(Money::ZERO, |s| s.price)
}

/// First payment settling the appointment; later duplicates are ignored.
pub fn payment_for(payments: &[Payment], appointment_id: AppointmentId) -> Option<&Payment> {
    payments.iter().find(|p| p.appointment_id == appointment_id)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RevenueSummary {
    pub total: Money,
    pub count: usize,
}

/// Revenue of the appointments dated inside `period`.
///
/// `count` includes appointments without a payment; they add zero to `total`.
pub fn revenue(
    appointments: &[Appointment],
    payments: &[Payment],
    period: Period,
    today: NaiveDate,
) -> RevenueSummary {
    let in_period: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| period.contains(a.date, today))
        .collect();

    let total = in_period
        .iter()
        .filter_map(|a| payment_for(payments, a.id))
        .map(|p| p.amount)
        .sum();

    RevenueSummary {
        total,
        count: in_period.len(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub method: Option<PaymentMethod>,
    pub period: Option<Period>,
}

/// Payments matching the filter, newest first.
pub fn filter_payments<'a>(
    payments: &'a [Payment],
    filter: &PaymentFilter,
    today: NaiveDate,
) -> Vec<&'a Payment> {
    let mut filtered: Vec<&Payment> = payments
        .iter()
        .filter(|p| filter.method.is_none_or(|method| p.method == method))
        .filter(|p| {
            filter
                .period
                .is_none_or(|period| period.contains(p.date.date(), today))
        })
        .collect();
    filtered.sort_by(|a, b| b.date.cmp(&a.date));
    filtered
}

pub fn payment_summary(payments: &[&Payment]) -> RevenueSummary {
    RevenueSummary {
        total: payments.iter().map(|p| p.amount).sum(),
        count: payments.len(),
    }
}

/// Totals per payment method over every stored payment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MethodTotals {
    pub cash: Money,
    pub pix: Money,
    pub credit: Money,
    pub debit: Money,
}

impl MethodTotals {
    pub fn cards(&self) -> Money {
        self.credit + self.debit
    }
}

pub fn method_totals(payments: &[Payment]) -> MethodTotals {
    payments
        .iter()
        .fold(MethodTotals::default(), |mut totals, payment| {
            let slot = match payment.method {
                PaymentMethod::Cash => &mut totals.cash,
                PaymentMethod::Pix => &mut totals.pix,
                PaymentMethod::CreditCard => &mut totals.credit,
                PaymentMethod::DebitCard => &mut totals.debit,
            };
            *slot = *slot + payment.amount;
            totals
        })
}

pub fn total_spent(client_id: ClientId, appointments: &[Appointment], payments: &[Payment]) -> Money {
    appointments
        .iter()
        .filter(|a| a.client_id == client_id)
        .filter_map(|a| payment_for(payments, a.id))
        .map(|p| p.amount)
        .sum()
}

pub fn appointment_count(client_id: ClientId, appointments: &[Appointment]) -> usize {
    appointments
        .iter()
        .filter(|a| a.client_id == client_id)
        .count()
}

/// One line of a client's history.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry<'a> {
    pub appointment: &'a Appointment,
    pub service: Option<&'a Service>,
    pub payment: Option<&'a Payment>,
}

/// The client's appointments with service and payment, newest first.
pub fn client_history<'a>(
    client_id: ClientId,
    appointments: &'a [Appointment],
    services: &'a [Service],
    payments: &'a [Payment],
) -> Vec<HistoryEntry<'a>> {
    let mut history: Vec<HistoryEntry<'a>> = appointments
        .iter()
        .filter(|a| a.client_id == client_id)
        .map(|appointment| HistoryEntry {
            appointment,
            service: services.iter().find(|s| s.id == appointment.service_id),
            payment: payment_for(payments, appointment.id),
        })
        .collect();
    history.sort_by(|a, b| b.appointment.starts_at().cmp(&a.appointment.starts_at()));
    history
}

/// All appointments by date and time, latest first.
pub fn sorted_appointments(appointments: &[Appointment]) -> Vec<&Appointment> {
    let mut sorted: Vec<&Appointment> = appointments.iter().collect();
    sorted.sort_by(|a, b| b.starts_at().cmp(&a.starts_at()));
    sorted
}

/// Appointments dated today or later, soonest first.
pub fn upcoming_appointments(
    appointments: &[Appointment],
    today: NaiveDate,
    limit: usize,
) -> Vec<&Appointment> {
    let mut upcoming: Vec<&Appointment> =
        appointments.iter().filter(|a| a.date >= today).collect();
    upcoming.sort_by_key(|a| a.starts_at());
    upcoming.truncate(limit);
    upcoming
}

/// Number of appointments booked per service, in catalog order.
pub fn service_popularity<'a>(
    services: &'a [Service],
    appointments: &[Appointment],
) -> Vec<(&'a Service, usize)> {
    services
        .iter()
        .map(|service| {
            let booked = appointments
                .iter()
                .filter(|a| a.service_id == service.id)
                .count();
            (service, booked)
        })
        .collect()
}

/// Renders `R$ 25.00`, or a mask when privacy mode is on.
pub fn format_currency(amount: Money, privacy: bool) -> String {
    if privacy {
        HIDDEN_VALUE.to_string()
    } else {
        format!("R$ {amount}")
    }
}

pub fn format_count(count: usize, privacy: bool) -> String {
    if privacy {
        HIDDEN_VALUE.to_string()
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, NaiveTime};

    use super::*;
    use crate::domain::appointment::{AppointmentStatus, NewAppointment};
    use crate::domain::payment::NewPayment;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(day: NaiveDate, hour: u32) -> NaiveDateTime {
        day.and_hms_opt(hour, 0, 0).unwrap()
    }

    fn appointment_on(day: NaiveDate, client_id: ClientId) -> Appointment {
        Appointment::create(NewAppointment::new(
            client_id,
            ServiceId::new(),
            day,
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            None,
        ))
    }

    fn payment(appointment_id: AppointmentId, cents: i64, method: PaymentMethod, when: NaiveDateTime) -> Payment {
        Payment::create(NewPayment {
            appointment_id,
            amount: Money::from_cents(cents).unwrap(),
            method,
            date: when,
        })
    }

    #[test]
    fn week_starts_on_sunday_and_month_on_first() {
        // 2024-05-15 is a Wednesday.
        let today = date(2024, 5, 15);
        assert_eq!(Period::Week.range(today), (date(2024, 5, 12), date(2024, 5, 19)));
        assert_eq!(Period::Month.range(today), (date(2024, 5, 1), date(2024, 6, 1)));
        assert_eq!(Period::Today.range(today), (today, date(2024, 5, 16)));

        let sunday = date(2024, 5, 12);
        assert_eq!(Period::Week.range(sunday).0, sunday);
        assert_eq!(Period::Month.range(date(2024, 12, 31)).1, date(2025, 1, 1));
    }

    #[test]
    fn todays_revenue_counts_unpaid_appointments_as_zero() {
        let today = date(2024, 5, 15);
        let client = ClientId::new();
        let appointments = vec![
            appointment_on(today, client),
            appointment_on(today, client),
            appointment_on(today, client),
        ];
        let payments = vec![
            payment(appointments[0].id, 2500, PaymentMethod::Cash, at(today, 11)),
            payment(appointments[1].id, 3500, PaymentMethod::Pix, at(today, 12)),
        ];

        let summary = revenue(&appointments, &payments, Period::Today, today);

        assert_eq!(summary.total, Money::from_cents(6000).unwrap());
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn revenue_excludes_appointments_outside_period() {
        let today = date(2024, 5, 15);
        let client = ClientId::new();
        let appointments = vec![
            appointment_on(date(2024, 5, 11), client),
            appointment_on(date(2024, 5, 13), client),
            appointment_on(date(2024, 4, 30), client),
        ];
        let payments: Vec<Payment> = appointments
            .iter()
            .map(|a| payment(a.id, 1000, PaymentMethod::Cash, at(a.date, 10)))
            .collect();

        let week = revenue(&appointments, &payments, Period::Week, today);
        assert_eq!((week.total.cents(), week.count), (1000, 1));

        let month = revenue(&appointments, &payments, Period::Month, today);
        assert_eq!((month.total.cents(), month.count), (2000, 2));
    }

    #[test]
    fn filtering_by_pix_returns_only_pix_newest_first() {
        let today = date(2024, 5, 15);
        let id = AppointmentId::new();
        let payments = vec![
            payment(id, 100, PaymentMethod::Pix, at(date(2024, 5, 1), 9)),
            payment(id, 200, PaymentMethod::Cash, at(today, 9)),
            payment(id, 300, PaymentMethod::Pix, at(date(2024, 5, 10), 9)),
            payment(id, 400, PaymentMethod::CreditCard, at(today, 10)),
            payment(id, 500, PaymentMethod::DebitCard, at(today, 11)),
        ];

        let filtered = filter_payments(
            &payments,
            &PaymentFilter {
                method: Some(PaymentMethod::Pix),
                period: None,
            },
            today,
        );

        let amounts: Vec<i64> = filtered.iter().map(|p| p.amount.cents()).collect();
        assert_eq!(amounts, vec![300, 100]);
    }

    #[test]
    fn filtering_by_period_and_summary() {
        let today = date(2024, 5, 15);
        let id = AppointmentId::new();
        let payments = vec![
            payment(id, 100, PaymentMethod::Pix, at(date(2024, 4, 30), 9)),
            payment(id, 200, PaymentMethod::Cash, at(today, 9)),
            payment(id, 300, PaymentMethod::Cash, at(today, 18)),
        ];

        let filtered = filter_payments(
            &payments,
            &PaymentFilter {
                method: None,
                period: Some(Period::Month),
            },
            today,
        );
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].amount.cents(), 300);
        assert_eq!(payment_summary(&filtered).total.cents(), 500);

        let totals = method_totals(&payments);
        assert_eq!(totals.cash.cents(), 500);
        assert_eq!(totals.pix.cents(), 100);
        assert_eq!(totals.cards(), Money::ZERO);
    }

    #[test]
    fn lookups_fall_back_to_placeholders() {
        assert_eq!(client_name(&[], ClientId::new()), CLIENT_NOT_FOUND);
        assert_eq!(service_name(&[], ServiceId::new()), SERVICE_NOT_FOUND);
        assert_eq!(service_price(&[], ServiceId::new()), Money::ZERO);
        assert!(payment_for(&[], AppointmentId::new()).is_none());
    }

    #[test]
    fn payment_for_uses_first_match() {
        let id = AppointmentId::new();
        let when = at(date(2024, 5, 15), 9);
        let payments = vec![
            payment(id, 100, PaymentMethod::Cash, when),
            payment(id, 999, PaymentMethod::Cash, when),
        ];
        assert_eq!(payment_for(&payments, id).map(|p| p.amount.cents()), Some(100));
    }

    #[test]
    fn total_spent_sums_only_the_clients_paid_appointments() {
        let day = date(2024, 5, 15);
        let ana = ClientId::new();
        let bia = ClientId::new();
        let appointments = vec![
            appointment_on(day, ana),
            appointment_on(day, ana),
            appointment_on(day, bia),
        ];
        let payments = vec![
            payment(appointments[0].id, 2500, PaymentMethod::Cash, at(day, 9)),
            payment(appointments[2].id, 1000, PaymentMethod::Cash, at(day, 9)),
        ];

        assert_eq!(total_spent(ana, &appointments, &payments).cents(), 2500);
        assert_eq!(appointment_count(ana, &appointments), 2);
        assert_eq!(total_spent(ClientId::new(), &appointments, &payments), Money::ZERO);
    }

    #[test]
    fn upcoming_skips_past_and_limits() {
        let today = date(2024, 5, 15);
        let client = ClientId::new();
        let mut appointments: Vec<Appointment> = (0..7)
            .map(|offset| appointment_on(today + Duration::days(offset), client))
            .collect();
        appointments.push(appointment_on(date(2024, 5, 1), client));

        let upcoming = upcoming_appointments(&appointments, today, 5);
        assert_eq!(upcoming.len(), 5);
        assert_eq!(upcoming[0].date, today);
        assert!(upcoming.iter().all(|a| a.date >= today));
    }

    #[test]
    fn client_history_is_newest_first() {
        let client = ClientId::new();
        let older = appointment_on(date(2024, 1, 1), client);
        let mut newer = appointment_on(date(2024, 2, 1), client);
        newer.status = AppointmentStatus::Completed;
        let appointments = vec![older.clone(), newer.clone()];

        let history = client_history(client, &appointments, &[], &[]);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].appointment.id, newer.id);
        assert!(history[0].service.is_none());
    }

    #[test]
    fn privacy_masks_values() {
        let amount = Money::from_cents(1234).unwrap();
        assert_eq!(format_currency(amount, false), "R$ 12.34");
        assert_eq!(format_currency(amount, true), "***");
        assert_eq!(format_count(3, true), "***");
    }
}
