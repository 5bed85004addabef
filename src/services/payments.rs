use chrono::NaiveDate;
use validator::Validate;

use crate::domain::payment::{Payment, PaymentMethod};
use crate::domain::types::PaymentId;
use crate::dto::payments::{MethodTotalsRow, PaymentRow, PaymentsPageData, PaymentsQuery};
use crate::dto::{SelectOption, method_options};
use crate::forms::payment::UpdatePaymentMethodForm;
use crate::repository::{CollectionReader, CollectionWriter};
use crate::services::{ServiceError, ServiceResult, parse_id};
use crate::store::BarberStore;
use crate::views::{self, Period, PaymentFilter};

const ALL: &str = "all";

/// Reads the query string into a filter. Unknown values mean "no filter".
fn parse_filter(query: &PaymentsQuery) -> PaymentFilter {
    let method = query
        .method
        .as_deref()
        .filter(|m| *m != ALL)
        .and_then(|m| m.parse::<PaymentMethod>().ok());
    let period = query
        .period
        .as_deref()
        .filter(|p| *p != ALL)
        .and_then(|p| p.parse::<Period>().ok());
    PaymentFilter { method, period }
}

/// Lists payments matching the query along with their totals.
pub fn load_payments_page<R>(
    store: &BarberStore<R>,
    today: NaiveDate,
    query: &PaymentsQuery,
) -> ServiceResult<PaymentsPageData>
where
    R: CollectionReader + CollectionWriter,
{
    let privacy = query.privacy;
    let filter = parse_filter(query);
    let filtered = views::filter_payments(store.payments(), &filter, today);
    let summary = views::payment_summary(&filtered);

    let payments = filtered
        .iter()
        .map(|payment| {
            let appointment = store.appointment(payment.appointment_id);
            PaymentRow {
                id: payment.id.to_string(),
                date: payment.date.format("%d/%m/%Y %H:%M").to_string(),
                client_name: appointment
                    .map(|a| views::client_name(store.clients(), a.client_id))
                    .unwrap_or(views::CLIENT_NOT_FOUND)
                    .to_string(),
                service_name: appointment
                    .map(|a| views::service_name(store.services(), a.service_id))
                    .unwrap_or(views::SERVICE_NOT_FOUND)
                    .to_string(),
                amount: views::format_currency(payment.amount, privacy),
                method: payment.method.as_str(),
                method_label: payment.method.label(),
            }
        })
        .collect();

    let totals = views::method_totals(store.payments());

    let mut periods = vec![SelectOption::new(ALL, "Todos os períodos")];
    periods.extend(
        Period::ALL
            .iter()
            .map(|period| SelectOption::new(period.as_str(), period.label())),
    );
    let mut methods = vec![SelectOption::new(ALL, "Todas as formas")];
    methods.extend(method_options());

    Ok(PaymentsPageData {
        privacy,
        payments,
        total: views::format_currency(summary.total, privacy),
        count: views::format_count(summary.count, privacy),
        method_totals: MethodTotalsRow {
            cash: views::format_currency(totals.cash, privacy),
            pix: views::format_currency(totals.pix, privacy),
            cards: views::format_currency(totals.cards(), privacy),
        },
        selected_method: filter.method.map_or(ALL, PaymentMethod::as_str).to_string(),
        selected_period: filter.period.map_or(ALL, Period::as_str).to_string(),
        methods,
        periods,
    })
}

/// Corrects the method recorded for a payment.
pub fn update_payment_method<R>(
    store: &mut BarberStore<R>,
    payment_id: &str,
    form: &UpdatePaymentMethodForm,
) -> ServiceResult<Payment>
where
    R: CollectionReader + CollectionWriter,
{
    let payment_id: PaymentId = parse_id(payment_id)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Forma de pagamento obrigatória".to_string()));
    }
    let updates = form.to_update()?;

    store
        .update_payment(payment_id, &updates)
        .map_err(|err| {
            log::error!("Failed to update payment {payment_id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveTime};

    use super::*;
    use crate::domain::appointment::NewAppointment;
    use crate::domain::client::NewClient;
    use crate::repository::memory::InMemoryRepository;
    use crate::store::{Completion, NewVisit};

    fn store_with_payments(methods: &[PaymentMethod]) -> BarberStore<InMemoryRepository> {
        let mut store = BarberStore::open(InMemoryRepository::new()).unwrap();
        let client = store
            .add_client(NewClient::new("Davi".into(), "1".into(), None))
            .unwrap();
        let service_id = store.services()[0].id;
        for &method in methods {
            store
                .record_visit(NewVisit {
                    client_id: client.id,
                    service_id,
                    date: Local::now().date_naive(),
                    time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                    notes: None,
                    completion: Completion {
                        method,
                        amount: None,
                    },
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn filters_by_method() {
        let store = store_with_payments(&[
            PaymentMethod::Pix,
            PaymentMethod::Cash,
            PaymentMethod::Pix,
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
        ]);
        let query = PaymentsQuery {
            method: Some("pix".into()),
            period: Some("all".into()),
            privacy: false,
        };

        let page = load_payments_page(&store, Local::now().date_naive(), &query).unwrap();

        assert_eq!(page.payments.len(), 2);
        assert!(page.payments.iter().all(|p| p.method == "pix"));
        assert_eq!(page.total, "R$ 50.00");
        assert_eq!(page.count, "2");
        assert_eq!(page.selected_method, "pix");
        assert_eq!(page.selected_period, "all");
        assert_eq!(page.method_totals.cards, "R$ 50.00");
        assert_eq!(page.payments[0].client_name, "Davi");
        assert_eq!(page.payments[0].service_name, "Corte Masculino");
    }

    #[test]
    fn unknown_filters_show_everything() {
        let store = store_with_payments(&[PaymentMethod::Cash, PaymentMethod::Pix]);
        let query = PaymentsQuery {
            method: Some("cheque".into()),
            period: Some("decade".into()),
            privacy: true,
        };
        let page = load_payments_page(&store, Local::now().date_naive(), &query).unwrap();
        assert_eq!(page.payments.len(), 2);
        assert_eq!(page.total, "***");
        assert_eq!(page.selected_method, "all");
    }

    #[test]
    fn payment_for_unknown_appointment_uses_placeholders() {
        let mut store = BarberStore::open(InMemoryRepository::new()).unwrap();
        let appointment = store
            .add_appointment(NewAppointment::new(
                crate::domain::types::ClientId::new(),
                crate::domain::types::ServiceId::new(),
                Local::now().date_naive(),
                NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                None,
            ))
            .unwrap();
        store
            .add_payment(crate::domain::payment::NewPayment {
                appointment_id: appointment.id,
                amount: crate::domain::types::Money::from_cents(100).unwrap(),
                method: PaymentMethod::Cash,
                date: Local::now().naive_local(),
            })
            .unwrap();

        let page =
            load_payments_page(&store, Local::now().date_naive(), &PaymentsQuery::default())
                .unwrap();
        assert_eq!(page.payments[0].client_name, views::CLIENT_NOT_FOUND);
        assert_eq!(page.payments[0].service_name, views::SERVICE_NOT_FOUND);
    }

    #[test]
    fn update_payment_method_changes_only_method() {
        let mut store = store_with_payments(&[PaymentMethod::Cash]);
        let payment = store.payments()[0].clone();

        let updated = update_payment_method(
            &mut store,
            &payment.id.to_string(),
            &UpdatePaymentMethodForm {
                method: "debit".into(),
            },
        )
        .unwrap();

        assert_eq!(updated.method, PaymentMethod::DebitCard);
        assert_eq!(updated.amount, payment.amount);
        assert_eq!(store.payments()[0].method, PaymentMethod::DebitCard);
    }
}
