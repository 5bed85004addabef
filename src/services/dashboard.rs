use chrono::NaiveDate;

use crate::dto::dashboard::{DashboardPageData, PopularService, RevenueCard};
use crate::repository::{CollectionReader, CollectionWriter};
use crate::services::{Records, ServiceResult};
use crate::store::BarberStore;
use crate::views::{self, Period};

/// Number of upcoming appointments listed on the dashboard.
pub const UPCOMING_LIMIT: usize = 5;
/// Number of catalog entries listed under popular services.
pub const POPULAR_LIMIT: usize = 5;

/// Assembles revenue cards, upcoming appointments and service popularity.
pub fn load_dashboard<R>(
    store: &BarberStore<R>,
    today: NaiveDate,
    privacy: bool,
) -> ServiceResult<DashboardPageData>
where
    R: CollectionReader + CollectionWriter,
{
    let records = Records::of(store);

    let revenue = Period::ALL
        .iter()
        .map(|&period| {
            let summary = views::revenue(store.appointments(), store.payments(), period, today);
            RevenueCard {
                period: period.as_str(),
                label: period.label(),
                total: views::format_currency(summary.total, privacy),
                count: views::format_count(summary.count, privacy),
            }
        })
        .collect();

    let upcoming = views::upcoming_appointments(store.appointments(), today, UPCOMING_LIMIT)
        .into_iter()
        .map(|appointment| records.appointment_row(appointment, privacy))
        .collect();

    let popular_services = views::service_popularity(store.services(), store.appointments())
        .into_iter()
        .take(POPULAR_LIMIT)
        .map(|(service, booked)| PopularService {
            name: service.name.clone(),
            duration: service.duration,
            price: views::format_currency(service.price, privacy),
            booked,
        })
        .collect();

    Ok(DashboardPageData {
        privacy,
        revenue,
        client_count: store.clients().len(),
        upcoming,
        popular_services,
    })
}
