use validator::Validate;

use crate::domain::service::Service;
use crate::domain::types::ServiceId;
use crate::dto::catalog::{ServiceRow, ServicesPageData};
use crate::forms::service::{AddServiceForm, SaveServiceForm};
use crate::repository::{CollectionReader, CollectionWriter};
use crate::services::{ServiceError, ServiceResult, parse_id};
use crate::store::BarberStore;
use crate::views;

/// Lists the service catalog with how often each entry was booked.
pub fn load_services_page<R>(
    store: &BarberStore<R>,
    privacy: bool,
) -> ServiceResult<ServicesPageData>
where
    R: CollectionReader + CollectionWriter,
{
    let services = views::service_popularity(store.services(), store.appointments())
        .into_iter()
        .map(|(service, booked)| ServiceRow {
            id: service.id.to_string(),
            name: service.name.clone(),
            price: views::format_currency(service.price, privacy),
            price_input: service.price.to_string(),
            duration: service.duration,
            description: service.description.clone(),
            booked,
        })
        .collect();

    Ok(ServicesPageData { privacy, services })
}

/// Validates the add-service form and appends the entry to the catalog.
pub fn add_service<R>(store: &mut BarberStore<R>, form: &AddServiceForm) -> ServiceResult<Service>
where
    R: CollectionReader + CollectionWriter,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Nome, preço e duração são obrigatórios".to_string(),
        ));
    }

    let new_service = form.to_new_service().map_err(|err| {
        log::error!("Failed to parse service form: {err}");
        ServiceError::from(err)
    })?;

    store.add_service(new_service).map_err(|err| {
        log::error!("Failed to add a service: {err}");
        ServiceError::from(err)
    })
}

/// Applies the edit form to an existing catalog entry.
pub fn save_service<R>(
    store: &mut BarberStore<R>,
    service_id: &str,
    form: &SaveServiceForm,
) -> ServiceResult<Service>
where
    R: CollectionReader + CollectionWriter,
{
    let service_id: ServiceId = parse_id(service_id)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Nome, preço e duração são obrigatórios".to_string(),
        ));
    }

    let updates = form.to_update()?;
    store
        .update_service(service_id, &updates)
        .map_err(|err| {
            log::error!("Failed to update service: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::InMemoryRepository;

    fn store() -> BarberStore<InMemoryRepository> {
        BarberStore::open(InMemoryRepository::new()).unwrap()
    }

    #[test]
    fn services_page_lists_seeded_catalog() {
        let store = store();
        let page = load_services_page(&store, false).unwrap();
        assert_eq!(page.services.len(), 4);
        assert_eq!(page.services[0].price, "R$ 25.00");
        assert_eq!(page.services[0].price_input, "25.00");
        assert_eq!(page.services[0].booked, 0);
    }

    #[test]
    fn add_service_appends_entry() {
        let mut store = store();
        let service = add_service(
            &mut store,
            &AddServiceForm {
                name: "Pigmentação".into(),
                price: "40".into(),
                duration: 30,
                description: String::new(),
            },
        )
        .unwrap();

        assert_eq!(store.services().len(), 5);
        assert_eq!(store.services().last(), Some(&service));
        assert_eq!(service.price.cents(), 4000);
    }

    #[test]
    fn add_service_with_bad_price_stores_nothing() {
        let mut store = store();
        let result = add_service(
            &mut store,
            &AddServiceForm {
                name: "Pigmentação".into(),
                price: "caro".into(),
                duration: 30,
                description: String::new(),
            },
        );
        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(store.services().len(), 4);
    }

    #[test]
    fn save_service_changes_price() {
        let mut store = store();
        let id = store.services()[1].id;
        let updated = save_service(
            &mut store,
            &id.to_string(),
            &SaveServiceForm {
                name: "Barba".into(),
                price: "17,50".into(),
                duration: 20,
                description: String::new(),
            },
        )
        .unwrap();
        assert_eq!(updated.price.cents(), 1750);
        assert_eq!(store.service(id).map(|s| s.price.cents()), Some(1750));
    }
}
