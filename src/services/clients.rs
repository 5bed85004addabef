use validator::Validate;

use crate::domain::client::{Client, UpdateClient};
use crate::domain::types::ClientId;
use crate::dto::DISPLAY_DATE_FORMAT;
use crate::dto::clients::{ClientPageData, ClientRow, ClientsPageData};
use crate::forms::client::{AddClientForm, SaveClientForm};
use crate::repository::{CollectionReader, CollectionWriter};
use crate::services::{Records, ServiceError, ServiceResult, parse_id};
use crate::store::BarberStore;
use crate::views;

fn client_row(records: &Records<'_>, client: &Client, privacy: bool) -> ClientRow {
    ClientRow {
        id: client.id.to_string(),
        name: client.name.clone(),
        phone: client.phone.clone(),
        email: client.email.clone(),
        created_at: client.created_at.format(DISPLAY_DATE_FORMAT).to_string(),
        appointment_count: views::appointment_count(client.id, records.appointments),
        total_spent: views::format_currency(
            views::total_spent(client.id, records.appointments, records.payments),
            privacy,
        ),
    }
}

/// Lists every client with visit count and total spent.
pub fn load_clients_page<R>(store: &BarberStore<R>, privacy: bool) -> ServiceResult<ClientsPageData>
where
    R: CollectionReader + CollectionWriter,
{
    let records = Records::of(store);
    let clients = store
        .clients()
        .iter()
        .map(|client| client_row(&records, client, privacy))
        .collect();

    Ok(ClientsPageData { privacy, clients })
}

/// Loads a single client and its appointment history.
pub fn load_client_page<R>(
    store: &BarberStore<R>,
    client_id: &str,
    privacy: bool,
) -> ServiceResult<ClientPageData>
where
    R: CollectionReader + CollectionWriter,
{
    let client_id: ClientId = parse_id(client_id)?;
    let client = store.client(client_id).ok_or(ServiceError::NotFound)?;
    let records = Records::of(store);

    let history = views::client_history(
        client_id,
        store.appointments(),
        store.services(),
        store.payments(),
    )
    .into_iter()
    .map(|entry| records.appointment_row(entry.appointment, privacy))
    .collect();

    Ok(ClientPageData {
        privacy,
        client: client_row(&records, client, privacy),
        history,
    })
}

/// Validates the add-client form and persists a new client record.
pub fn add_client<R>(store: &mut BarberStore<R>, form: &AddClientForm) -> ServiceResult<Client>
where
    R: CollectionReader + CollectionWriter,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Nome e telefone são obrigatórios".to_string()));
    }

    store.add_client(form.to_new_client()).map_err(|err| {
        log::error!("Failed to add a client: {err}");
        ServiceError::from(err)
    })
}

/// Applies the edit form to an existing client.
pub fn save_client<R>(
    store: &mut BarberStore<R>,
    client_id: &str,
    form: &SaveClientForm,
) -> ServiceResult<Client>
where
    R: CollectionReader + CollectionWriter,
{
    let client_id: ClientId = parse_id(client_id)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Nome e telefone são obrigatórios".to_string()));
    }

    let updates = UpdateClient::from(form);
    store
        .update_client(client_id, &updates)
        .map_err(|err| {
            log::error!("Failed to update client: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}
