use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::dashboard::PrivacyQuery;
use crate::forms::client::{AddClientForm, SaveClientForm};
use crate::routes::{SharedStore, base_context, lock_store, redirect, render_template};
use crate::services::{ServiceError, clients as clients_service};

#[get("/clients")]
pub async fn show_clients(
    query: web::Query<PrivacyQuery>,
    store: web::Data<SharedStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match clients_service::load_clients_page(&store, query.privacy) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "clients");
            context.insert("page", &data);
            render_template(&tera, "clients/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list clients: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/clients/add")]
pub async fn add_client(
    store: web::Data<SharedStore>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    let mut store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match clients_service::add_client(&mut store, &form) {
        Ok(_) => {
            FlashMessage::success("Cliente adicionado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add a client: {err}");
            FlashMessage::error("Erro ao adicionar cliente").send();
        }
    }
    redirect("/clients")
}

#[get("/clients/{client_id}")]
pub async fn show_client(
    client_id: web::Path<String>,
    query: web::Query<PrivacyQuery>,
    store: web::Data<SharedStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match clients_service::load_client_page(&store, &client_id, query.privacy) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "clients");
            context.insert("page", &data);
            render_template(&tera, "clients/show.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Cliente não encontrado").send();
            redirect("/clients")
        }
        Err(err) => {
            log::error!("Failed to load client: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/clients/{client_id}/save")]
pub async fn save_client(
    client_id: web::Path<String>,
    store: web::Data<SharedStore>,
    web::Form(form): web::Form<SaveClientForm>,
) -> impl Responder {
    let mut store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match clients_service::save_client(&mut store, &client_id, &form) {
        Ok(client) => {
            FlashMessage::success("Cliente atualizado.").send();
            redirect(&format!("/clients/{}", client.id))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Cliente não encontrado").send();
            redirect("/clients")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/clients/{client_id}"))
        }
        Err(err) => {
            log::error!("Failed to update client: {err}");
            FlashMessage::error("Erro ao atualizar cliente").send();
            redirect(&format!("/clients/{client_id}"))
        }
    }
}
