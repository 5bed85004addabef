use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::dashboard::PrivacyQuery;
use crate::forms::service::{AddServiceForm, SaveServiceForm};
use crate::routes::{SharedStore, base_context, lock_store, redirect, render_template};
use crate::services::{ServiceError, catalog as catalog_service};

#[get("/services")]
pub async fn show_services(
    query: web::Query<PrivacyQuery>,
    store: web::Data<SharedStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match catalog_service::load_services_page(&store, query.privacy) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "services");
            context.insert("page", &data);
            render_template(&tera, "services/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list services: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/services/add")]
pub async fn add_service(
    store: web::Data<SharedStore>,
    web::Form(form): web::Form<AddServiceForm>,
) -> impl Responder {
    let mut store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match catalog_service::add_service(&mut store, &form) {
        Ok(_) => {
            FlashMessage::success("Serviço adicionado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add a service: {err}");
            FlashMessage::error("Erro ao adicionar serviço").send();
        }
    }
    redirect("/services")
}

#[post("/services/{service_id}/save")]
pub async fn save_service(
    service_id: web::Path<String>,
    store: web::Data<SharedStore>,
    web::Form(form): web::Form<SaveServiceForm>,
) -> impl Responder {
    let mut store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match catalog_service::save_service(&mut store, &service_id, &form) {
        Ok(_) => {
            FlashMessage::success("Serviço atualizado.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Serviço não encontrado").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update service: {err}");
            FlashMessage::error("Erro ao atualizar serviço").send();
        }
    }
    redirect("/services")
}
