use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::dashboard::PrivacyQuery;
use crate::routes::{SharedStore, base_context, lock_store, render_template, today};
use crate::services::dashboard as dashboard_service;

#[get("/")]
pub async fn show_dashboard(
    query: web::Query<PrivacyQuery>,
    store: web::Data<SharedStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match dashboard_service::load_dashboard(&store, today(), query.privacy) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "dashboard");
            context.insert("page", &data);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
