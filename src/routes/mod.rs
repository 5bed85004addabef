//! HTTP handlers rendering the barbershop pages.

use std::sync::{Mutex, MutexGuard};

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use chrono::{Local, NaiveDate};
use tera::{Context, Tera};

use crate::repository::DieselRepository;
use crate::store::BarberStore;

pub mod appointments;
pub mod catalog;
pub mod clients;
pub mod main;
pub mod payments;

/// Record store shared by every worker.
pub type SharedStore = Mutex<BarberStore<DieselRepository>>;

/// Maps a flash message level to the CSS alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: pending alerts and the active tab.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// 303 redirect, so browsers follow a form POST with a GET.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Locks the shared store, answering 500 if a previous holder panicked.
pub fn lock_store(
    store: &SharedStore,
) -> Result<MutexGuard<'_, BarberStore<DieselRepository>>, HttpResponse> {
    store.lock().map_err(|err| {
        log::error!("Record store lock poisoned: {err}");
        HttpResponse::InternalServerError().finish()
    })
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
