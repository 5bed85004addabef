//! Barbershop front desk: clients, services, appointments and payments.

#[cfg(feature = "server")]
use std::sync::Mutex;

#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::{establish_connection_pool, run_migrations};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::store::BarberStore;

pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;
pub mod views;

/// Registers every page and form handler.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    use crate::routes::appointments::{
        add_appointment, cancel_appointment, complete_appointment, record_visit,
        show_appointments,
    };
    use crate::routes::catalog::{add_service, save_service, show_services};
    use crate::routes::clients::{add_client, save_client, show_client, show_clients};
    use crate::routes::main::show_dashboard;
    use crate::routes::payments::{show_payments, update_payment_method};

    cfg.service(show_dashboard)
        .service(show_clients)
        .service(add_client)
        .service(show_client)
        .service(save_client)
        .service(show_services)
        .service(add_service)
        .service(save_service)
        .service(show_appointments)
        .service(add_appointment)
        .service(complete_appointment)
        .service(cancel_appointment)
        .service(record_visit)
        .service(show_payments)
        .service(update_payment_method);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    let store = BarberStore::open(DieselRepository::new(pool))
        .map_err(|e| std::io::Error::other(format!("Failed to open record store: {e}")))?;
    let store = web::Data::new(Mutex::new(store));

    // Key and store for flash messages.
    if server_config.secret.len() < 64 {
        return Err(std::io::Error::other(
            "Secret must be at least 64 bytes long",
        ));
    }
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure)
            .app_data(store.clone())
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
