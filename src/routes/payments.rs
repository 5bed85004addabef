use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::payments::PaymentsQuery;
use crate::forms::payment::UpdatePaymentMethodForm;
use crate::routes::{SharedStore, base_context, lock_store, redirect, render_template, today};
use crate::services::{ServiceError, payments as payments_service};

#[get("/payments")]
pub async fn show_payments(
    query: web::Query<PaymentsQuery>,
    store: web::Data<SharedStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match payments_service::load_payments_page(&store, today(), &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "payments");
            context.insert("page", &data);
            render_template(&tera, "payments/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list payments: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/payments/{payment_id}/method")]
pub async fn update_payment_method(
    payment_id: web::Path<String>,
    store: web::Data<SharedStore>,
    web::Form(form): web::Form<UpdatePaymentMethodForm>,
) -> impl Responder {
    let mut store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match payments_service::update_payment_method(&mut store, &payment_id, &form) {
        Ok(_) => {
            FlashMessage::success("Pagamento atualizado.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Pagamento não encontrado").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update payment: {err}");
            FlashMessage::error("Erro ao atualizar pagamento").send();
        }
    }
    redirect("/payments")
}
