use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::dto::dashboard::PrivacyQuery;
use crate::forms::appointment::{AddAppointmentForm, CompleteAppointmentForm, RecordVisitForm};
use crate::repository::errors::RepositoryError;
use crate::routes::{SharedStore, base_context, lock_store, redirect, render_template, today};
use crate::services::{ServiceError, appointments as appointments_service};

#[get("/appointments")]
pub async fn show_appointments(
    query: web::Query<PrivacyQuery>,
    store: web::Data<SharedStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match appointments_service::load_appointments_page(&store, today(), query.privacy) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "appointments");
            context.insert("page", &data);
            render_template(&tera, "appointments/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list appointments: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/appointments/add")]
pub async fn add_appointment(
    store: web::Data<SharedStore>,
    web::Form(form): web::Form<AddAppointmentForm>,
) -> impl Responder {
    let mut store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match appointments_service::add_appointment(&mut store, &form) {
        Ok(_) => {
            FlashMessage::success("Agendamento criado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add an appointment: {err}");
            FlashMessage::error("Erro ao criar agendamento").send();
        }
    }
    redirect("/appointments")
}

#[post("/appointments/{appointment_id}/complete")]
pub async fn complete_appointment(
    appointment_id: web::Path<String>,
    store: web::Data<SharedStore>,
    web::Form(form): web::Form<CompleteAppointmentForm>,
) -> impl Responder {
    let mut store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match appointments_service::complete_appointment(&mut store, &appointment_id, &form) {
        Ok(settled) => {
            FlashMessage::success(format!(
                "Atendimento concluído. Pagamento de R$ {} registrado.",
                settled.payment.amount
            ))
            .send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Agendamento ou serviço não encontrado").send();
        }
        Err(ServiceError::Repository(RepositoryError::InvalidTransition { .. })) => {
            FlashMessage::warning("Este agendamento não está mais pendente").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to complete appointment: {err}");
            FlashMessage::error("Erro ao concluir atendimento").send();
        }
    }
    redirect("/appointments")
}

#[post("/appointments/{appointment_id}/cancel")]
pub async fn cancel_appointment(
    appointment_id: web::Path<String>,
    store: web::Data<SharedStore>,
) -> impl Responder {
    let mut store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match appointments_service::cancel_appointment(&mut store, &appointment_id) {
        Ok(_) => {
            FlashMessage::success("Agendamento cancelado.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Agendamento não encontrado").send();
        }
        Err(ServiceError::Repository(RepositoryError::InvalidTransition { .. })) => {
            FlashMessage::warning("Este agendamento não está mais pendente").send();
        }
        Err(err) => {
            log::error!("Failed to cancel appointment: {err}");
            FlashMessage::error("Erro ao cancelar agendamento").send();
        }
    }
    redirect("/appointments")
}

#[post("/visits/add")]
pub async fn record_visit(
    store: web::Data<SharedStore>,
    web::Form(form): web::Form<RecordVisitForm>,
) -> impl Responder {
    let mut store = match lock_store(&store) {
        Ok(store) => store,
        Err(response) => return response,
    };

    match appointments_service::record_visit(&mut store, &form) {
        Ok(_) => {
            FlashMessage::success("Atendimento registrado.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Serviço não encontrado").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to record visit: {err}");
            FlashMessage::error("Erro ao registrar atendimento").send();
        }
    }
    redirect("/appointments")
}
