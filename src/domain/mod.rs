//! Domain records owned by the barbershop record store.

pub mod appointment;
pub mod client;
pub mod payment;
pub mod service;
pub mod types;
