//! Database and configuration models.

pub mod collection;
pub mod config;
