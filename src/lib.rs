//! Libria Library Lending Management System
//!
//! A Rust implementation of the Libria library-lending server, providing a
//! REST JSON API over an in-memory catalog, user directory and per-user
//! download tracking with role-gated administration.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod library;
pub mod models;
pub mod seed;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
