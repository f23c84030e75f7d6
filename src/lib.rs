//! Shelfdesk Library Lending Desk
//!
//! A small library lending service: browse the catalog, register members,
//! select the acting member, borrow and return books. All state lives in
//! memory and is seeded from three JSON fixtures on first use.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers.
///
/// Built once at startup and owns the only session of the running instance.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, &config);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
