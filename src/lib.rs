//! Libris Library Catalog Server
//!
//! A REST JSON API for a role-gated library catalog: account registration
//! and sign-in with signed session tokens, plus book management split
//! between an administrative surface and an owner-scoped self-service
//! surface.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: repository::Repository,
    pub services: Arc<services::Services>,
}
