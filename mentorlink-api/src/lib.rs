//! MentorLink API service library
//!
//! HTTP surface over the pairing, feedback-lifecycle, upvote-ledger and
//! degree-recommendation operations. Handlers stay thin; business rules
//! live in `services`.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod auth;
pub mod db;
pub mod error;
pub mod services;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health::routes())
        .merge(api::accounts::routes())
        .merge(api::catalog::routes())
        .merge(api::questions::routes())
        .merge(api::answers::routes())
        .merge(api::comments::routes())
        .merge(api::votes::routes())
        .merge(api::pair_sessions::routes())
        .merge(api::appointments::routes())
        .merge(api::feedback::routes())
        .merge(api::notifications::routes())
        .merge(api::recommendations::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
