//! Affiliate Hub Server Library
//!
//! Users, affiliate platforms and bearer-token auth over an embedded redb
//! document store. Exported for the binary and the integration tests.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use constants::MAX_BODY_BYTES;
use models::RateLimiter;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Create a new AppState; the limiter is sized from the configuration
    pub fn new(db: Db, config: Config) -> Self {
        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit_requests,
            config.rate_limit_window_secs,
        ));
        Self { db, config, limiter }
    }
}

/// Build the API router
///
/// Layer order, outermost first: rate limiter, body size limit, then the
/// bearer-token check on protected routes. Validation runs in the
/// `ValidatedJson` extractor just before each handler.
pub fn app(state: AppState) -> Router {
    use routes::*;

    let protected = Router::new()
        .route("/platform", post(create_platform))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_auth));

    Router::new()
        .route("/health", get(health_check))
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/platforms", get(list_platforms))
        .route("/recommendations", get(recommendations))
        .route("/platform/:id/join-steps", get(join_steps))
        .merge(protected)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn_with_state(state.clone(), middleware::rate_limit))
        .with_state(state)
}
