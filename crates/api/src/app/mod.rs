//! HTTP API application wiring (Axum router + service wiring).
//!
//! If you're new to Rust, this folder is structured like:
//! - `services.rs`: infrastructure wiring (credential service + stores)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `contracts.rs`: payload contracts, one per request body shape
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use chrono::Duration;
use tower::ServiceBuilder;

use crate::middleware;

pub mod contracts;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Runtime settings, read once at startup and fixed thereafter.
///
/// Carries the signing secret, so no `Debug` derive.
#[derive(Clone)]
pub struct AppConfig {
    pub token_secret: String,
    pub bcrypt_cost: u32,
    pub token_ttl: Duration,
}

impl AppConfig {
    /// Read settings from the environment, with dev-friendly defaults.
    pub fn from_env() -> Self {
        let token_secret = std::env::var("TOKEN_SECRET").unwrap_or_else(|_| {
            tracing::warn!("TOKEN_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let bcrypt_cost = parsed_env("BCRYPT_COST").unwrap_or(10);
        let ttl_secs = parsed_env("TOKEN_TTL_SECS").unwrap_or(86_400);

        Self {
            token_secret,
            bcrypt_cost,
            token_ttl: Duration::seconds(ttl_secs),
        }
    }
}

fn parsed_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: AppConfig) -> Router {
    let services = Arc::new(services::build_services(&config));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .fallback(routes::system::unknown_route)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(Extension(services)),
        )
}
