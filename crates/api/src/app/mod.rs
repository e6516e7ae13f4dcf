//! HTTP API application wiring (Axum router + service wiring).
//!
//! If you're new to Rust, this folder is structured like:
//! - `services.rs`: storage wiring (record store + ledger/log services)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping
//! - `extract.rs`: request extraction helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app() -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services()?);

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .route("/stats", get(routes::system::stats))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services))))
}
