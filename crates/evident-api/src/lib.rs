//! # evident-api — Compliance Metadata Service
//!
//! Axum service exposing catalog-driven metadata resolution over HTTP.
//!
//! ## Endpoints
//!
//! - `POST /v1/metadata`: metadata for one policy rule.
//! - `POST /v1/metadata/batch`: metadata for up to `max_batch_size` rules,
//!   with per-item results and a summary.
//! - `POST /v1/enrich`: metadata and verdict for one piece of evidence.
//! - `GET /health/liveness`, `GET /health/readiness`.
//!
//! Malformed bodies, empty batches and oversize batches are rejected with
//! 400 before any resolution happens.

pub mod batch;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod extractors;
pub mod local;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use batch::handle_batch;
pub use bootstrap::{bootstrap, BootstrapError};
pub use config::ServiceConfig;
pub use error::AppError;
pub use local::LocalMetadataSource;
pub use state::AppState;

/// Build the application router with request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::metadata::router())
        .merge(routes::health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
