//! Liveness and readiness probes.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::{AppState, SERVICE_VERSION};

#[derive(Debug, Serialize, Deserialize)]
pub struct Readiness {
    pub status: String,
    pub version: String,
    pub catalogs: usize,
    pub plan_version: u64,
    pub resolvers: usize,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
}

/// Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

async fn readiness(State(state): State<AppState>) -> Json<Readiness> {
    Json(Readiness {
        status: "ready".to_string(),
        version: SERVICE_VERSION.to_string(),
        catalogs: state.scope.snapshot().len(),
        plan_version: state.plans.version(),
        resolvers: state.resolvers.len(),
    })
}
