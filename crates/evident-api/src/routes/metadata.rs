//! Metadata and enrichment endpoints.
//!
//! Each request resolves against one scope snapshot, taken at the start of
//! the handler. Nothing is cached on the server side.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use evident_core::wire::{
    BatchMetadataRequest, BatchMetadataResponse, EnrichRequest, EnrichResponse, MetadataRequest,
    MetadataResponse,
};

use crate::batch::handle_batch;
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/metadata", post(get_metadata))
        .route("/v1/metadata/batch", post(get_metadata_batch))
        .route("/v1/enrich", post(enrich))
}

async fn get_metadata(
    State(state): State<AppState>,
    body: Result<Json<MetadataRequest>, JsonRejection>,
) -> Result<Json<MetadataResponse>, AppError> {
    let req = extract_json(body)?;
    let scope = state.scope.snapshot();
    let resolver = state.resolvers.select(&req.policy.engine_name);
    let compliance = resolver.metadata(&req.policy.rule_id, &scope);
    Ok(Json(MetadataResponse { compliance }))
}

async fn get_metadata_batch(
    State(state): State<AppState>,
    body: Result<Json<BatchMetadataRequest>, JsonRejection>,
) -> Result<Json<BatchMetadataResponse>, AppError> {
    let req = extract_json(body)?;
    let scope = state.scope.snapshot();
    let response = handle_batch(&state.resolvers, &scope, &req.policies, state.max_batch_size)?;
    Ok(Json(response))
}

async fn enrich(
    State(state): State<AppState>,
    body: Result<Json<EnrichRequest>, JsonRejection>,
) -> Result<Json<EnrichResponse>, AppError> {
    let req = extract_json(body)?;
    let scope = state.scope.snapshot();
    let resolver = state.resolvers.select(&req.evidence.policy.engine_name);
    let result = resolver.enrich(&req.evidence, &scope);
    Ok(Json(EnrichResponse { result }))
}
