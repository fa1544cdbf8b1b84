//! Reference endpoints.

use axum::{Router, extract::State, routing::post};
use serde::Deserialize;
use validator::Validate;
use vidplan_common::AppResult;
use vidplan_core::{
    CreateReferenceInput, UpdateReferenceInput,
    aggregate::ReferenceStats,
    filter::{ReferenceListFilter, ReferenceSearchInput},
};

use crate::{
    extractors::{Identity, ValidatedJson},
    middleware::AppState,
    response::{ApiResponse, IdResponse, OkResponse, ReferenceResponse},
};

/// Request naming a single reference.
#[derive(Debug, Deserialize, Validate)]
pub struct ReferenceIdRequest {
    #[validate(length(min = 1))]
    pub id: String,
}

async fn list(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(filter): ValidatedJson<ReferenceListFilter>,
) -> AppResult<ApiResponse<Vec<ReferenceResponse>>> {
    let references = state.reference_service.list(&ctx, &filter).await?;
    Ok(ApiResponse::ok(references.into_iter().map(Into::into).collect()))
}

async fn search(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ReferenceSearchInput>,
) -> AppResult<ApiResponse<Vec<ReferenceResponse>>> {
    let references = state.reference_service.search(&ctx, &input).await?;
    Ok(ApiResponse::ok(references.into_iter().map(Into::into).collect()))
}

async fn show(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ReferenceIdRequest>,
) -> AppResult<ApiResponse<ReferenceResponse>> {
    let reference = state.reference_service.show(&ctx, &req.id).await?;
    Ok(ApiResponse::ok(reference.into()))
}

async fn create(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateReferenceInput>,
) -> AppResult<ApiResponse<IdResponse>> {
    let reference = state.reference_service.create(&ctx, input).await?;
    Ok(ApiResponse::ok(IdResponse { id: reference.id }))
}

async fn update(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdateReferenceInput>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.reference_service.update(&ctx, input).await?;
    Ok(ApiResponse::ok(OkResponse::OK))
}

async fn remove(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ReferenceIdRequest>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.reference_service.remove(&ctx, &req.id).await?;
    Ok(ApiResponse::ok(OkResponse::OK))
}

async fn recent(
    Identity(ctx): Identity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ReferenceResponse>>> {
    let references = state.reference_service.recent(&ctx).await?;
    Ok(ApiResponse::ok(references.into_iter().map(Into::into).collect()))
}

async fn stats(
    Identity(ctx): Identity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<ReferenceStats>> {
    Ok(ApiResponse::ok(state.reference_service.stats(&ctx).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/search", post(search))
        .route("/show", post(show))
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/remove", post(remove))
        .route("/recent", post(recent))
        .route("/stats", post(stats))
}
