//! Category endpoints.

use axum::{Router, extract::State, routing::post};
use serde::Deserialize;
use validator::Validate;
use vidplan_common::AppResult;
use vidplan_core::{CreateLabelInput, UpdateLabelInput};

use crate::{
    extractors::{Identity, ValidatedJson},
    middleware::AppState,
    response::{ApiResponse, IdResponse, LabelResponse, OkResponse},
};

/// Request naming a single category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryIdRequest {
    #[validate(length(min = 1))]
    pub id: String,
}

async fn list(
    Identity(ctx): Identity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<LabelResponse>>> {
    let categories = state.category_service.list(&ctx).await?;
    Ok(ApiResponse::ok(categories.into_iter().map(Into::into).collect()))
}

async fn create(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateLabelInput>,
) -> AppResult<ApiResponse<IdResponse>> {
    let category = state.category_service.create(&ctx, input).await?;
    Ok(ApiResponse::ok(IdResponse { id: category.id }))
}

async fn update(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdateLabelInput>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.category_service.update(&ctx, input).await?;
    Ok(ApiResponse::ok(OkResponse::OK))
}

async fn remove(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CategoryIdRequest>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.category_service.remove(&ctx, &req.id).await?;
    Ok(ApiResponse::ok(OkResponse::OK))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/remove", post(remove))
}
