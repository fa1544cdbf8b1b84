//! Video endpoints.

use axum::{Router, extract::State, routing::post};
use serde::Deserialize;
use validator::Validate;
use vidplan_common::AppResult;
use vidplan_core::{
    CreateVideoInput, UpdateVideoInput,
    aggregate::VideoStats,
    filter::{VideoListFilter, VideoSearchInput},
};

use crate::{
    extractors::{Identity, ValidatedJson},
    middleware::AppState,
    response::{ApiResponse, IdResponse, OkResponse, VideoResponse},
};

/// Request naming a single video.
#[derive(Debug, Deserialize, Validate)]
pub struct VideoIdRequest {
    #[validate(length(min = 1))]
    pub id: String,
}

async fn list(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(filter): ValidatedJson<VideoListFilter>,
) -> AppResult<ApiResponse<Vec<VideoResponse>>> {
    let videos = state.video_service.list(&ctx, &filter).await?;
    Ok(ApiResponse::ok(videos.into_iter().map(Into::into).collect()))
}

async fn search(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<VideoSearchInput>,
) -> AppResult<ApiResponse<Vec<VideoResponse>>> {
    let videos = state.video_service.search(&ctx, &input).await?;
    Ok(ApiResponse::ok(videos.into_iter().map(Into::into).collect()))
}

async fn show(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VideoIdRequest>,
) -> AppResult<ApiResponse<VideoResponse>> {
    let video = state.video_service.show(&ctx, &req.id).await?;
    Ok(ApiResponse::ok(video.into()))
}

async fn create(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateVideoInput>,
) -> AppResult<ApiResponse<IdResponse>> {
    let video = state.video_service.create(&ctx, input).await?;
    Ok(ApiResponse::ok(IdResponse { id: video.id }))
}

async fn update(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UpdateVideoInput>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.video_service.update(&ctx, input).await?;
    Ok(ApiResponse::ok(OkResponse::OK))
}

async fn remove(
    Identity(ctx): Identity,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<VideoIdRequest>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.video_service.remove(&ctx, &req.id).await?;
    Ok(ApiResponse::ok(OkResponse::OK))
}

async fn upcoming(
    Identity(ctx): Identity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<VideoResponse>>> {
    let videos = state.video_service.upcoming(&ctx).await?;
    Ok(ApiResponse::ok(videos.into_iter().map(Into::into).collect()))
}

async fn stats(
    Identity(ctx): Identity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<VideoStats>> {
    Ok(ApiResponse::ok(state.video_service.stats(&ctx).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list))
        .route("/search", post(search))
        .route("/show", post(show))
        .route("/create", post(create))
        .route("/update", post(update))
        .route("/remove", post(remove))
        .route("/upcoming", post(upcoming))
        .route("/stats", post(stats))
}
