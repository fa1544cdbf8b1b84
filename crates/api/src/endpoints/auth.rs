//! Authentication endpoints.

use axum::{Router, extract::State, routing::post};
use serde::Deserialize;
use validator::Validate;
use vidplan_common::AppResult;
use vidplan_core::CredentialsInput;

use crate::{
    extractors::{Identity, ValidatedJson},
    middleware::AppState,
    response::{ApiResponse, OkResponse, SessionResponse, UserResponse},
};

/// Signin request. Credentials are checked against the store, not validated
/// for shape, so a malformed password simply fails to match.
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    pub username: String,
    pub password: String,
}

/// Create a new user account.
async fn signup(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CredentialsInput>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let user = state.user_service.signup(input).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Sign in to an existing account.
async fn signin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SigninRequest>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let user = state
        .user_service
        .signin(CredentialsInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::ok(user.into()))
}

/// Sign out, invalidating the current token.
async fn signout(
    Identity(ctx): Identity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<OkResponse>> {
    state.user_service.signout(&ctx).await?;
    Ok(ApiResponse::ok(OkResponse::OK))
}

/// The signed-in account.
async fn i(
    Identity(ctx): Identity,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.me(&ctx).await?;
    Ok(ApiResponse::ok(user.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/signout", post(signout))
        .route("/i", post(i))
}
