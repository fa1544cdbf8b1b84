//! API endpoints.

mod auth;
mod categories;
mod folders;
mod references;
mod videos;

use axum::{Router, http::Uri};
use vidplan_common::AppError;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/videos", videos::router())
        .nest("/references", references::router())
        .nest("/categories", categories::router())
        .nest("/folders", folders::router())
}

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
