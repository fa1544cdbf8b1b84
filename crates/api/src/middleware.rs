//! API middleware.

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use sea_orm::DatabaseConnection;
use vidplan_core::{CategoryService, FolderService, ReferenceService, UserService, VideoService};
use vidplan_db::repositories::{
    CategoryRepository, FolderRepository, ReferenceRepository, UserRepository, VideoRepository,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub video_service: VideoService,
    pub reference_service: ReferenceService,
    pub category_service: CategoryService,
    pub folder_service: FolderService,
}

impl AppState {
    /// Wire every repository and service onto one shared connection pool.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            user_service: UserService::new(UserRepository::new(Arc::clone(&db))),
            video_service: VideoService::new(VideoRepository::new(Arc::clone(&db))),
            reference_service: ReferenceService::new(ReferenceRepository::new(Arc::clone(&db))),
            category_service: CategoryService::new(CategoryRepository::new(Arc::clone(&db))),
            folder_service: FolderService::new(FolderRepository::new(db)),
        }
    }
}

/// Authentication middleware.
///
/// Attaches the user owning the `Authorization: Bearer` token to the request.
/// Missing or unknown tokens leave the request anonymous.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        match state.user_service.authenticate_by_token(token).await {
            Ok(user) => {
                req.extensions_mut().insert(user);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token did not resolve to a user");
            }
        }
    }

    next.run(req).await
}
