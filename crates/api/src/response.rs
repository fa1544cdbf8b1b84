//! API response types.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use vidplan_db::entities::{Platform, VideoStatus, category, folder, reference, user, video};

/// Standard API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response.
    pub const fn ok(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Id of a newly created record.
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: String,
}

/// Acknowledgement of a mutation.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub const OK: Self = Self { ok: true };
}

/// Session credentials returned by sign-up and sign-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub username: String,
    pub token: String,
}

impl From<user::Model> for SessionResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            token: u.token.unwrap_or_default(),
        }
    }
}

/// Public view of the caller's account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Video response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub platform: Platform,
    pub category: String,
    pub tags: Vec<String>,
    pub status: VideoStatus,
    pub scheduled_date: Option<String>,
    pub published_date: Option<String>,
    pub created_at: String,
}

impl From<video::Model> for VideoResponse {
    fn from(v: video::Model) -> Self {
        Self {
            tags: v.tag_list(),
            id: v.id,
            user_id: v.user_id,
            title: v.title,
            description: v.description,
            link: v.link,
            platform: v.platform,
            category: v.category,
            status: v.status,
            scheduled_date: v.scheduled_date.map(|d| d.to_rfc3339()),
            published_date: v.published_date.map(|d| d.to_rfc3339()),
            created_at: v.created_at.to_rfc3339(),
        }
    }
}

/// Reference response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub link: String,
    pub platform: Platform,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub folder: Option<String>,
    pub created_at: String,
}

impl From<reference::Model> for ReferenceResponse {
    fn from(r: reference::Model) -> Self {
        Self {
            tags: r.tag_list(),
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            link: r.link,
            platform: r.platform,
            notes: r.notes,
            folder: r.folder,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Category or folder response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String,
    pub created_at: String,
}

impl From<category::Model> for LabelResponse {
    fn from(c: category::Model) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            name: c.name,
            color: c.color,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

impl From<folder::Model> for LabelResponse {
    fn from(f: folder::Model) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            name: f.name,
            color: f.color,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}
