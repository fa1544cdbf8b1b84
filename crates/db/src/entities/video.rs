//! Video entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::platform::Platform;

/// Production stage of a video.
///
/// Transitions are not enforced; a video may move between any two stages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    #[sea_orm(string_value = "planned")]
    Planned,
    #[sea_orm(string_value = "in_production")]
    InProduction,
    #[sea_orm(string_value = "published")]
    Published,
}

/// A planned, in-production or published video.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owner. Never changes after creation.
    #[sea_orm(indexed)]
    pub user_id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(nullable)]
    pub link: Option<String>,

    pub platform: Platform,

    /// Free-form label, usually matching a category name at creation time.
    pub category: String,

    /// Ordered tag list (JSON array of strings).
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,

    pub status: VideoStatus,

    #[sea_orm(nullable)]
    pub scheduled_date: Option<DateTimeWithTimeZone>,

    /// Set when the video first enters `Published`; never cleared.
    #[sea_orm(nullable)]
    pub published_date: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Tags as strings. Non-string entries are skipped.
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        super::tags_from_json(&self.tags)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
