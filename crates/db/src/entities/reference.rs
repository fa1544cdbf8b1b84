//! Reference entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::platform::Platform;

/// A saved link to someone else's content, kept for inspiration.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reference")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owner. Never changes after creation.
    #[sea_orm(indexed)]
    pub user_id: String,

    pub title: String,

    pub link: String,

    pub platform: Platform,

    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    /// Ordered tag list (JSON array of strings).
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,

    /// Free-form label, usually matching a folder name at creation time.
    #[sea_orm(nullable)]
    pub folder: Option<String>,

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
