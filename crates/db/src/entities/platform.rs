//! Publishing platform shared by videos and references.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Platform a piece of content targets or was found on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[sea_orm(string_value = "tiktok")]
    Tiktok,
    #[sea_orm(string_value = "youtube")]
    Youtube,
    #[sea_orm(string_value = "kwai")]
    Kwai,
    #[sea_orm(string_value = "facebook")]
    Facebook,
}
