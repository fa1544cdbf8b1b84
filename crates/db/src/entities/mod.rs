//! Database entities.

#![allow(missing_docs)]

pub mod category;
pub mod folder;
pub mod platform;
pub mod reference;
pub mod user;
pub mod video;

pub use category::Entity as Category;
pub use folder::Entity as Folder;
pub use platform::Platform;
pub use reference::Entity as Reference;
pub use user::Entity as User;
pub use video::{Entity as Video, VideoStatus};

/// Encode a tag list for a `JsonBinary` column.
#[must_use]
pub fn tags_to_json(tags: &[String]) -> sea_orm::prelude::Json {
    serde_json::Value::Array(
        tags.iter()
            .cloned()
            .map(serde_json::Value::String)
            .collect(),
    )
}

/// Decode a `JsonBinary` tag column, skipping anything that is not a string.
#[must_use]
pub fn tags_from_json(value: &sea_orm::prelude::Json) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_json_preserves_order() {
        let tags = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        let json = tags_to_json(&tags);
        assert_eq!(tags_from_json(&json), tags);
    }

    #[test]
    fn test_tags_from_malformed_json() {
        assert!(tags_from_json(&serde_json::json!({"not": "a list"})).is_empty());
        assert_eq!(
            tags_from_json(&serde_json::json!(["ok", 1, null, "fine"])),
            vec!["ok".to_string(), "fine".to_string()]
        );
    }
}
