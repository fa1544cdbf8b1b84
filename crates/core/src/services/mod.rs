//! Business logic services.

pub mod label;
pub mod reference;
pub mod user;
pub mod video;

pub use label::{CategoryService, CreateLabelInput, FolderService, UpdateLabelInput};
pub use reference::{CreateReferenceInput, ReferenceService, UpdateReferenceInput};
pub use user::{CredentialsInput, UserService};
pub use video::{CreateVideoInput, UpdateVideoInput, VideoService};

use vidplan_common::{AppError, AppResult};

/// Each tag must be 1 to 64 characters.
pub(crate) fn validate_tags(tags: &[String]) -> AppResult<()> {
    match tags
        .iter()
        .find(|t| t.is_empty() || t.chars().count() > 64)
    {
        Some(tag) => Err(AppError::Validation(format!(
            "Invalid tag {tag:?}: tags must be 1 to 64 characters"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tags() {
        assert!(validate_tags(&[]).is_ok());
        assert!(validate_tags(&["cooking".to_string(), "quick".to_string()]).is_ok());
        assert!(validate_tags(&[String::new()]).is_err());
        assert!(validate_tags(&["x".repeat(65)]).is_err());
    }
}
