//! Ownership check applied before mutating or reading a single record.

use vidplan_common::{AppError, AppResult};
use vidplan_db::entities::{category, folder, reference, video};

/// A record with an immutable owner.
pub trait Owned {
    /// Entity name used in error messages.
    const KIND: &'static str;

    /// Id of the owning user.
    fn owner_id(&self) -> &str;
}

impl Owned for video::Model {
    const KIND: &'static str = "Video";

    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Owned for reference::Model {
    const KIND: &'static str = "Reference";

    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Owned for category::Model {
    const KIND: &'static str = "Category";

    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

impl Owned for folder::Model {
    const KIND: &'static str = "Folder";

    fn owner_id(&self) -> &str {
        &self.user_id
    }
}

/// Return the record if it exists and belongs to `user_id`.
///
/// A missing record and a foreign one produce the same error.
pub fn authorize_owner<T: Owned>(record: Option<T>, user_id: &str) -> AppResult<T> {
    match record {
        Some(record) if record.owner_id() == user_id => Ok(record),
        _ => Err(AppError::NotFoundOrUnauthorized(T::KIND)),
    }
}
