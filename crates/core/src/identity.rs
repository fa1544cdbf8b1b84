//! Request identity.

use vidplan_common::{AppError, AppResult};

/// Identity attached to a single operation.
///
/// Built by the HTTP layer from the session token and passed explicitly into
/// every service call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    user_id: Option<String>,
}

impl RequestContext {
    /// A context with no signed-in user.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// A context for the given user.
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// Resolve the caller's user id, failing with `Unauthenticated` when absent.
    pub fn resolve_user(&self) -> AppResult<&str> {
        self.user_id.as_deref().ok_or(AppError::Unauthenticated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_unauthenticated() {
        let ctx = RequestContext::anonymous();
        assert!(matches!(ctx.resolve_user(), Err(AppError::Unauthenticated)));
    }

    #[test]
    fn test_for_user_resolves() {
        let ctx = RequestContext::for_user("user1");
        assert_eq!(ctx.resolve_user().unwrap(), "user1");
    }
}
