//! Reference service.

use chrono::Utc;
use serde::Deserialize;
use validator::Validate;
use vidplan_common::{AppResult, IdGenerator};
use vidplan_db::{
    entities::{Platform, reference},
    repositories::{NewReference, ReferencePatch, ReferenceRepository, ReferenceScan},
};

use super::validate_tags;
use crate::{
    aggregate::{self, RECENT_LIMIT, ReferenceStats, SEARCH_LIMIT},
    filter::{ReferenceListFilter, ReferenceSearchInput},
    guard::authorize_owner,
    identity::RequestContext,
};

/// Input for creating a reference.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReferenceInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(min = 1, max = 2048))]
    pub link: String,

    pub platform: Platform,

    #[validate(length(max = 10000))]
    pub notes: Option<String>,

    #[serde(default)]
    #[validate(length(max = 32))]
    pub tags: Vec<String>,

    #[validate(length(min = 1, max = 64))]
    pub folder: Option<String>,
}

/// Input for updating a reference. Omitted fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReferenceInput {
    pub id: String,

    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 2048))]
    pub link: Option<String>,

    pub platform: Option<Platform>,

    #[validate(length(max = 10000))]
    pub notes: Option<String>,

    #[validate(length(max = 32))]
    pub tags: Option<Vec<String>>,

    #[validate(length(min = 1, max = 64))]
    pub folder: Option<String>,
}

impl From<UpdateReferenceInput> for ReferencePatch {
    fn from(input: UpdateReferenceInput) -> Self {
        Self {
            title: input.title,
            link: input.link,
            platform: input.platform,
            notes: input.notes,
            tags: input.tags,
            folder: input.folder,
        }
    }
}

/// Service for managing references.
#[derive(Clone)]
pub struct ReferenceService {
    reference_repo: ReferenceRepository,
    id_gen: IdGenerator,
}

impl ReferenceService {
    /// Create a new reference service.
    #[must_use]
    pub const fn new(reference_repo: ReferenceRepository) -> Self {
        Self {
            reference_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List the caller's references, newest first, narrowed by at most one filter.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &ReferenceListFilter,
    ) -> AppResult<Vec<reference::Model>> {
        let user_id = ctx.resolve_user()?;
        self.reference_repo
            .find_by_user(user_id, &filter.scan())
            .await
    }

    /// Search the caller's reference titles with every supplied filter applied.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        input: &ReferenceSearchInput,
    ) -> AppResult<Vec<reference::Model>> {
        let user_id = ctx.resolve_user()?;
        input.validate()?;

        let Some(term) = input.term() else {
            let mut references = self
                .reference_repo
                .find_by_user(user_id, &input.list_filter().scan())
                .await?;
            references.truncate(SEARCH_LIMIT as usize);
            return Ok(references);
        };

        self.reference_repo
            .search(user_id, term, &input.filter(), SEARCH_LIMIT)
            .await
    }

    /// Get one of the caller's references.
    pub async fn show(&self, ctx: &RequestContext, id: &str) -> AppResult<reference::Model> {
        let user_id = ctx.resolve_user()?;
        authorize_owner(self.reference_repo.find_by_id(id).await?, user_id)
    }

    /// Create a reference owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateReferenceInput,
    ) -> AppResult<reference::Model> {
        let user_id = ctx.resolve_user()?;
        input.validate()?;
        validate_tags(&input.tags)?;

        let reference = self
            .reference_repo
            .create(
                NewReference {
                    id: self.id_gen.generate(),
                    user_id: user_id.to_string(),
                    title: input.title,
                    link: input.link,
                    platform: input.platform,
                    notes: input.notes,
                    tags: input.tags,
                    folder: input.folder,
                },
                Utc::now().into(),
            )
            .await?;

        tracing::info!(user_id = %user_id, reference_id = %reference.id, "Created reference");
        Ok(reference)
    }

    /// Apply a partial update to one of the caller's references.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        input: UpdateReferenceInput,
    ) -> AppResult<reference::Model> {
        let user_id = ctx.resolve_user()?;
        input.validate()?;
        if let Some(tags) = &input.tags {
            validate_tags(tags)?;
        }

        let current =
            authorize_owner(self.reference_repo.find_by_id(&input.id).await?, user_id)?;
        let reference = self.reference_repo.update(current, input.into()).await?;

        tracing::info!(user_id = %user_id, reference_id = %reference.id, "Updated reference");
        Ok(reference)
    }

    /// Delete one of the caller's references.
    pub async fn remove(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        let user_id = ctx.resolve_user()?;
        let reference = authorize_owner(self.reference_repo.find_by_id(id).await?, user_id)?;

        self.reference_repo.delete(&reference.id).await?;

        tracing::info!(user_id = %user_id, reference_id = %id, "Deleted reference");
        Ok(())
    }

    /// The caller's most recently added references.
    pub async fn recent(&self, ctx: &RequestContext) -> AppResult<Vec<reference::Model>> {
        let user_id = ctx.resolve_user()?;
        self.reference_repo.find_recent(user_id, RECENT_LIMIT).await
    }

    /// Counts of the caller's references by platform.
    pub async fn stats(&self, ctx: &RequestContext) -> AppResult<ReferenceStats> {
        let user_id = ctx.resolve_user()?;
        let references = self
            .reference_repo
            .find_by_user(user_id, &ReferenceScan::All)
            .await?;

        Ok(aggregate::reference_stats(&references))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use vidplan_common::AppError;
    use vidplan_db::entities::tags_to_json;

    fn create_test_reference(id: &str, user_id: &str, platform: Platform) -> reference::Model {
        reference::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "Hook breakdown".to_string(),
            link: "https://example.com/hook".to_string(),
            platform,
            notes: None,
            tags: tags_to_json(&[]),
            folder: Some("Hooks".to_string()),
            created_at: Utc::now().into(),
        }
    }

    fn service(db: DatabaseConnection) -> ReferenceService {
        ReferenceService::new(ReferenceRepository::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn test_remove_by_non_owner() {
        let reference = create_test_reference("ref1", "alice", Platform::Tiktok);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[reference]])
            .into_connection();

        let result = service(db)
            .remove(&RequestContext::for_user("bob"), "ref1")
            .await;

        assert!(matches!(
            result,
            Err(AppError::NotFoundOrUnauthorized("Reference"))
        ));
    }

    #[tokio::test]
    async fn test_remove_by_owner() {
        let reference = create_test_reference("ref1", "alice", Platform::Tiktok);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[reference]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let result = service(db)
            .remove(&RequestContext::for_user("alice"), "ref1")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_requires_link() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = service(db)
            .create(
                &RequestContext::for_user("alice"),
                CreateReferenceInput {
                    title: "No link".to_string(),
                    link: String::new(),
                    platform: Platform::Kwai,
                    notes: None,
                    tags: vec![],
                    folder: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_show_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<reference::Model>::new()])
            .into_connection();

        let result = service(db)
            .show(&RequestContext::for_user("alice"), "gone")
            .await;

        assert!(matches!(result, Err(AppError::NotFoundOrUnauthorized(_))));
    }

    #[tokio::test]
    async fn test_stats() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                create_test_reference("r1", "alice", Platform::Tiktok),
                create_test_reference("r2", "alice", Platform::Facebook),
                create_test_reference("r3", "alice", Platform::Facebook),
            ]])
            .into_connection();

        let stats = service(db)
            .stats(&RequestContext::for_user("alice"))
            .await
            .unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_platform.facebook, 2);
        assert_eq!(stats.by_platform.sum(), 3);
    }

    #[tokio::test]
    async fn test_recent_requires_identity() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = service(db).recent(&RequestContext::anonymous()).await;

        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }
}
