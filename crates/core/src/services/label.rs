//! Category and folder services.
//!
//! Labels are only a source of names. Videos and references keep whatever
//! label string they were saved with when a label is renamed or deleted.

use serde::Deserialize;
use validator::Validate;
use vidplan_common::{AppResult, IdGenerator};
use vidplan_db::{
    entities::{category, folder},
    repositories::{CategoryRepository, FolderRepository},
};

use crate::{
    guard::{Owned, authorize_owner},
    identity::RequestContext,
};

/// Input for creating a category or folder.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLabelInput {
    #[validate(length(min = 1, max = 64))]
    pub name: String,

    #[validate(length(min = 1, max = 32))]
    pub color: String,
}

/// Input for renaming or recoloring a category or folder.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateLabelInput {
    pub id: String,

    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 32))]
    pub color: Option<String>,
}

macro_rules! label_service {
    ($service:ident, $repo:ident, $module:ident, $label:literal) => {
        #[doc = concat!("Service for managing ", $label, " labels.")]
        #[derive(Clone)]
        pub struct $service {
            repo: $repo,
            id_gen: IdGenerator,
        }

        impl $service {
            #[doc = concat!("Create a new ", $label, " service.")]
            #[must_use]
            pub const fn new(repo: $repo) -> Self {
                Self {
                    repo,
                    id_gen: IdGenerator::new(),
                }
            }

            #[doc = concat!("List the caller's ", $label, " labels in creation order.")]
            pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<$module::Model>> {
                let user_id = ctx.resolve_user()?;
                self.repo.find_by_user(user_id).await
            }

            #[doc = concat!("Create a ", $label, " owned by the caller.")]
            pub async fn create(
                &self,
                ctx: &RequestContext,
                input: CreateLabelInput,
            ) -> AppResult<$module::Model> {
                let user_id = ctx.resolve_user()?;
                input.validate()?;

                let label = self
                    .repo
                    .create(
                        self.id_gen.generate(),
                        user_id.to_string(),
                        input.name,
                        input.color,
                    )
                    .await?;

                tracing::info!(
                    user_id = %user_id,
                    label_id = %label.id,
                    kind = <$module::Model as Owned>::KIND,
                    "Created label"
                );
                Ok(label)
            }

            #[doc = concat!("Rename or recolor one of the caller's ", $label, " labels.")]
            pub async fn update(
                &self,
                ctx: &RequestContext,
                input: UpdateLabelInput,
            ) -> AppResult<$module::Model> {
                let user_id = ctx.resolve_user()?;
                input.validate()?;

                let current = authorize_owner(self.repo.find_by_id(&input.id).await?, user_id)?;
                let label = self.repo.update(current, input.name, input.color).await?;

                tracing::info!(
                    user_id = %user_id,
                    label_id = %label.id,
                    kind = <$module::Model as Owned>::KIND,
                    "Updated label"
                );
                Ok(label)
            }

            #[doc = concat!("Delete one of the caller's ", $label, " labels.")]
            pub async fn remove(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
                let user_id = ctx.resolve_user()?;
                let label = authorize_owner(self.repo.find_by_id(id).await?, user_id)?;

                self.repo.delete(&label.id).await?;

                tracing::info!(
                    user_id = %user_id,
                    label_id = %id,
                    kind = <$module::Model as Owned>::KIND,
                    "Deleted label"
                );
                Ok(())
            }
        }
    };
}

label_service!(CategoryService, CategoryRepository, category, "category");
label_service!(FolderService, FolderRepository, folder, "folder");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use vidplan_common::AppError;

    fn create_test_category(id: &str, user_id: &str, name: &str) -> category::Model {
        category::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            color: "#8b5cf6".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_folder(id: &str, user_id: &str, name: &str) -> folder::Model {
        folder::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            color: "#3b82f6".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn category_service(db: DatabaseConnection) -> CategoryService {
        CategoryService::new(CategoryRepository::new(Arc::new(db)))
    }

    fn folder_service(db: DatabaseConnection) -> FolderService {
        FolderService::new(FolderRepository::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn test_list() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                create_test_category("c1", "alice", "Tutorial"),
                create_test_category("c2", "alice", "Vlog"),
            ]])
            .into_connection();

        let categories = category_service(db)
            .list(&RequestContext::for_user("alice"))
            .await
            .unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Tutorial");
    }

    #[tokio::test]
    async fn test_list_requires_identity() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = folder_service(db).list(&RequestContext::anonymous()).await;

        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_remove_by_non_owner() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_category("c1", "alice", "Tutorial")]])
            .into_connection();

        let result = category_service(db)
            .remove(&RequestContext::for_user("bob"), "c1")
            .await;

        assert!(matches!(
            result,
            Err(AppError::NotFoundOrUnauthorized("Category"))
        ));
    }

    #[tokio::test]
    async fn test_remove_by_owner() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_category("c1", "alice", "Tutorial")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let result = category_service(db)
            .remove(&RequestContext::for_user("alice"), "c1")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = category_service(db)
            .create(
                &RequestContext::for_user("alice"),
                CreateLabelInput {
                    name: String::new(),
                    color: "#fff".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_by_non_owner() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_folder("f1", "alice", "Hooks")]])
            .into_connection();

        let result = folder_service(db)
            .update(
                &RequestContext::for_user("bob"),
                UpdateLabelInput {
                    id: "f1".to_string(),
                    name: Some("Stolen".to_string()),
                    color: None,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(AppError::NotFoundOrUnauthorized("Folder"))
        ));
    }

    #[tokio::test]
    async fn test_update_rename() {
        let folder = create_test_folder("f1", "alice", "Hooks");
        let mut renamed = folder.clone();
        renamed.name = "Openers".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[folder]])
            .append_query_results([[renamed]])
            .into_connection();

        let result = folder_service(db)
            .update(
                &RequestContext::for_user("alice"),
                UpdateLabelInput {
                    id: "f1".to_string(),
                    name: Some("Openers".to_string()),
                    color: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(result.name, "Openers");
        assert_eq!(result.color, "#3b82f6");
    }
}
