//! Category and folder repositories.
//!
//! Both label tables have the same shape, so one definition generates both
//! repositories.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use vidplan_common::{AppError, AppResult};

use crate::entities::{Category, Folder, category, folder};

macro_rules! label_repository {
    ($repo:ident, $entity:ident, $module:ident, $label:literal) => {
        #[doc = concat!("Repository for ", $label, " labels.")]
        #[derive(Clone)]
        pub struct $repo {
            db: Arc<DatabaseConnection>,
        }

        impl $repo {
            #[doc = concat!("Create a new ", $label, " repository.")]
            #[must_use]
            pub const fn new(db: Arc<DatabaseConnection>) -> Self {
                Self { db }
            }

            #[doc = concat!("Find a ", $label, " by ID.")]
            pub async fn find_by_id(&self, id: &str) -> AppResult<Option<$module::Model>> {
                $entity::find_by_id(id)
                    .one(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }

            #[doc = concat!("List the owner's ", $label, " labels in creation order.")]
            pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<$module::Model>> {
                $entity::find()
                    .filter($module::Column::UserId.eq(user_id))
                    .order_by_asc($module::Column::CreatedAt)
                    .order_by_asc($module::Column::Id)
                    .all(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }

            #[doc = concat!("Create a new ", $label, ".")]
            pub async fn create(
                &self,
                id: String,
                user_id: String,
                name: String,
                color: String,
            ) -> AppResult<$module::Model> {
                let active_model = $module::ActiveModel {
                    id: Set(id),
                    user_id: Set(user_id),
                    name: Set(name),
                    color: Set(color),
                    created_at: Set(Utc::now().into()),
                };

                active_model
                    .insert(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }

            #[doc = concat!("Rename or recolor a ", $label, ".")]
            pub async fn update(
                &self,
                current: $module::Model,
                name: Option<String>,
                color: Option<String>,
            ) -> AppResult<$module::Model> {
                let mut active: $module::ActiveModel = current.into();

                if let Some(name) = name {
                    active.name = Set(name);
                }
                if let Some(color) = color {
                    active.color = Set(color);
                }

                active
                    .update(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            }

            #[doc = concat!("Delete a ", $label, ".")]
            pub async fn delete(&self, id: &str) -> AppResult<()> {
                $entity::delete_by_id(id)
                    .exec(self.db.as_ref())
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;

                Ok(())
            }
        }
    };
}

label_repository!(CategoryRepository, Category, category, "category");
label_repository!(FolderRepository, Folder, folder, "folder");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

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
            color: "#10b981".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let first = create_test_category("category1", "user1", "Vlog");
        let second = create_test_category("category2", "user1", "Other");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[first, second]])
                .into_connection(),
        );

        let repo = CategoryRepository::new(db);
        let result = repo.find_by_user("user1").await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Vlog");
    }

    #[tokio::test]
    async fn test_create() {
        let stored = create_test_folder("folder1", "user1", "Inspiration");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[stored]])
                .into_connection(),
        );

        let repo = FolderRepository::new(db);
        let result = repo
            .create(
                "folder1".to_string(),
                "user1".to_string(),
                "Inspiration".to_string(),
                "#10b981".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(result.id, "folder1");
        assert_eq!(result.user_id, "user1");
    }

    #[tokio::test]
    async fn test_update_recolor_keeps_name() {
        let current = create_test_category("category1", "user1", "Vlog");
        let mut recolored = current.clone();
        recolored.color = "#f97316".to_string();

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[recolored]])
                .into_connection(),
        );

        let repo = CategoryRepository::new(db);
        let result = repo
            .update(current, None, Some("#f97316".to_string()))
            .await
            .unwrap();

        assert_eq!(result.name, "Vlog");
        assert_eq!(result.color, "#f97316");
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = FolderRepository::new(db);
        assert!(repo.delete("folder1").await.is_ok());
    }
}
