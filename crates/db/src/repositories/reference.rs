//! Reference repository.

use std::sync::Arc;

use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbBackend,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, Statement, Value,
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, Func},
};
use vidplan_common::{AppError, AppResult};

use super::search::prefix_tsquery;
use crate::entities::{Platform, Reference, reference, tags_to_json};

/// Owner-scoped scan narrowed by at most one equality predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceScan {
    /// Every reference of the owner.
    All,
    /// References from one platform.
    Platform(Platform),
    /// References filed under one folder label.
    Folder(String),
}

/// Equality constraints applied together to a title search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSearchFilter {
    pub platform: Option<Platform>,
    pub folder: Option<String>,
}

/// Fields of a new reference.
#[derive(Debug, Clone)]
pub struct NewReference {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub link: String,
    pub platform: Platform,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub folder: Option<String>,
}

/// Partial update of a reference. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ReferencePatch {
    pub title: Option<String>,
    pub link: Option<String>,
    pub platform: Option<Platform>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub folder: Option<String>,
}

/// Build the owner-scoped select for a scan, newest first.
#[must_use]
pub fn scan_query(user_id: &str, scan: &ReferenceScan) -> Select<Reference> {
    let mut condition = Condition::all().add(reference::Column::UserId.eq(user_id));

    condition = match scan {
        ReferenceScan::All => condition,
        ReferenceScan::Platform(platform) => {
            condition.add(reference::Column::Platform.eq(*platform))
        }
        ReferenceScan::Folder(folder) => condition.add(reference::Column::Folder.eq(folder.as_str())),
    };

    Reference::find()
        .filter(condition)
        .order_by_desc(reference::Column::CreatedAt)
        .order_by_desc(reference::Column::Id)
}

/// Build the ranked full-text title search statement.
///
/// `query` is a `to_tsquery` expression from [`prefix_tsquery`]. Every
/// supplied filter is added to the WHERE clause.
#[must_use]
pub fn search_statement(
    user_id: &str,
    query: &str,
    filter: &ReferenceSearchFilter,
    limit: u64,
) -> Statement {
    let mut values: Vec<Value> = vec![user_id.into(), query.into()];
    let mut conditions = vec![
        "user_id = $1".to_string(),
        "to_tsvector('simple', title) @@ to_tsquery('simple', $2)".to_string(),
    ];

    if let Some(platform) = filter.platform {
        values.push(platform.to_value().into());
        conditions.push(format!("platform = ${}", values.len()));
    }
    if let Some(folder) = &filter.folder {
        values.push(folder.as_str().into());
        conditions.push(format!("folder = ${}", values.len()));
    }

    values.push((limit as i64).into());
    let limit_placeholder = values.len();
    let where_clause = conditions.join(" AND ");

    let sql = format!(
        r#"
        SELECT
            id, user_id, title, link, platform, notes, tags, folder, created_at
        FROM "reference"
        WHERE {where_clause}
        ORDER BY
            ts_rank(to_tsvector('simple', title), to_tsquery('simple', $2)) DESC,
            created_at DESC
        LIMIT ${limit_placeholder}
        "#
    );

    Statement::from_sql_and_values(DbBackend::Postgres, &sql, values)
}

/// Repository for reference operations.
#[derive(Clone)]
pub struct ReferenceRepository {
    db: Arc<DatabaseConnection>,
}

impl ReferenceRepository {
    /// Create a new reference repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find reference by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<reference::Model>> {
        Reference::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Scan the owner's references, newest first.
    pub async fn find_by_user(
        &self,
        user_id: &str,
        scan: &ReferenceScan,
    ) -> AppResult<Vec<reference::Model>> {
        scan_query(user_id, scan)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// The owner's most recently created references.
    pub async fn find_recent(&self, user_id: &str, limit: u64) -> AppResult<Vec<reference::Model>> {
        scan_query(user_id, &ReferenceScan::All)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Search titles using `PostgreSQL` full-text search, last word as a prefix.
    /// Falls back to a case-insensitive substring match if the term has no
    /// words or full-text search fails.
    pub async fn search(
        &self,
        user_id: &str,
        term: &str,
        filter: &ReferenceSearchFilter,
        limit: u64,
    ) -> AppResult<Vec<reference::Model>> {
        let Some(query) = prefix_tsquery(term) else {
            return self.search_like(user_id, term, filter, limit).await;
        };

        match self.search_fulltext(user_id, &query, filter, limit).await {
            Ok(results) => Ok(results),
            Err(e) => {
                tracing::warn!(error = %e, "Reference full-text search failed, falling back to LIKE");
                self.search_like(user_id, term, filter, limit).await
            }
        }
    }

    /// Full-text search using `PostgreSQL` tsvector/tsquery, ranked by relevance.
    pub async fn search_fulltext(
        &self,
        user_id: &str,
        query: &str,
        filter: &ReferenceSearchFilter,
        limit: u64,
    ) -> AppResult<Vec<reference::Model>> {
        Reference::find()
            .from_raw_sql(search_statement(user_id, query, filter, limit))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fallback substring search for when full-text search is unavailable.
    pub async fn search_like(
        &self,
        user_id: &str,
        term: &str,
        filter: &ReferenceSearchFilter,
        limit: u64,
    ) -> AppResult<Vec<reference::Model>> {
        let pattern = format!(
            "%{}%",
            term.to_lowercase().replace('%', "\\%").replace('_', "\\_")
        );

        let mut condition = Condition::all()
            .add(reference::Column::UserId.eq(user_id))
            .add(Expr::expr(Func::lower(Expr::col(reference::Column::Title))).like(pattern));

        if let Some(platform) = filter.platform {
            condition = condition.add(reference::Column::Platform.eq(platform));
        }
        if let Some(folder) = &filter.folder {
            condition = condition.add(reference::Column::Folder.eq(folder.as_str()));
        }

        Reference::find()
            .filter(condition)
            .order_by_desc(reference::Column::CreatedAt)
            .order_by_desc(reference::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new reference stamped with `now`.
    pub async fn create(
        &self,
        input: NewReference,
        now: DateTimeWithTimeZone,
    ) -> AppResult<reference::Model> {
        let active_model = reference::ActiveModel {
            id: Set(input.id),
            user_id: Set(input.user_id),
            title: Set(input.title),
            link: Set(input.link),
            platform: Set(input.platform),
            notes: Set(input.notes),
            tags: Set(tags_to_json(&input.tags)),
            folder: Set(input.folder),
            created_at: Set(now),
        };

        active_model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Apply a patch to a stored reference.
    pub async fn update(
        &self,
        current: reference::Model,
        patch: ReferencePatch,
    ) -> AppResult<reference::Model> {
        let mut active: reference::ActiveModel = current.into();

        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(link) = patch.link {
            active.link = Set(link);
        }
        if let Some(platform) = patch.platform {
            active.platform = Set(platform);
        }
        if let Some(notes) = patch.notes {
            active.notes = Set(Some(notes));
        }
        if let Some(tags) = patch.tags {
            active.tags = Set(tags_to_json(&tags));
        }
        if let Some(folder) = patch.folder {
            active.folder = Set(Some(folder));
        }

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a reference.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Reference::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait};

    fn create_test_reference(id: &str, user_id: &str) -> reference::Model {
        reference::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "Great hook".to_string(),
            link: "https://example.com/watch?v=1".to_string(),
            platform: Platform::Tiktok,
            notes: Some("Watch the first 3 seconds".to_string()),
            tags: tags_to_json(&["hooks".to_string()]),
            folder: Some("Inspiration".to_string()),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_scan_query_folder() {
        let sql = scan_query("user1", &ReferenceScan::Folder("Inspiration".to_string()))
            .build(DatabaseBackend::Postgres)
            .sql;

        assert!(sql.contains(r#""reference"."user_id" = $1"#));
        assert!(sql.contains(r#""reference"."folder" = $2"#));
        assert!(!sql.contains(r#""reference"."platform" = "#));
    }

    #[test]
    fn test_search_statement_applies_every_filter() {
        let filter = ReferenceSearchFilter {
            platform: Some(Platform::Kwai),
            folder: Some("Inspiration".to_string()),
        };
        let stmt = search_statement("user1", "hook:*", &filter, 50);

        assert!(stmt.sql.contains("@@ to_tsquery('simple', $2)"));
        assert!(stmt.sql.contains("platform = $3"));
        assert!(stmt.sql.contains("folder = $4"));
        assert!(stmt.sql.contains("LIMIT $5"));
    }

    #[tokio::test]
    async fn test_find_recent() {
        let r1 = create_test_reference("ref2", "user1");
        let r2 = create_test_reference("ref1", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[r1, r2]])
                .into_connection(),
        );

        let repo = ReferenceRepository::new(db);
        let result = repo.find_recent("user1", 5).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "ref2");
    }

    #[tokio::test]
    async fn test_update_keeps_untouched_fields() {
        let current = create_test_reference("ref1", "user1");
        let mut updated = current.clone();
        updated.folder = Some("Hooks".to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[updated]])
                .into_connection(),
        );

        let repo = ReferenceRepository::new(db);
        let result = repo
            .update(
                current.clone(),
                ReferencePatch {
                    folder: Some("Hooks".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(result.folder.as_deref(), Some("Hooks"));
        assert_eq!(result.title, current.title);
        assert_eq!(result.notes, current.notes);
    }
}
