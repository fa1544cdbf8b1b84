//! Video repository.

use std::sync::Arc;

use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbBackend,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, Statement, Value,
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, Func},
};
use vidplan_common::{AppError, AppResult};

use super::search::prefix_tsquery;
use crate::entities::{Platform, Video, VideoStatus, tags_to_json, video};

/// Owner-scoped scan narrowed by at most one equality predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoScan {
    /// Every video of the owner.
    All,
    /// Videos on one platform.
    Platform(Platform),
    /// Videos in one status.
    Status(VideoStatus),
    /// Videos carrying one category label.
    Category(String),
}

/// Equality constraints applied together to a title search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoSearchFilter {
    pub platform: Option<Platform>,
    pub category: Option<String>,
    pub status: Option<VideoStatus>,
}

/// Fields of a new video.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub platform: Platform,
    pub category: String,
    pub tags: Vec<String>,
    pub status: VideoStatus,
    pub scheduled_date: Option<DateTimeWithTimeZone>,
}

/// Partial update of a video. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub platform: Option<Platform>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<VideoStatus>,
    pub scheduled_date: Option<DateTimeWithTimeZone>,
}

/// Published date to store when a write moves a video from `previous` to
/// `next` status.
///
/// Returns `Some(now)` only on a transition into `Published`. `None` means
/// "leave the stored value as is", so a later edit never clears it.
#[must_use]
pub fn published_date_on_write(
    previous: Option<VideoStatus>,
    next: VideoStatus,
    now: DateTimeWithTimeZone,
) -> Option<DateTimeWithTimeZone> {
    if next == VideoStatus::Published && previous != Some(VideoStatus::Published) {
        Some(now)
    } else {
        None
    }
}

/// Build the owner-scoped select for a scan, newest first.
#[must_use]
pub fn scan_query(user_id: &str, scan: &VideoScan) -> Select<Video> {
    let mut condition = Condition::all().add(video::Column::UserId.eq(user_id));

    condition = match scan {
        VideoScan::All => condition,
        VideoScan::Platform(platform) => condition.add(video::Column::Platform.eq(*platform)),
        VideoScan::Status(status) => condition.add(video::Column::Status.eq(*status)),
        VideoScan::Category(category) => {
            condition.add(video::Column::Category.eq(category.as_str()))
        }
    };

    Video::find()
        .filter(condition)
        .order_by_desc(video::Column::CreatedAt)
        .order_by_desc(video::Column::Id)
}

/// Build the ranked full-text title search statement.
///
/// `query` is a `to_tsquery` expression from [`prefix_tsquery`]. Every
/// supplied filter is added to the WHERE clause.
#[must_use]
pub fn search_statement(
    user_id: &str,
    query: &str,
    filter: &VideoSearchFilter,
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
    if let Some(category) = &filter.category {
        values.push(category.as_str().into());
        conditions.push(format!("category = ${}", values.len()));
    }
    if let Some(status) = filter.status {
        values.push(status.to_value().into());
        conditions.push(format!("status = ${}", values.len()));
    }

    values.push((limit as i64).into());
    let limit_placeholder = values.len();
    let where_clause = conditions.join(" AND ");

    let sql = format!(
        r"
        SELECT
            id, user_id, title, description, link, platform, category, tags,
            status, scheduled_date, published_date, created_at
        FROM video
        WHERE {where_clause}
        ORDER BY
            ts_rank(to_tsvector('simple', title), to_tsquery('simple', $2)) DESC,
            created_at DESC
        LIMIT ${limit_placeholder}
        "
    );

    Statement::from_sql_and_values(DbBackend::Postgres, &sql, values)
}

/// Repository for video operations.
#[derive(Clone)]
pub struct VideoRepository {
    db: Arc<DatabaseConnection>,
}

impl VideoRepository {
    /// Create a new video repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find video by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<video::Model>> {
        Video::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Scan the owner's videos, newest first.
    pub async fn find_by_user(&self, user_id: &str, scan: &VideoScan) -> AppResult<Vec<video::Model>> {
        scan_query(user_id, scan)
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
        filter: &VideoSearchFilter,
        limit: u64,
    ) -> AppResult<Vec<video::Model>> {
        let Some(query) = prefix_tsquery(term) else {
            return self.search_like(user_id, term, filter, limit).await;
        };

        match self.search_fulltext(user_id, &query, filter, limit).await {
            Ok(results) => Ok(results),
            Err(e) => {
                tracing::warn!(error = %e, "Video full-text search failed, falling back to LIKE");
                self.search_like(user_id, term, filter, limit).await
            }
        }
    }

    /// Full-text search using `PostgreSQL` tsvector/tsquery, ranked by relevance.
    pub async fn search_fulltext(
        &self,
        user_id: &str,
        query: &str,
        filter: &VideoSearchFilter,
        limit: u64,
    ) -> AppResult<Vec<video::Model>> {
        Video::find()
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
        filter: &VideoSearchFilter,
        limit: u64,
    ) -> AppResult<Vec<video::Model>> {
        let pattern = format!(
            "%{}%",
            term.to_lowercase().replace('%', "\\%").replace('_', "\\_")
        );

        let mut condition = Condition::all()
            .add(video::Column::UserId.eq(user_id))
            .add(Expr::expr(Func::lower(Expr::col(video::Column::Title))).like(pattern));

        if let Some(platform) = filter.platform {
            condition = condition.add(video::Column::Platform.eq(platform));
        }
        if let Some(category) = &filter.category {
            condition = condition.add(video::Column::Category.eq(category.as_str()));
        }
        if let Some(status) = filter.status {
            condition = condition.add(video::Column::Status.eq(status));
        }

        Video::find()
            .filter(condition)
            .order_by_desc(video::Column::CreatedAt)
            .order_by_desc(video::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new video stamped with `now`.
    ///
    /// A video created as `Published` gets `published_date == created_at`.
    pub async fn create(&self, input: NewVideo, now: DateTimeWithTimeZone) -> AppResult<video::Model> {
        let published_date = published_date_on_write(None, input.status, now);

        let active_model = video::ActiveModel {
            id: Set(input.id),
            user_id: Set(input.user_id),
            title: Set(input.title),
            description: Set(input.description),
            link: Set(input.link),
            platform: Set(input.platform),
            category: Set(input.category),
            tags: Set(tags_to_json(&input.tags)),
            status: Set(input.status),
            scheduled_date: Set(input.scheduled_date),
            published_date: Set(published_date),
            created_at: Set(now),
        };

        active_model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Apply a patch to a stored video.
    ///
    /// `current` is the row as read before the write; its status decides
    /// whether the patch publishes the video.
    pub async fn update(
        &self,
        current: video::Model,
        patch: VideoPatch,
        now: DateTimeWithTimeZone,
    ) -> AppResult<video::Model> {
        let previous_status = current.status;
        let mut active: video::ActiveModel = current.into();

        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(link) = patch.link {
            active.link = Set(Some(link));
        }
        if let Some(platform) = patch.platform {
            active.platform = Set(platform);
        }
        if let Some(category) = patch.category {
            active.category = Set(category);
        }
        if let Some(tags) = patch.tags {
            active.tags = Set(tags_to_json(&tags));
        }
        if let Some(scheduled_date) = patch.scheduled_date {
            active.scheduled_date = Set(Some(scheduled_date));
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
            if let Some(published) = published_date_on_write(Some(previous_status), status, now) {
                active.published_date = Set(Some(published));
            }
        }

        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a video.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Video::delete_by_id(id)
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
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, QueryTrait};

    fn create_test_video(id: &str, user_id: &str, status: VideoStatus) -> video::Model {
        video::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            title: "Morning routine".to_string(),
            description: "Shot list".to_string(),
            link: None,
            platform: Platform::Youtube,
            category: "Vlog".to_string(),
            tags: tags_to_json(&["daily".to_string(), "routine".to_string()]),
            status,
            scheduled_date: None,
            published_date: None,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_published_date_set_on_create_as_published() {
        let now: DateTimeWithTimeZone = Utc::now().into();
        assert_eq!(
            published_date_on_write(None, VideoStatus::Published, now),
            Some(now)
        );
        assert_eq!(published_date_on_write(None, VideoStatus::Planned, now), None);
        assert_eq!(
            published_date_on_write(None, VideoStatus::InProduction, now),
            None
        );
    }

    #[test]
    fn test_published_date_on_transition() {
        let now: DateTimeWithTimeZone = Utc::now().into();

        // planned -> published sets it
        assert_eq!(
            published_date_on_write(Some(VideoStatus::Planned), VideoStatus::Published, now),
            Some(now)
        );
        // published -> published keeps the stored value
        assert_eq!(
            published_date_on_write(Some(VideoStatus::Published), VideoStatus::Published, now),
            None
        );
        // leaving published never clears it
        assert_eq!(
            published_date_on_write(Some(VideoStatus::Published), VideoStatus::Planned, now),
            None
        );
    }

    #[test]
    fn test_scan_query_uses_single_predicate() {
        let sql = scan_query("user1", &VideoScan::Platform(Platform::Tiktok))
            .build(DatabaseBackend::Postgres)
            .sql;

        assert!(sql.contains(r#""video"."user_id" = $1"#));
        assert!(sql.contains(r#""video"."platform" = $2"#));
        assert!(!sql.contains(r#""video"."status" = "#));
        assert!(sql.contains(r#"ORDER BY "video"."created_at" DESC"#));
    }

    #[test]
    fn test_scan_query_all_is_owner_only() {
        let stmt = scan_query("user1", &VideoScan::All).build(DatabaseBackend::Postgres);

        assert!(stmt.sql.contains(r#""video"."user_id" = $1"#));
        assert!(!stmt.sql.contains("$2"));
    }

    #[test]
    fn test_search_statement_applies_every_filter() {
        let filter = VideoSearchFilter {
            platform: Some(Platform::Youtube),
            category: Some("Vlog".to_string()),
            status: Some(VideoStatus::Published),
        };
        let stmt = search_statement("user1", "routine:*", &filter, 50);

        assert!(stmt.sql.contains("user_id = $1"));
        assert!(stmt.sql.contains("to_tsquery('simple', $2)"));
        assert!(stmt.sql.contains("platform = $3"));
        assert!(stmt.sql.contains("category = $4"));
        assert!(stmt.sql.contains("status = $5"));
        assert!(stmt.sql.contains("LIMIT $6"));
        assert_eq!(stmt.values.map(|v| v.0.len()), Some(6));
    }

    #[test]
    fn test_search_statement_without_filters() {
        let query = prefix_tsquery("morning rout").unwrap();
        let stmt = search_statement("user1", &query, &VideoSearchFilter::default(), 50);

        assert!(!stmt.sql.contains("plainto_tsquery"));
        assert_eq!(
            stmt.values.as_ref().map(|v| v.0[1].clone()),
            Some(Value::from("morning & rout:*"))
        );

        assert!(!stmt.sql.contains("platform ="));
        assert!(!stmt.sql.contains("status ="));
        assert!(stmt.sql.contains("LIMIT $3"));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let video = create_test_video("video1", "user1", VideoStatus::Planned);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[video.clone()]])
                .into_connection(),
        );

        let repo = VideoRepository::new(db);
        let result = repo.find_by_id("video1").await.unwrap();

        assert_eq!(result, Some(video));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<video::Model>::new()])
                .into_connection(),
        );

        let repo = VideoRepository::new(db);
        let result = repo.find_by_id("nonexistent").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_create_published_stamps_date() {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let mut stored = create_test_video("video1", "user1", VideoStatus::Published);
        stored.created_at = now;
        stored.published_date = Some(now);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[stored.clone()]])
                .into_connection(),
        );

        let repo = VideoRepository::new(db);
        let created = repo
            .create(
                NewVideo {
                    id: "video1".to_string(),
                    user_id: "user1".to_string(),
                    title: stored.title.clone(),
                    description: stored.description.clone(),
                    link: None,
                    platform: Platform::Youtube,
                    category: "Vlog".to_string(),
                    tags: stored.tag_list(),
                    status: VideoStatus::Published,
                    scheduled_date: None,
                },
                now,
            )
            .await
            .unwrap();

        assert_eq!(created.published_date, Some(created.created_at));
    }

    #[tokio::test]
    async fn test_update_title_only() {
        let current = create_test_video("video1", "user1", VideoStatus::Planned);
        let mut updated = current.clone();
        updated.title = "Evening routine".to_string();

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[updated.clone()]])
                .into_connection(),
        );

        let repo = VideoRepository::new(db);
        let patch = VideoPatch {
            title: Some("Evening routine".to_string()),
            ..Default::default()
        };
        let result = repo
            .update(current.clone(), patch, (Utc::now() + Duration::seconds(1)).into())
            .await
            .unwrap();

        assert_eq!(result.title, "Evening routine");
        assert_eq!(result.description, current.description);
        assert_eq!(result.tag_list(), current.tag_list());
        assert_eq!(result.status, current.status);
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

        let repo = VideoRepository::new(db);
        let result = repo.delete("video1").await;

        assert!(result.is_ok());
    }
}
