//! Video service.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use validator::Validate;
use vidplan_common::{AppResult, IdGenerator};
use vidplan_db::{
    entities::{Platform, VideoStatus, video},
    repositories::{NewVideo, VideoPatch, VideoRepository, VideoScan},
};

use super::validate_tags;
use crate::{
    aggregate::{self, SEARCH_LIMIT, UPCOMING_LIMIT, VideoStats},
    filter::{VideoListFilter, VideoSearchInput},
    guard::authorize_owner,
    identity::RequestContext,
};

/// Input for creating a video.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(max = 10000))]
    pub description: String,

    #[validate(length(max = 2048))]
    pub link: Option<String>,

    pub platform: Platform,

    #[validate(length(min = 1, max = 64))]
    pub category: String,

    #[serde(default)]
    #[validate(length(max = 32))]
    pub tags: Vec<String>,

    pub status: VideoStatus,

    pub scheduled_date: Option<DateTimeWithTimeZone>,
}

/// Input for updating a video. Omitted fields are left unchanged.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoInput {
    pub id: String,

    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    #[validate(length(max = 10000))]
    pub description: Option<String>,

    #[validate(length(max = 2048))]
    pub link: Option<String>,

    pub platform: Option<Platform>,

    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,

    #[validate(length(max = 32))]
    pub tags: Option<Vec<String>>,

    pub status: Option<VideoStatus>,

    pub scheduled_date: Option<DateTimeWithTimeZone>,
}

impl From<UpdateVideoInput> for VideoPatch {
    fn from(input: UpdateVideoInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            link: input.link,
            platform: input.platform,
            category: input.category,
            tags: input.tags,
            status: input.status,
            scheduled_date: input.scheduled_date,
        }
    }
}

/// Service for managing videos.
#[derive(Clone)]
pub struct VideoService {
    video_repo: VideoRepository,
    id_gen: IdGenerator,
}

impl VideoService {
    /// Create a new video service.
    #[must_use]
    pub const fn new(video_repo: VideoRepository) -> Self {
        Self {
            video_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List the caller's videos, newest first, narrowed by at most one filter.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &VideoListFilter,
    ) -> AppResult<Vec<video::Model>> {
        let user_id = ctx.resolve_user()?;
        self.video_repo.find_by_user(user_id, &filter.scan()).await
    }

    /// Search the caller's video titles with every supplied filter applied.
    ///
    /// A blank term answers with the list result for the same filters.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        input: &VideoSearchInput,
    ) -> AppResult<Vec<video::Model>> {
        let user_id = ctx.resolve_user()?;
        input.validate()?;

        let Some(term) = input.term() else {
            let mut videos = self
                .video_repo
                .find_by_user(user_id, &input.list_filter().scan())
                .await?;
            videos.truncate(SEARCH_LIMIT as usize);
            return Ok(videos);
        };

        self.video_repo
            .search(user_id, term, &input.filter(), SEARCH_LIMIT)
            .await
    }

    /// Get one of the caller's videos.
    pub async fn show(&self, ctx: &RequestContext, id: &str) -> AppResult<video::Model> {
        let user_id = ctx.resolve_user()?;
        authorize_owner(self.video_repo.find_by_id(id).await?, user_id)
    }

    /// Create a video owned by the caller.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateVideoInput,
    ) -> AppResult<video::Model> {
        let user_id = ctx.resolve_user()?;
        input.validate()?;
        validate_tags(&input.tags)?;

        let video = self
            .video_repo
            .create(
                NewVideo {
                    id: self.id_gen.generate(),
                    user_id: user_id.to_string(),
                    title: input.title,
                    description: input.description,
                    link: input.link,
                    platform: input.platform,
                    category: input.category,
                    tags: input.tags,
                    status: input.status,
                    scheduled_date: input.scheduled_date,
                },
                Utc::now().into(),
            )
            .await?;

        tracing::info!(user_id = %user_id, video_id = %video.id, "Created video");
        Ok(video)
    }

    /// Apply a partial update to one of the caller's videos.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        input: UpdateVideoInput,
    ) -> AppResult<video::Model> {
        let user_id = ctx.resolve_user()?;
        input.validate()?;
        if let Some(tags) = &input.tags {
            validate_tags(tags)?;
        }

        let current = authorize_owner(self.video_repo.find_by_id(&input.id).await?, user_id)?;
        let video = self
            .video_repo
            .update(current, input.into(), Utc::now().into())
            .await?;

        tracing::info!(user_id = %user_id, video_id = %video.id, "Updated video");
        Ok(video)
    }

    /// Delete one of the caller's videos.
    pub async fn remove(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        let user_id = ctx.resolve_user()?;
        let video = authorize_owner(self.video_repo.find_by_id(id).await?, user_id)?;

        self.video_repo.delete(&video.id).await?;

        tracing::info!(user_id = %user_id, video_id = %id, "Deleted video");
        Ok(())
    }

    /// The caller's next planned videos with a future scheduled date.
    pub async fn upcoming(&self, ctx: &RequestContext) -> AppResult<Vec<video::Model>> {
        let user_id = ctx.resolve_user()?;
        let planned = self
            .video_repo
            .find_by_user(user_id, &VideoScan::Status(VideoStatus::Planned))
            .await?;

        Ok(aggregate::upcoming(planned, Utc::now().into(), UPCOMING_LIMIT))
    }

    /// Counts of the caller's videos by status and platform.
    pub async fn stats(&self, ctx: &RequestContext) -> AppResult<VideoStats> {
        let user_id = ctx.resolve_user()?;
        let videos = self.video_repo.find_by_user(user_id, &VideoScan::All).await?;

        Ok(aggregate::video_stats(&videos))
    }
}
