//! Read-time aggregates over a caller's records.
//!
//! Nothing here is stored. Each call recomputes from the snapshot it is
//! handed, so counts may lag a concurrent insert.

use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use vidplan_db::entities::{Platform, VideoStatus, reference, video};

/// Maximum number of videos returned by `videos.upcoming`.
pub const UPCOMING_LIMIT: usize = 5;

/// Maximum number of references returned by `references.recent`.
pub const RECENT_LIMIT: u64 = 5;

/// Maximum number of search results.
pub const SEARCH_LIMIT: u64 = 50;

/// Record counts per platform. The four fields always sum to the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformCounts {
    pub tiktok: u64,
    pub youtube: u64,
    pub kwai: u64,
    pub facebook: u64,
}

impl PlatformCounts {
    fn record(&mut self, platform: Platform) {
        match platform {
            Platform::Tiktok => self.tiktok += 1,
            Platform::Youtube => self.youtube += 1,
            Platform::Kwai => self.kwai += 1,
            Platform::Facebook => self.facebook += 1,
        }
    }

    /// Sum over all platforms.
    #[must_use]
    pub const fn sum(&self) -> u64 {
        self.tiktok + self.youtube + self.kwai + self.facebook
    }
}

/// Video counts by status and platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStats {
    pub total: u64,
    pub planned: u64,
    pub in_production: u64,
    pub published: u64,
    pub by_platform: PlatformCounts,
}

/// Reference counts by platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceStats {
    pub total: u64,
    pub by_platform: PlatformCounts,
}

/// Count videos by status and platform.
#[must_use]
pub fn video_stats(videos: &[video::Model]) -> VideoStats {
    let mut stats = VideoStats::default();

    for video in videos {
        stats.total += 1;
        match video.status {
            VideoStatus::Planned => stats.planned += 1,
            VideoStatus::InProduction => stats.in_production += 1,
            VideoStatus::Published => stats.published += 1,
        }
        stats.by_platform.record(video.platform);
    }

    stats
}

/// Count references by platform.
#[must_use]
pub fn reference_stats(references: &[reference::Model]) -> ReferenceStats {
    let mut stats = ReferenceStats::default();

    for reference in references {
        stats.total += 1;
        stats.by_platform.record(reference.platform);
    }

    stats
}

/// Planned videos scheduled strictly after `now`, soonest first.
///
/// Videos without a scheduled date are skipped even when planned.
#[must_use]
pub fn upcoming(
    videos: Vec<video::Model>,
    now: DateTimeWithTimeZone,
    limit: usize,
) -> Vec<video::Model> {
    let mut scheduled: Vec<_> = videos
        .into_iter()
        .filter(|v| v.status == VideoStatus::Planned)
        .filter(|v| v.scheduled_date.is_some_and(|at| at > now))
        .collect();

    scheduled.sort_by_key(|v| v.scheduled_date);
    scheduled.truncate(limit);
    scheduled
}
