//! List filter selection and search constraints.
//!
//! List calls honor at most one filter, chosen by a fixed priority. Search
//! calls apply every supplied filter. The two behave differently on purpose
//! and callers depend on both.

use serde::Deserialize;
use validator::Validate;
use vidplan_db::{
    entities::{Platform, VideoStatus},
    repositories::{ReferenceScan, ReferenceSearchFilter, VideoScan, VideoSearchFilter},
};

/// A label filter counts only when it is non-empty.
fn supplied(label: Option<&str>) -> Option<String> {
    label.filter(|label| !label.is_empty()).map(str::to_owned)
}

/// Optional filters accepted by `videos.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VideoListFilter {
    pub platform: Option<Platform>,
    pub status: Option<VideoStatus>,
    pub category: Option<String>,
}

impl VideoListFilter {
    /// Pick the single scan to run: platform, then status, then category.
    #[must_use]
    pub fn scan(&self) -> VideoScan {
        if let Some(platform) = self.platform {
            VideoScan::Platform(platform)
        } else if let Some(status) = self.status {
            VideoScan::Status(status)
        } else if let Some(category) = supplied(self.category.as_deref()) {
            VideoScan::Category(category)
        } else {
            VideoScan::All
        }
    }
}

/// Optional filters accepted by `references.list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceListFilter {
    pub platform: Option<Platform>,
    pub folder: Option<String>,
}

impl ReferenceListFilter {
    /// Pick the single scan to run: platform, then folder.
    #[must_use]
    pub fn scan(&self) -> ReferenceScan {
        if let Some(platform) = self.platform {
            ReferenceScan::Platform(platform)
        } else if let Some(folder) = supplied(self.folder.as_deref()) {
            ReferenceScan::Folder(folder)
        } else {
            ReferenceScan::All
        }
    }
}

/// Input for `videos.search`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchInput {
    #[validate(length(max = 256))]
    pub search_term: String,
    pub platform: Option<Platform>,
    pub category: Option<String>,
    pub status: Option<VideoStatus>,
}

impl VideoSearchInput {
    /// Trimmed search term, or `None` when there is nothing to match.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        let term = self.search_term.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Every supplied filter, applied together.
    #[must_use]
    pub fn filter(&self) -> VideoSearchFilter {
        VideoSearchFilter {
            platform: self.platform,
            category: supplied(self.category.as_deref()),
            status: self.status,
        }
    }

    /// The same filters as a list call, used when the term is blank.
    #[must_use]
    pub fn list_filter(&self) -> VideoListFilter {
        VideoListFilter {
            platform: self.platform,
            status: self.status,
            category: self.category.clone(),
        }
    }
}

/// Input for `references.search`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceSearchInput {
    #[validate(length(max = 256))]
    pub search_term: String,
    pub platform: Option<Platform>,
    pub folder: Option<String>,
}

impl ReferenceSearchInput {
    /// Trimmed search term, or `None` when there is nothing to match.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        let term = self.search_term.trim();
        (!term.is_empty()).then_some(term)
    }

    #[must_use]
    pub fn filter(&self) -> ReferenceSearchFilter {
        ReferenceSearchFilter {
            platform: self.platform,
            folder: supplied(self.folder.as_deref()),
        }
    }

    #[must_use]
    pub fn list_filter(&self) -> ReferenceListFilter {
        ReferenceListFilter {
            platform: self.platform,
            folder: self.folder.clone(),
        }
    }
}
