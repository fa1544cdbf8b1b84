//! Database repositories.

mod label;
mod reference;
mod search;
mod user;
mod video;

pub use label::{CategoryRepository, FolderRepository};
pub use reference::{
    NewReference, ReferencePatch, ReferenceRepository, ReferenceScan, ReferenceSearchFilter,
};
pub use search::prefix_tsquery;
pub use user::UserRepository;
pub use video::{
    NewVideo, VideoPatch, VideoRepository, VideoScan, VideoSearchFilter, published_date_on_write,
};
