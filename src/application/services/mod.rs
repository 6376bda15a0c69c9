//! Application services.

/// Image and avatar URL builders.
pub mod image_urls;
/// Home feed pagination.
pub mod pagination;

pub use image_urls::{ImageSize, ImageUrlBuilder, avatar_url, build_image_url};
pub use pagination::{FeedPagination, LayoutWidth, STARTUP_WARM_UP_COUNT};
