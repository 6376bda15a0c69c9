//! Data transfer objects for the application layer.

mod author_dto;
mod feed_dto;
mod post_dto;

pub use author_dto::{AuthorProfile, AuthorSummary, ProfilePost, ProfileTab};
pub use feed_dto::{FeedCard, HomeFeed, UNKNOWN_AUTHOR};
pub use post_dto::{CommentView, PostDetail};
