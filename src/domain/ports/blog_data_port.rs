//! Blog data port for fetching posts, comments and authors.

use async_trait::async_trait;

use crate::domain::entities::{Comment, Post, PostId, User, UserId};
use crate::domain::errors::ApiError;

/// Port for the read-only blog data API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogDataPort: Send + Sync {
    /// Fetches every post.
    async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// Fetches a single post.
    async fn fetch_post(&self, id: PostId) -> Result<Post, ApiError>;

    /// Fetches the comments attached to a post.
    async fn fetch_post_comments(&self, id: PostId) -> Result<Vec<Comment>, ApiError>;

    /// Fetches every author.
    async fn fetch_users(&self) -> Result<Vec<User>, ApiError>;

    /// Fetches a single author.
    async fn fetch_user(&self, id: UserId) -> Result<User, ApiError>;
}
