//! Author directory and profile use cases.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::dto::{AuthorProfile, AuthorSummary, ProfilePost};
use crate::application::services::image_urls::{ImageSize, ImageUrlBuilder, avatar_url};
use crate::domain::entities::UserId;
use crate::domain::errors::ApiError;
use crate::domain::ports::BlogDataPort;

/// Lists every author with their post count.
pub struct AuthorDirectoryUseCase {
    data_port: Arc<dyn BlogDataPort>,
}

impl AuthorDirectoryUseCase {
    /// Creates the use case over `data_port`.
    #[must_use]
    pub fn new(data_port: Arc<dyn BlogDataPort>) -> Self {
        Self { data_port }
    }

    /// # Errors
    /// Returns error if users or posts cannot be fetched.
    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Vec<AuthorSummary>, ApiError> {
        let (users, posts) =
            tokio::try_join!(self.data_port.fetch_users(), self.data_port.fetch_posts())?;

        let mut counts: HashMap<UserId, usize> = HashMap::new();
        for post in &posts {
            *counts.entry(post.user_id).or_insert(0) += 1;
        }

        debug!(users = users.len(), posts = posts.len(), "Author directory loaded");

        Ok(users
            .into_iter()
            .map(|user| AuthorSummary {
                post_count: counts.get(&user.id).copied().unwrap_or(0),
                avatar_url: avatar_url(user.id.as_seed()),
                user,
            })
            .collect())
    }
}

/// Loads one author and the posts they wrote.
pub struct AuthorProfileUseCase {
    data_port: Arc<dyn BlogDataPort>,
    urls: ImageUrlBuilder,
}

impl AuthorProfileUseCase {
    /// Creates the use case over `data_port`.
    #[must_use]
    pub fn new(data_port: Arc<dyn BlogDataPort>, urls: ImageUrlBuilder) -> Self {
        Self { data_port, urls }
    }

    /// # Errors
    /// Returns error if the user or the post list cannot be fetched.
    #[instrument(skip(self))]
    pub async fn execute(&self, id: UserId) -> Result<AuthorProfile, ApiError> {
        let (user, posts) =
            tokio::try_join!(self.data_port.fetch_user(id), self.data_port.fetch_posts())?;

        let posts: Vec<ProfilePost> = posts
            .into_iter()
            .filter(|post| post.user_id == id)
            .map(|post| ProfilePost {
                image_url: self.urls.build(post.id.as_seed(), ImageSize::CARD),
                post,
            })
            .collect();

        debug!(user_id = %id, posts = posts.len(), "Author profile loaded");

        Ok(AuthorProfile {
            avatar_url: avatar_url(user.id.as_seed()),
            user,
            posts,
        })
    }
}
