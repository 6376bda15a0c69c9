//! Post detail use case.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::dto::{CommentView, PostDetail};
use crate::application::services::image_urls::{ImageSize, ImageUrlBuilder, avatar_url};
use crate::domain::entities::PostId;
use crate::domain::errors::ApiError;
use crate::domain::ports::BlogDataPort;

/// Loads a post, its comments and its author.
pub struct PostDetailUseCase {
    data_port: Arc<dyn BlogDataPort>,
    urls: ImageUrlBuilder,
}

impl PostDetailUseCase {
    /// Creates the use case over `data_port`.
    #[must_use]
    pub fn new(data_port: Arc<dyn BlogDataPort>, urls: ImageUrlBuilder) -> Self {
        Self { data_port, urls }
    }

    /// # Errors
    /// Returns error if the post, its comments or its author cannot be fetched.
    #[instrument(skip(self))]
    pub async fn execute(&self, id: PostId) -> Result<PostDetail, ApiError> {
        let post = self.data_port.fetch_post(id).await?;
        let comments = self.data_port.fetch_post_comments(id).await?;
        let author = self.data_port.fetch_user(post.user_id).await?;

        debug!(post_id = %id, comments = comments.len(), "Post detail loaded");

        Ok(PostDetail {
            cover_url: self.urls.build(post.id.as_seed(), ImageSize::COVER),
            author_avatar: avatar_url(author.id.as_seed()),
            comments: comments
                .into_iter()
                .map(|comment| CommentView {
                    avatar_url: avatar_url(comment.id.as_seed()),
                    comment,
                })
                .collect(),
            post,
            author,
        })
    }
}
