//! Home feed use case.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::dto::{FeedCard, HomeFeed, UNKNOWN_AUTHOR};
use crate::application::services::image_urls::{ImageSize, ImageUrlBuilder, avatar_url};
use crate::application::services::pagination::{
    FeedPagination, LayoutWidth, STARTUP_WARM_UP_COUNT,
};
use crate::domain::entities::{Post, User, UserId};
use crate::domain::errors::ApiError;
use crate::domain::ports::BlogDataPort;

/// Builds one page of the home feed.
pub struct HomeFeedUseCase {
    data_port: Arc<dyn BlogDataPort>,
    urls: ImageUrlBuilder,
}

impl HomeFeedUseCase {
    /// Creates the use case over `data_port`, building image URLs with `urls`.
    #[must_use]
    pub fn new(data_port: Arc<dyn BlogDataPort>, urls: ImageUrlBuilder) -> Self {
        Self { data_port, urls }
    }

    /// Fetches posts and authors and lays out the requested page.
    ///
    /// Out-of-range pages are clamped.
    ///
    /// # Errors
    /// Returns error if either list cannot be fetched.
    #[instrument(skip(self))]
    pub async fn execute(&self, page: usize, layout: LayoutWidth) -> Result<HomeFeed, ApiError> {
        let (posts, users) =
            tokio::try_join!(self.data_port.fetch_posts(), self.data_port.fetch_users())?;

        let authors: HashMap<UserId, &User> = users.iter().map(|u| (u.id, u)).collect();
        let pager = FeedPagination::for_layout(&posts, layout);
        let page = pager.clamp_page(page);

        let card = |post: &Post, size: ImageSize| {
            let author = authors.get(&post.user_id);
            FeedCard {
                post: post.clone(),
                author_name: author.map_or_else(|| UNKNOWN_AUTHOR.to_string(), |u| u.name.clone()),
                author_avatar: author.map(|u| avatar_url(u.id.as_seed())),
                image_url: self.urls.build(post.id.as_seed(), size),
            }
        };

        let feed = HomeFeed {
            featured: pager.featured().map(|post| card(post, ImageSize::COVER)),
            cards: pager
                .page(page)
                .iter()
                .map(|post| card(post, ImageSize::CARD))
                .collect(),
            page,
            total_pages: pager.total_pages(),
            preload_ids: pager.preload_ids(page),
            warm_up_ids: pager.leading_ids(STARTUP_WARM_UP_COUNT),
        };

        debug!(
            posts = posts.len(),
            page = feed.page,
            total_pages = feed.total_pages,
            "Home feed assembled"
        );

        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PostId;
    use crate::domain::ports::mocks::MockBlogDataPort;

    fn sample_posts(n: u64) -> Vec<Post> {
        (1..=n)
            .map(|i| Post::new(i, if i % 2 == 0 { 1 } else { 9 }, format!("title {i}"), "body"))
            .collect()
    }

    fn mock_with_posts(n: u64) -> MockBlogDataPort {
        let mut mock = MockBlogDataPort::new();
        mock.expect_fetch_posts()
            .times(1)
            .returning(move || Ok(sample_posts(n)));
        mock.expect_fetch_users()
            .times(1)
            .returning(|| Ok(vec![User::new(1, "Leanne Graham", "Bret", "Sincere@april.biz")]));
        mock
    }

    #[tokio::test]
    async fn test_first_page_layout() {
        let use_case = HomeFeedUseCase::new(Arc::new(mock_with_posts(20)), ImageUrlBuilder::default());

        let feed = use_case.execute(1, LayoutWidth::Compact).await.unwrap();

        let featured = feed.featured.as_ref().unwrap();
        assert_eq!(featured.post.id, PostId(1));
        assert_eq!(featured.author_name, UNKNOWN_AUTHOR);
        assert!(featured.author_avatar.is_none());
        assert_eq!(
            featured.image_url,
            "https://picsum.photos/seed/post-1/1200/600"
        );
        assert_eq!(feed.preload_ids[0], PostId(1));

        let ids: Vec<_> = feed.cards.iter().map(|c| c.post.id.0).collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6]);
        assert_eq!(feed.cards[0].author_name, "Leanne Graham");
        assert_eq!(
            feed.cards[0].image_url,
            "https://picsum.photos/seed/post-2/400/200"
        );
        assert_eq!(feed.total_pages, 4);
        assert!(feed.has_next_page());
        assert_eq!(feed.preload_ids.len(), 11);
        assert_eq!(feed.warm_up_ids.len(), STARTUP_WARM_UP_COUNT);
        assert_eq!(feed.warm_up_ids[0], PostId(1));
    }

    #[tokio::test]
    async fn test_page_is_clamped() {
        let use_case = HomeFeedUseCase::new(Arc::new(mock_with_posts(20)), ImageUrlBuilder::default());

        let feed = use_case.execute(50, LayoutWidth::Wide).await.unwrap();

        assert_eq!(feed.page, 2);
        assert!(!feed.has_next_page());
        let ids: Vec<_> = feed.cards.iter().map(|c| c.post.id.0).collect();
        assert_eq!(ids, (14..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_empty_feed() {
        let use_case = HomeFeedUseCase::new(Arc::new(mock_with_posts(0)), ImageUrlBuilder::default());

        let feed = use_case.execute(1, LayoutWidth::Wide).await.unwrap();

        assert!(feed.is_empty());
        assert!(feed.cards.is_empty());
        assert!(feed.preload_ids.is_empty());
    }

    #[tokio::test]
    async fn test_api_error_propagates() {
        let mut mock = MockBlogDataPort::new();
        mock.expect_fetch_posts()
            .returning(|| Err(ApiError::from_status(503, "Service Unavailable")));
        mock.expect_fetch_users().returning(|| Ok(Vec::new()));
        let use_case = HomeFeedUseCase::new(Arc::new(mock), ImageUrlBuilder::default());

        let err = use_case.execute(1, LayoutWidth::Wide).await.unwrap_err();

        assert!(err.is_recoverable());
    }
}
