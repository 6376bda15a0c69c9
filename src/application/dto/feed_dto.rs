//! Home feed view data.

use crate::domain::entities::{Post, PostId};

/// Name shown when a post's author is not in the user list.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";

/// A post prepared for display as a card.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedCard {
    /// The post.
    pub post: Post,
    /// Author display name, or a placeholder when unknown.
    pub author_name: String,
    /// Absent when the author is unknown.
    pub author_avatar: Option<String>,
    /// Image shown on the card.
    pub image_url: String,
}

/// One page of the home feed.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    /// Newest post, shown above the pages.
    pub featured: Option<FeedCard>,
    /// Cards on the current page.
    pub cards: Vec<FeedCard>,
    /// One-based page actually shown after clamping.
    pub page: usize,
    /// Number of pages after the featured post.
    pub total_pages: usize,
    /// Posts whose images should be warmed while this page is visible.
    pub preload_ids: Vec<PostId>,
    /// Leading posts warmed before the feed is first shown.
    pub warm_up_ids: Vec<PostId>,
}

impl HomeFeed {
    /// Returns true when another page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns true when there are no posts at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.featured.is_none()
    }
}
