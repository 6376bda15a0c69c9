//! Home feed pagination.
//!
//! The first post is featured on its own; the rest are split into pages.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Post, PostId};

/// Terminal width class, which decides how many cards fit on a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutWidth {
    /// Narrow terminals.
    Compact,
    /// Medium terminals.
    Medium,
    /// Wide terminals.
    #[default]
    Wide,
}

impl LayoutWidth {
    /// Number of cards on one page.
    #[must_use]
    pub const fn posts_per_page(self) -> usize {
        match self {
            Self::Compact => 5,
            Self::Medium => 8,
            Self::Wide => 12,
        }
    }
}

impl std::fmt::Display for LayoutWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Medium => write!(f, "medium"),
            Self::Wide => write!(f, "wide"),
        }
    }
}

/// Posts whose images are warmed before the feed is first shown.
pub const STARTUP_WARM_UP_COUNT: usize = 10;

/// Page arithmetic over a post list with a featured head.
#[derive(Debug, Clone)]
pub struct FeedPagination<'a> {
    posts: &'a [Post],
    per_page: usize,
}

impl<'a> FeedPagination<'a> {
    /// Paginates `posts`, with at least one card per page.
    #[must_use]
    pub fn new(posts: &'a [Post], per_page: usize) -> Self {
        Self {
            posts,
            per_page: per_page.max(1),
        }
    }

    /// Paginates `posts` for the page size of `layout`.
    #[must_use]
    pub fn for_layout(posts: &'a [Post], layout: LayoutWidth) -> Self {
        Self::new(posts, layout.posts_per_page())
    }

    /// Cards per page.
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// The featured post, if there are any posts.
    #[must_use]
    pub fn featured(&self) -> Option<&'a Post> {
        self.posts.first()
    }

    fn rest(&self) -> &'a [Post] {
        self.posts.get(1..).unwrap_or_default()
    }

    /// Pages needed for everything after the featured post.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.rest().len().div_ceil(self.per_page)
    }

    /// Clamps a one-based page number into the valid range.
    #[must_use]
    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages().max(1))
    }

    /// Posts on a one-based page; empty when out of range.
    #[must_use]
    pub fn page(&self, page: usize) -> &'a [Post] {
        let rest = self.rest();
        if page == 0 {
            return &[];
        }
        let start = (page - 1).saturating_mul(self.per_page);
        if start >= rest.len() {
            return &[];
        }
        let end = (start + self.per_page).min(rest.len());
        &rest[start..end]
    }

    /// Ids of the first `count` posts in feed order, featured post included.
    #[must_use]
    pub fn leading_ids(&self, count: usize) -> Vec<PostId> {
        self.posts.iter().take(count).map(|p| p.id).collect()
    }

    /// Ids whose images should be warm while `page` is shown: the featured
    /// post, the page itself and the following page.
    #[must_use]
    pub fn preload_ids(&self, page: usize) -> Vec<PostId> {
        let Some(featured) = self.featured() else {
            return Vec::new();
        };

        let mut ids = vec![featured.id];
        ids.extend(self.page(page).iter().map(|p| p.id));
        if page < self.total_pages() {
            ids.extend(self.page(page + 1).iter().map(|p| p.id));
        }
        ids
    }
}
