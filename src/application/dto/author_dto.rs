//! Author directory and profile view data.

use crate::domain::entities::{Post, PostId, User};

/// Profile page tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ProfileTab {
    /// Contact and company details.
    #[default]
    Info,
    /// The author's posts.
    Posts,
}

impl std::fmt::Display for ProfileTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Posts => write!(f, "posts"),
        }
    }
}

/// Directory entry for one author.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorSummary {
    /// The author.
    pub user: User,
    /// Number of posts the author has written.
    pub post_count: usize,
    /// Avatar seeded by the author id.
    pub avatar_url: String,
}

/// A post listed on an author profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePost {
    /// The post.
    pub post: Post,
    /// Card-sized image for the post.
    pub image_url: String,
}

/// An author with their posts.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorProfile {
    /// The author.
    pub user: User,
    /// Avatar seeded by the author id.
    pub avatar_url: String,
    /// Posts by the author in feed order.
    pub posts: Vec<ProfilePost>,
}

impl AuthorProfile {
    /// Ids of the listed posts, for preloading.
    #[must_use]
    pub fn post_ids(&self) -> Vec<PostId> {
        self.posts.iter().map(|p| p.post.id).collect()
    }
}
