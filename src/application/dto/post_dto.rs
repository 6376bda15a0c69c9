//! Post detail view data.

use crate::domain::entities::{Comment, Post, User};

/// A comment with its avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    /// The comment.
    pub comment: Comment,
    /// Avatar seeded by the comment id.
    pub avatar_url: String,
}

/// A post with everything its detail page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetail {
    /// The post.
    pub post: Post,
    /// The post author.
    pub author: User,
    /// Avatar seeded by the author id.
    pub author_avatar: String,
    /// Cover-sized image for the post.
    pub cover_url: String,
    /// Comments in API order.
    pub comments: Vec<CommentView>,
}
