//! Post comment entity.

use serde::{Deserialize, Serialize};

use super::PostId;

/// Comment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl CommentId {
    /// Returns the id as the signed seed used by the avatar service.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn as_seed(self) -> i64 {
        self.0 as i64
    }
}

impl std::fmt::Display for CommentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reader comment attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment id.
    pub id: CommentId,
    /// Post the comment belongs to.
    pub post_id: PostId,
    /// Comment title.
    pub name: String,
    /// Commenter email.
    pub email: String,
    /// Comment text.
    pub body: String,
}

impl Comment {
    /// Creates a comment.
    #[must_use]
    pub fn new(
        id: u64,
        post_id: u64,
        name: impl Into<String>,
        email: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: CommentId(id),
            post_id: PostId(post_id),
            name: name.into(),
            email: email.into(),
            body: body.into(),
        }
    }
}
