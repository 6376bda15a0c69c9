//! Blog post entity.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl PostId {
    /// Returns the id as the signed seed used by the image service.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn as_seed(self) -> i64 {
        self.0 as i64
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A blog post as served by the data API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post id.
    pub id: PostId,
    /// Author id.
    pub user_id: UserId,
    /// Post title.
    pub title: String,
    /// Post body, paragraphs separated by newlines.
    pub body: String,
}

impl Post {
    /// Creates a post.
    #[must_use]
    pub fn new(
        id: u64,
        user_id: u64,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: PostId(id),
            user_id: UserId(user_id),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Splits the body into non-empty paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body
            .split('\n')
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Returns the body collapsed onto a single line.
    #[must_use]
    pub fn flat_body(&self) -> String {
        self.paragraphs().collect::<Vec<_>>().join(" ")
    }
}
