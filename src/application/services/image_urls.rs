//! Deterministic image URL builders.
//!
//! The image service uses the path seed as the image's identity, so the same
//! id and size always produce the same picture.

/// Default base of the seeded image service.
pub const DEFAULT_IMAGE_SERVICE: &str = "https://picsum.photos";

/// Base of the avatar service.
pub const AVATAR_SERVICE: &str = "https://i.pravatar.cc";

/// Number of distinct portraits the avatar service offers.
pub const AVATAR_POOL_SIZE: i64 = 70;

/// Requested image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Post card thumbnail.
    pub const CARD: Self = Self::new(400, 200);
    /// Post detail cover.
    pub const COVER: Self = Self::new(1200, 600);

    /// Creates a size from pixel dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::CARD
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Builds post image URLs against a configurable service base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    base: String,
}

impl ImageUrlBuilder {
    /// Creates a builder for `base`, ignoring any trailing slash.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the image URL for `id` at `size`.
    #[must_use]
    pub fn build(&self, id: i64, size: ImageSize) -> String {
        format!(
            "{}/seed/post-{id}/{}/{}",
            self.base, size.width, size.height
        )
    }

    /// Returns the URLs for every id, in order.
    #[must_use]
    pub fn build_all(&self, ids: &[i64], size: ImageSize) -> Vec<String> {
        ids.iter().map(|&id| self.build(id, size)).collect()
    }
}

impl Default for ImageUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_SERVICE)
    }
}

/// Returns the post image URL on the default service.
#[must_use]
pub fn build_image_url(id: i64, size: ImageSize) -> String {
    ImageUrlBuilder::default().build(id, size)
}

/// Returns a portrait URL for a user or comment id.
#[must_use]
pub fn avatar_url(id: i64) -> String {
    format!(
        "{AVATAR_SERVICE}/300?img={}",
        id.rem_euclid(AVATAR_POOL_SIZE)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_build_is_deterministic() {
        let first = build_image_url(42, ImageSize::new(400, 200));
        let second = build_image_url(42, ImageSize::new(400, 200));

        assert_eq!(first, "https://picsum.photos/seed/post-42/400/200");
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_size_is_card() {
        assert_eq!(
            build_image_url(42, ImageSize::default()),
            build_image_url(42, ImageSize::new(400, 200))
        );
    }

    #[test_case(-3, ImageSize::CARD, "https://picsum.photos/seed/post--3/400/200" ; "negative_id")]
    #[test_case(0, ImageSize::COVER, "https://picsum.photos/seed/post-0/1200/600" ; "cover")]
    #[test_case(7, ImageSize::new(1, 1), "https://picsum.photos/seed/post-7/1/1" ; "tiny")]
    fn test_build_shapes(id: i64, size: ImageSize, expected: &str) {
        assert_eq!(build_image_url(id, size), expected);
    }

    #[test]
    fn test_custom_base_strips_trailing_slash() {
        let builder = ImageUrlBuilder::new("http://localhost:8080/");
        assert_eq!(
            builder.build(1, ImageSize::CARD),
            "http://localhost:8080/seed/post-1/400/200"
        );
    }

    #[test_case(1, "https://i.pravatar.cc/300?img=1" ; "small")]
    #[test_case(71, "https://i.pravatar.cc/300?img=1" ; "wraps")]
    #[test_case(-1, "https://i.pravatar.cc/300?img=69" ; "negative_wraps")]
    fn test_avatar_url(id: i64, expected: &str) {
        assert_eq!(avatar_url(id), expected);
    }
}
