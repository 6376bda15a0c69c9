//! Domain types for image preloading.

use std::sync::Arc;

/// Load state of a single image URL.
///
/// Transitions only move forward: `Idle -> Loading -> Loaded | Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadStatus {
    /// No request has been made for the URL yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The image was fetched and decoded.
    Loaded,
    /// The fetch or decode failed. Never retried.
    Error,
}

impl LoadStatus {
    /// Returns true once the image has been decoded.
    #[must_use]
    pub const fn is_loaded(self) -> bool {
        matches!(self, Self::Loaded)
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Loaded => write!(f, "loaded"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Shared handle to a decoded image.
///
/// Cloning is cheap; every clone points at the same decoded pixels.
#[derive(Clone)]
pub struct ImageHandle(Arc<image::DynamicImage>);

impl ImageHandle {
    /// Wraps a decoded image.
    #[must_use]
    pub fn new(image: image::DynamicImage) -> Self {
        Self(Arc::new(image))
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Returns true if both handles refer to the same decoded image.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_loaded_counts_as_loaded() {
        assert!(!LoadStatus::Idle.is_loaded());
        assert!(!LoadStatus::Loading.is_loaded());
        assert!(LoadStatus::Loaded.is_loaded());
        assert!(!LoadStatus::Error.is_loaded());
        assert_eq!(LoadStatus::default(), LoadStatus::Idle);
    }

    #[test]
    fn test_handle_identity() {
        let handle = ImageHandle::new(image::DynamicImage::new_rgb8(4, 2));
        let clone = handle.clone();
        let other = ImageHandle::new(image::DynamicImage::new_rgb8(4, 2));

        assert!(handle.same_as(&clone));
        assert!(!handle.same_as(&other));
        assert_eq!((clone.width(), clone.height()), (4, 2));
    }
}
