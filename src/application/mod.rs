//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// URL building and pagination.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{AuthorProfile, AuthorSummary, HomeFeed, PostDetail, ProfileTab};
pub use use_cases::{AuthorDirectoryUseCase, AuthorProfileUseCase, HomeFeedUseCase, PostDetailUseCase};
