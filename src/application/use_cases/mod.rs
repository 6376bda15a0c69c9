//! Use case implementations.

mod author_use_cases;
mod home_feed_use_case;
mod post_detail_use_case;

pub use author_use_cases::{AuthorDirectoryUseCase, AuthorProfileUseCase};
pub use home_feed_use_case::HomeFeedUseCase;
pub use post_detail_use_case::PostDetailUseCase;
