//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Comment, ImageHandle, LoadStatus, Post, PostId, User, UserId};
pub use errors::{ApiError, FetchError, ImageLoadFailure};
pub use ports::{BlogDataPort, ImageFetcherPort};
