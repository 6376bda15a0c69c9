//! Domain error types.

mod api_error;
mod preload_error;

pub use api_error::ApiError;
pub use preload_error::{FetchError, ImageLoadFailure};
