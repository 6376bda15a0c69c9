//! Data API error types.

use thiserror::Error;

/// Errors surfaced by the blog data API.
///
/// Each variant carries the user-facing message shown by the views.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("request failed ({status}): {message}")]
    Client { status: u16, message: String },

    #[error("server error ({status}), try again later")]
    Server { status: u16 },

    #[error("no response from server, check your internet connection: {message}")]
    NoResponse { message: String },

    #[error("failed to build request: {message}")]
    Request { message: String },

    #[error("failed to read response: {message}")]
    Decode { message: String },

    #[error("an unknown error occurred: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Maps a non-success HTTP status to an error.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound,
            400..=499 => Self::Client {
                status,
                message: message.into(),
            },
            500..=599 => Self::Server { status },
            _ => Self::Unexpected {
                message: format!("unexpected status {status}: {}", message.into()),
            },
        }
    }

    /// Transport failure before any response arrived.
    #[must_use]
    pub fn no_response(message: impl Into<String>) -> Self {
        Self::NoResponse {
            message: message.into(),
        }
    }

    /// Request could not be built or sent.
    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    /// Response body could not be decoded.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Any other failure.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether trying again later might succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::NoResponse { .. })
    }

    /// Returns true for a 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
