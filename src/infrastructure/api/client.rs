//! JSONPlaceholder HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::entities::{Comment, Post, PostId, User, UserId};
use crate::domain::errors::ApiError;
use crate::domain::ports::BlogDataPort;

/// Default API base.
pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("blogview/", env!("CARGO_PKG_VERSION"));

/// Blog data client for the JSONPlaceholder REST API.
#[derive(Debug, Clone)]
pub struct JsonPlaceholderClient {
    client: Client,
    base_url: String,
}

impl JsonPlaceholderClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates client with custom base URL and timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::request(format!("failed to create HTTP client: {e}")))?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Requesting blog data");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to reach blog API");
            if e.is_timeout() {
                ApiError::no_response("request timed out")
            } else if e.is_connect() || e.is_request() {
                ApiError::no_response(e.to_string())
            } else if e.is_builder() {
                ApiError::request(e.to_string())
            } else {
                ApiError::unexpected(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
            return Err(ApiError::from_status(status.as_u16(), reason));
        }

        response.json::<T>().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to parse blog API response");
            ApiError::decode(e.to_string())
        })
    }
}

#[async_trait]
impl BlogDataPort for JsonPlaceholderClient {
    async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.get_json("/posts").await
    }

    async fn fetch_post(&self, id: PostId) -> Result<Post, ApiError> {
        self.get_json(&format!("/posts/{id}")).await
    }

    async fn fetch_post_comments(&self, id: PostId) -> Result<Vec<Comment>, ApiError> {
        self.get_json(&format!("/posts/{id}/comments")).await
    }

    async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users").await
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, ApiError> {
        self.get_json(&format!("/users/{id}")).await
    }
}
