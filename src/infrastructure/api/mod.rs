//! Blog data API client.

mod client;

pub use client::{DEFAULT_API_BASE, JsonPlaceholderClient};
