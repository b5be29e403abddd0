//! Error types for the REST client.
//!
//! # Design
//! HTTP statuses never show up here; they travel in `ApiResponse`. What is
//! left are failures where no meaningful response exists.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL cannot address a REST collection.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// The request never produced an HTTP response (connect, timeout, I/O).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A success response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
