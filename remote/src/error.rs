// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use lumina_core::{ExtractError, StoreError};

/// Remote service errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// HTTP layer error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication error.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid response from server.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Image decoding or encoding error.
    #[error("Image error: {0}")]
    Image(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<image::ImageError> for RemoteError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e.to_string())
    }
}

impl From<RemoteError> for StoreError {
    fn from(e: RemoteError) -> Self {
        StoreError::Remote(e.to_string())
    }
}

impl From<RemoteError> for ExtractError {
    fn from(e: RemoteError) -> Self {
        match e {
            RemoteError::Image(msg) => ExtractError::Source(msg),
            RemoteError::InvalidResponse(msg) => ExtractError::Malformed(msg),
            e => ExtractError::Request(e.to_string()),
        }
    }
}
