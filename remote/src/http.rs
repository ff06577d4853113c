// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and status handling.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};

use crate::error::RemoteError;

/// HTTP client shared by the remote adapters.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    token: Option<String>,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        token: Option<String>,
    ) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, token })
    }

    /// Builds a request with authentication headers.
    pub fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, RemoteError> {
        let resp = req.send().await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let url = resp.url().path().to_string();
        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        match status {
            StatusCode::NOT_FOUND => Err(RemoteError::NotFound(url)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(RemoteError::Auth(format!("{status}: {text}")))
            }
            status => Err(RemoteError::Http(format!("{status}: {text}"))),
        }
    }
}

/// Appends percent-encoded path segments to `base`.
///
/// # Errors
///
/// Returns an error if `base` is not a valid absolute URL.
pub fn join_url(base: &str, segments: &[&str]) -> Result<Url, RemoteError> {
    let mut url = Url::parse(base)
        .map_err(|e| RemoteError::Config(format!("Invalid base URL `{base}`: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| RemoteError::Config(format!("Base URL cannot have a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
