// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use lumina_core::User;
use reqwest::Method;

use crate::config::RemoteConfig;
use crate::error::RemoteError;
use crate::http::{HttpClient, join_url};

/// Account operations against the calendar server.
#[derive(Debug)]
pub struct AuthClient {
    http: HttpClient,
    base_url: String,
}

impl AuthClient {
    /// Creates an account client talking to `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or HTTP client creation fails.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        join_url(&config.base_url, &[])?;
        let http = HttpClient::new(
            config.timeout_secs,
            &config.user_agent,
            config.token.clone(),
        )?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Signs in and returns the account the server knows by `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the login.
    #[tracing::instrument(skip(self))]
    pub async fn login(&self, username: &str) -> Result<User, RemoteError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(RemoteError::Auth("username is empty".to_string()));
        }

        let url = join_url(&self.base_url, &["auth", "login"])?;
        let req = self
            .http
            .build_request(Method::POST, url)
            .json(&serde_json::json!({ "username": username }));
        let resp = self.http.execute(req).await?;
        let user: User = resp
            .json()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;
        tracing::debug!(id = %user.id, "signed in");
        Ok(user)
    }

    /// Ends the server session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), RemoteError> {
        let url = join_url(&self.base_url, &["auth", "logout"])?;
        self.http
            .execute(self.http.build_request(Method::POST, url))
            .await?;
        Ok(())
    }
}
