// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Remote calendar server configuration, the `[remote]` table.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the calendar API, e.g. `https://calendar.example.com/api`.
    pub base_url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: None,
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// AI extraction service configuration, the `[extractor]` table.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ExtractorConfig {
    /// API key of the generative language service.
    pub api_key: String,
    /// Model used for extraction.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the generative language service.
    #[serde(default = "default_extractor_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_extractor_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_extractor_url(),
            timeout_secs: default_extractor_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

const fn default_timeout() -> u64 {
    30
}

const fn default_extractor_timeout() -> u64 {
    60
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_extractor_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_user_agent() -> String {
    concat!("lumina-remote/", env!("CARGO_PKG_VERSION")).to_string()
}
