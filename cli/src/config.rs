// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use lumina_core::{APP_NAME, Config as CoreConfig, get_config_dir};
use lumina_remote::{ExtractorConfig, RemoteConfig};
use tokio::fs;

const LUMINA_CONFIG_ENV: &str = "LUMINA_CONFIG";

/// Loads the configuration from `--config`, `LUMINA_CONFIG` or the default
/// location, in that order.
///
/// A missing file at the default location yields the defaults; an explicit
/// path must exist.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(LUMINA_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config file, using defaults");
            let mut config = Config::default();
            config.core.normalize()?;
            return Ok(config);
        }
        config
    };

    let mut config = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<Config>()?;
    config.core.normalize()?;
    Ok(config)
}

/// Configuration for the Lumina application.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub core: CoreConfig,

    /// Calendar server; without it every account is stored locally.
    pub remote: Option<RemoteConfig>,

    /// AI extraction service; required by `lumina extract`.
    pub extractor: Option<ExtractorConfig>,
}

impl FromStr for Config {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
