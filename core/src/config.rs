// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use jiff::civil::Time;

use crate::draft::DEFAULT_TIME;
use crate::grid::DEFAULT_CELL_LIMIT;
use crate::{ConfigError, Reminder, SyncPolicy, WeekStart};

/// The name of the application, used for config and state directories.
pub const APP_NAME: &str = "lumina";

/// Core settings, the `[core]` table of the config file.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for the local database and the session file.
    pub state_dir: Option<PathBuf>,

    /// First day of a displayed week.
    pub week_start: WeekStart,

    /// When local changes are applied relative to the remote round trip.
    pub sync_policy: SyncPolicy,

    /// Occurrences shown in a grid cell before the `+N` overflow.
    pub cell_limit: usize,

    /// Time prefilled when creating an event on a day.
    #[serde(with = "crate::datetime::serde_hhmm")]
    pub default_time: Time,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: None,
            week_start: WeekStart::default(),
            sync_policy: SyncPolicy::default(),
            cell_limit: DEFAULT_CELL_LIMIT,
            default_time: DEFAULT_TIME,
        }
    }
}

impl Config {
    /// Expands the state directory, falling back to the platform state home.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        match &self.state_dir {
            Some(dir) => self.state_dir = Some(expand_path(dir)?),
            None => match get_state_dir() {
                Ok(dir) => self.state_dir = Some(dir.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        }
        Ok(())
    }
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| ConfigError::Path(path.display().to_string()))?;

    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

pub fn get_home_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::MissingDir("user-specific home directory"))
}

pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or(ConfigError::MissingDir("user-specific config directory"))
}

pub fn get_state_dir() -> Result<PathBuf, ConfigError> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(not(unix))]
    let state_dir = dirs::data_local_dir();
    state_dir.ok_or(ConfigError::MissingDir("user-specific state directory"))
}

/// Parse a reminder lead time in the format "none" / "2d" / "3h" / "15m".
pub fn parse_reminder(s: &str) -> Result<Reminder, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("none") {
        return Ok(Reminder::default());
    }

    let parse = |rest: &str| -> Result<u32, String> {
        rest.trim()
            .parse()
            .map_err(|e| format!("Invalid reminder value `{s}`: {e}"))
    };
    if let Some(rest) = s.strip_suffix('d') {
        Ok(Reminder::days(parse(rest)?))
    } else if let Some(rest) = s.strip_suffix('h') {
        Ok(Reminder::hours(parse(rest)?))
    } else if let Some(rest) = s.strip_suffix('m') {
        Ok(Reminder::minutes(parse(rest)?))
    } else {
        Err(format!("Invalid reminder format: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use super::*;

    #[test]
    fn test_expand_path_home_env() {
        let home = get_home_dir().unwrap();
        let home_prefixes: &[&str] = if cfg!(unix) {
            &["~", "$HOME", "${HOME}"]
        } else {
            &[r"~", r"%UserProfile%"]
        };
        for prefix in home_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/lumina"))).unwrap();
            assert_eq!(result, home.join("lumina"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_absolute_and_relative() {
        let absolute = PathBuf::from("/var/lib/lumina");
        assert_eq!(expand_path(&absolute).unwrap(), absolute);

        let relative = PathBuf::from("state/lumina");
        assert_eq!(expand_path(&relative).unwrap(), relative);
    }

    #[test]
    fn test_config_defaults_from_empty_table() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert_eq!(config.sync_policy, SyncPolicy::Optimistic);
        assert_eq!(config.cell_limit, 2);
        assert_eq!(config.default_time, time(9, 0, 0, 0));
        assert_eq!(config.state_dir, None);
    }

    #[test]
    fn test_config_parses_all_fields() {
        const TOML: &str = r#"
state_dir = "/tmp/lumina"
week_start = "monday"
sync_policy = "confirm"
cell_limit = 3
default_time = "08:30"
"#;
        let config: Config = toml::from_str(TOML).unwrap();
        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/lumina")));
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.sync_policy, SyncPolicy::Confirm);
        assert_eq!(config.cell_limit, 3);
        assert_eq!(config.default_time, time(8, 30, 0, 0));
    }

    #[test]
    fn test_config_rejects_unknown_policy() {
        assert!(toml::from_str::<Config>(r#"sync_policy = "eventually""#).is_err());
    }

    #[test]
    fn test_normalize_keeps_absolute_state_dir() {
        let mut config = Config {
            state_dir: Some(PathBuf::from("/tmp/lumina")),
            ..Default::default()
        };
        config.normalize().unwrap();
        assert_eq!(config.state_dir, Some(PathBuf::from("/tmp/lumina")));
    }

    #[test]
    fn test_parse_reminder() {
        assert_eq!(parse_reminder("15m").unwrap(), Reminder::minutes(15));
        assert_eq!(parse_reminder("2h").unwrap(), Reminder::hours(2));
        assert_eq!(parse_reminder("1d").unwrap(), Reminder::days(1));
        assert_eq!(parse_reminder("none").unwrap(), Reminder::default());
        assert!(parse_reminder("10").is_err());
        assert!(parse_reminder("-5m").is_err());
        assert!(parse_reminder("xh").is_err());
    }
}
