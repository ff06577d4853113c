// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::{Path, PathBuf};

use crate::User;

/// File name of the persisted session inside the state directory.
pub const SESSION_FILENAME: &str = "session.json";

/// The logged-in user, persisted between runs.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(SESSION_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved user; a missing or malformed file means a guest session.
    pub async fn load(&self) -> Option<User> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), err = %e, "failed to read session");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), err = %e, "malformed session, continuing as guest");
                None
            }
        }
    }

    pub async fn save(&self, user: &User) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(user).map_err(io::Error::other)?;
        tokio::fs::write(&self.path, content).await?;
        tracing::debug!(user = %user.username, "session saved");
        Ok(())
    }

    pub async fn clear(&self) -> io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
