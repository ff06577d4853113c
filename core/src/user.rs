// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,

    #[serde(default, rename = "isPremium", alias = "premium")]
    pub premium: bool,

    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// A user known only to this machine, identified by its name.
    pub fn local(username: &str) -> Self {
        Self {
            id: username.to_string(),
            username: username.to_string(),
            email: format!("{username}@localhost"),
            premium: false,
            avatar: None,
        }
    }

    pub fn namespace(&self) -> Namespace {
        Namespace::User(self.id.clone())
    }
}

/// The partition of stored events a session reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    Guest,
    User(String),
}

impl Namespace {
    pub fn for_user(user: Option<&User>) -> Self {
        user.map_or(Namespace::Guest, User::namespace)
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Namespace::Guest)
    }

    /// Stable storage key, `guest` or `user:<id>`.
    pub fn key(&self) -> String {
        match self {
            Namespace::Guest => "guest".to_string(),
            Namespace::User(id) => format!("user:{id}"),
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
