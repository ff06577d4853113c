// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;

use crate::app::App;

#[derive(Debug, Clone)]
pub struct CmdLogin {
    pub username: String,
}

impl CmdLogin {
    pub const NAME: &str = "login";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Sign in and switch to your own calendar")
            .arg(arg!(<USERNAME> "Name of the account"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            username: matches
                .get_one::<String>("USERNAME")
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(username = %self.username, "signing in...");
        let user = app.login(&self.username).await?;
        let count = app.state.events().len();
        println!(
            "Signed in as {}, {count} event(s) in your calendar",
            user.username.bold()
        );
        if user.premium {
            println!("{}", "Premium".yellow().bold());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdLogout;

impl CmdLogout {
    pub const NAME: &str = "logout";

    pub fn command() -> Command {
        Command::new(Self::NAME).about("Sign out and return to the guest calendar")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!("signing out...");
        let Some(user) = app.state.user().map(|u| u.username.clone()) else {
            println!("{}", "Not signed in".italic());
            return Ok(());
        };

        app.logout().await?;
        println!("Signed out {}", user.bold());
        Ok(())
    }
}
