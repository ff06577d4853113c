// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use lumina_core::User;

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmdProfile {
    pub quote: bool,
}

impl CmdProfile {
    pub const NAME: &str = "profile";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("whoami")
            .about("Show who is signed in and how many events they have")
            .arg(arg!(--"no-quote" "Skip the daily quote"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            quote: !matches.get_flag("no-quote"),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing profile...");
        let (name, badge) = profile_lines(app.state.user());
        println!("{}", name.bold());
        println!("{}", badge.green());

        let count = app.state.events().len();
        let moments = match count {
            1 => "1 moment captured".to_string(),
            n => format!("{n} moments captured"),
        };
        println!("{}", moments.italic());

        let gemini = app.gemini().ok();
        if let (true, Some(gemini)) = (self.quote, gemini) {
            let quote = gemini.daily_quote().await;
            println!();
            println!("{}", quote.en.yellow());
            println!("{}", quote.zh.yellow());
        }
        Ok(())
    }
}

/// Display name and badge of the current account.
fn profile_lines(user: Option<&User>) -> (String, String) {
    match user {
        Some(user) if user.premium => (user.username.clone(), "Cloud Synced · Premium".to_string()),
        Some(user) => (user.username.clone(), "Cloud Synced".to_string()),
        None => ("Traveler".to_string(), "Guest · local only".to_string()),
    }
}
