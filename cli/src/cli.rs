// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use lumina_core::APP_NAME;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::cmd_auth::{CmdLogin, CmdLogout};
use crate::cmd_day::CmdDay;
use crate::cmd_event::{CmdEventDelete, CmdEventEdit, CmdEventNew};
use crate::cmd_extract::CmdExtract;
use crate::cmd_month::CmdMonth;
use crate::cmd_profile::CmdProfile;
use crate::config::parse_config;

/// Run the Lumina command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Lumina - a personal calendar for the moments that matter")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to month
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $LUMINA_CONFIG, then to \
$XDG_CONFIG_HOME/lumina/config.toml on Linux and MacOS, %LOCALAPPDATA%/lumina/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdMonth::command())
            .subcommand(CmdDay::command())
            .subcommand(CmdEventNew::command())
            .subcommand(CmdEventEdit::command())
            .subcommand(CmdEventDelete::command())
            .subcommand(CmdExtract::command())
            .subcommand(CmdLogin::command())
            .subcommand(CmdLogout::command())
            .subcommand(CmdProfile::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdMonth::NAME, matches)) => Month(CmdMonth::from(matches)),
            Some((CmdDay::NAME, matches)) => Day(CmdDay::from(matches)),
            Some((CmdEventNew::NAME, matches)) => New(CmdEventNew::from(matches)),
            Some((CmdEventEdit::NAME, matches)) => Edit(CmdEventEdit::from(matches)),
            Some((CmdEventDelete::NAME, matches)) => Delete(CmdEventDelete::from(matches)),
            Some((CmdExtract::NAME, matches)) => Extract(CmdExtract::from(matches)),
            Some((CmdLogin::NAME, matches)) => Login(CmdLogin::from(matches)),
            Some((CmdLogout::NAME, matches)) => Logout(CmdLogout::from(matches)),
            Some((CmdProfile::NAME, matches)) => Profile(CmdProfile::from(matches)),
            None => Month(CmdMonth::default()),
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the month grid
    Month(CmdMonth),

    /// List the events of a day
    Day(CmdDay),

    /// Add a new event
    New(CmdEventNew),

    /// Edit an event
    Edit(CmdEventEdit),

    /// Delete an event
    Delete(CmdEventDelete),

    /// Create an event from a photo, a transcript or a description
    Extract(CmdExtract),

    /// Sign in
    Login(CmdLogin),

    /// Sign out
    Logout(CmdLogout),

    /// Show the current account
    Profile(CmdProfile),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Month(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            Day(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            New(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            Edit(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            Delete(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
            Extract(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            Login(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            Logout(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
            Profile(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut App) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let mut app = App::open(config).await?;

        let result = f(&mut app).await;
        app.close().await?;
        result
    }
}
