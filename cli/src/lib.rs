// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of Lumina.

mod app;
mod arg;
mod cli;
mod cmd_auth;
mod cmd_day;
mod cmd_event;
mod cmd_extract;
mod cmd_month;
mod cmd_profile;
mod config;
mod event_formatter;
mod grid_formatter;
mod table;
mod util;

pub use crate::app::App;
pub use crate::cli::{Cli, Commands, run};
pub use crate::config::{Config, parse_config};
