// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use lumina_core::{MonthCursor, MonthGrid};

use crate::app::App;
use crate::grid_formatter::GridFormatter;
use crate::util::parse_month;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CmdMonth {
    pub month: Option<MonthCursor>,
    /// Months to move from `month`, -1 for `--prev` and 1 for `--next`.
    pub shift: i8,
}

impl CmdMonth {
    pub const NAME: &str = "month";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("m")
            .about("Show the month grid")
            .arg(arg!([MONTH] "Month to show, YYYY-MM, defaults to this month").value_parser(parse_month))
            .arg(arg!(--next "Show the month after").conflicts_with("prev"))
            .arg(arg!(--prev "Show the month before"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let shift = match (matches.get_flag("next"), matches.get_flag("prev")) {
            (true, _) => 1,
            (_, true) => -1,
            _ => 0,
        };
        Self {
            month: matches.get_one("MONTH").copied(),
            shift,
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing month...");
        let today = app.today();
        let mut cursor = self.month.unwrap_or_else(|| MonthCursor::today(today));
        cursor = match self.shift {
            1 => cursor.next(),
            -1 => cursor.prev(),
            _ => cursor,
        };

        let grid = MonthGrid::build(
            cursor,
            app.state.events(),
            today,
            app.config.core.week_start,
        );
        let formatter = GridFormatter::new(app.config.core.cell_limit);
        println!("{}", formatter.format(&grid));
        println!();

        let count = grid.month_occurrence_count();
        let summary = match count {
            0 => "No events this month".to_string(),
            1 => "1 event this month".to_string(),
            n => format!("{n} events this month"),
        };
        println!("{}", summary.italic());
        if app.state.is_syncing() {
            println!("{}", "Syncing...".yellow());
        }
        Ok(())
    }
}
