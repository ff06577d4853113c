// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use jiff::civil::Date;
use lumina_core::datetime::format_date;
use lumina_core::recurrence::occurrences_on;

use crate::app::App;
use crate::arg::CommonArgs;
use crate::event_formatter::{EventColumn, EventFormatter};
use crate::util::{OutputFormat, parse_date};

#[derive(Debug, Clone, Copy)]
pub struct CmdDay {
    pub date: Option<Date>,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdDay {
    pub const NAME: &str = "day";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("d")
            .about("List the events of a day")
            .arg(arg!([DATE] "Day to list, YYYY-MM-DD, defaults to today").value_parser(parse_date))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: matches.get_one("DATE").copied(),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events of day...");
        let day = self.date.unwrap_or_else(|| app.today());
        let mut occurrences: Vec<_> = occurrences_on(app.state.events(), day).collect();
        occurrences.sort_by_key(|o| (o.event.time, o.event.name.clone()));

        if occurrences.is_empty() && self.output_format == OutputFormat::Table {
            let line = format!("No events on {}", format_date(day));
            println!("{}", line.italic());
            return Ok(());
        }

        let formatter = EventFormatter::new(self.columns(), self.output_format);
        println!("{}", formatter.format(&occurrences));
        Ok(())
    }

    fn columns(&self) -> Vec<EventColumn> {
        let mut columns = vec![
            EventColumn::Id {
                full: self.verbose || self.output_format == OutputFormat::Json,
            },
            EventColumn::TimeSpan,
            EventColumn::Name,
            EventColumn::Location,
            EventColumn::Repeat,
        ];
        if self.verbose {
            columns.extend([EventColumn::Reminder, EventColumn::Next]);
        }
        columns
    }
}
