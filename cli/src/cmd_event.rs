// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use lumina_core::{DraftSession, Event, Occurrence};

use crate::app::App;
use crate::arg::{CommonArgs, EventFields, resolve_id};
use crate::event_formatter::{EventColumn, EventFormatter};
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub fields: EventFields,
    pub output_format: OutputFormat,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event")
            .args(EventFields::args(true))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            fields: EventFields::from(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let day = self.fields.date.unwrap_or_else(|| app.today());
        let mut session = DraftSession::new();
        self.fields
            .apply(session.open_day_at(day, app.config.core.default_time));

        let event = app.commit(&mut session).await?;
        print_event(&event, self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub fields: EventFields,
    pub output_format: OutputFormat,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event")
            .arg(CommonArgs::id())
            .args(EventFields::args(false))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: CommonArgs::get_id(matches),
            fields: EventFields::from(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let id = resolve_id(app.state.events().iter().map(|e| &e.id), &self.id)?;
        let Some(event) = app.state.event(&id) else {
            return Err(format!("Event not found: {id}").into());
        };

        if self.fields.is_empty() {
            println!("{}", "Nothing to change".italic());
            print_event(event, self.output_format);
            return Ok(());
        }

        let mut session = DraftSession::new();
        self.fields.apply(session.open_event(event));
        let event = app.commit(&mut session).await?;
        print_event(&event, self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event and all of its occurrences")
            .arg(CommonArgs::id())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: CommonArgs::get_id(matches),
        }
    }

    pub async fn run(self, app: &mut App) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        let id = resolve_id(app.state.events().iter().map(|e| &e.id), &self.id)?;
        let Some(event) = app.state.event(&id) else {
            return Err(format!("Event not found: {id}").into());
        };
        let name = event.name.clone();

        let mut session = DraftSession::new();
        session.open_event(event);
        app.delete(&mut session).await?;
        println!("Deleted {}", name.bold());
        Ok(())
    }
}

/// Prints an event as it occurs on its anchor date.
pub fn print_event(event: &Event, format: OutputFormat) {
    let columns = vec![
        EventColumn::Id { full: true },
        EventColumn::Date,
        EventColumn::TimeSpan,
        EventColumn::Name,
        EventColumn::Location,
        EventColumn::Repeat,
        EventColumn::Reminder,
    ];
    let occurrence = [Occurrence {
        day: event.date,
        event,
    }];
    let formatter = EventFormatter::new(columns, format);
    println!("{}", formatter.format(&occurrence));
}
