// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgMatches, arg, value_parser};
use jiff::civil::{Date, Time};
use lumina_core::{ColorTag, EventDraft, EventId, Reminder, Repeat, parse_reminder};

use crate::util::{OutputFormat, parse_date, parse_time};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    pub fn id() -> Arg {
        arg!(id: <ID> "The id of the event, or a unique prefix of it")
    }

    pub fn get_id(matches: &ArgMatches) -> String {
        matches.get_one::<String>("id").cloned().unwrap_or_default()
    }
}

/// Event fields given on the command line; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub name: Option<String>,
    pub date: Option<Date>,
    pub time: Option<Time>,
    pub location: Option<String>,
    pub color: Option<ColorTag>,
    pub duration: Option<u32>,
    pub description: Option<String>,
    pub reminder: Option<Reminder>,
    pub repeat: Option<Repeat>,
}

impl EventFields {
    pub fn args(name_required: bool) -> Vec<Arg> {
        vec![
            arg!(-n --name <NAME> "Name of the event").required(name_required),
            arg!(-d --date <DATE> "Date of the event, YYYY-MM-DD").value_parser(parse_date),
            arg!(-t --time <TIME> "Start time of the event, HH:MM").value_parser(parse_time),
            arg!(-l --location <LOCATION> "Where the event takes place"),
            arg!(--color <COLOR> "Color tag of the event").value_parser(value_parser!(ColorTag)),
            arg!(--duration <MINUTES> "Duration in minutes")
                .value_parser(value_parser!(u32).range(1..)),
            arg!(--description <DESCRIPTION> "Description of the event"),
            arg!(-r --remind <BEFORE> "Reminder before the start, e.g. 15m, 2h, 1d or none")
                .value_parser(parse_reminder),
            arg!(--repeat <REPEAT> "Repeat rule of the event").value_parser(value_parser!(Repeat)),
        ]
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: matches.get_one("name").cloned(),
            date: matches.get_one("date").copied(),
            time: matches.get_one("time").copied(),
            location: matches.get_one("location").cloned(),
            color: matches.get_one("color").copied(),
            duration: matches.get_one("duration").copied(),
            description: matches.get_one("description").cloned(),
            reminder: matches.get_one("remind").copied(),
            repeat: matches.get_one("repeat").copied(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes the given fields into `draft`. An empty location or description
    /// clears it.
    pub fn apply(self, draft: &mut EventDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(date) = self.date {
            draft.date = Some(date);
        }
        if let Some(time) = self.time {
            draft.time = Some(time);
        }
        if let Some(location) = self.location {
            draft.location = (!location.trim().is_empty()).then_some(location);
        }
        if let Some(color) = self.color {
            draft.color_tag = Some(color);
        }
        if let Some(duration) = self.duration {
            draft.duration_minutes = Some(duration);
        }
        if let Some(description) = self.description {
            draft.description = (!description.trim().is_empty()).then_some(description);
        }
        if let Some(reminder) = self.reminder {
            draft.reminder = Some(reminder);
        }
        if let Some(repeat) = self.repeat {
            draft.repeat = Some(repeat);
        }
    }
}

/// Finds the event whose id is `id` or uniquely starts with it.
pub fn resolve_id<'a>(
    ids: impl IntoIterator<Item = &'a EventId>,
    id: &str,
) -> Result<EventId, String> {
    let mut found = None;
    for candidate in ids {
        if candidate.as_str() == id {
            return Ok(candidate.clone());
        } else if candidate.as_str().starts_with(id) {
            if found.is_some() {
                return Err(format!("Event id `{id}` is ambiguous"));
            }
            found = Some(candidate.clone());
        }
    }
    found.ok_or_else(|| format!("Event not found: {id}"))
}
