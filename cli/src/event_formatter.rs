// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use lumina_core::datetime::{format_date, format_time};
use lumina_core::recurrence::next_occurrence;
use lumina_core::{Occurrence, ReminderKind, Repeat};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::{OutputFormat, color_of};

const SHORT_ID_LEN: usize = 8;

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(columns: Vec<EventColumn>, format: OutputFormat) -> Self {
        Self { columns, format }
    }

    pub fn format<'a>(&'a self, occurrences: &'a [Occurrence<'a>]) -> Display<'a> {
        Display {
            occurrences,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    occurrences: &'a [Occurrence<'a>],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.occurrences)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.occurrences)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    /// Event id, shortened unless `full`.
    Id { full: bool },
    Date,
    /// Start and end time of the occurrence.
    TimeSpan,
    Name,
    Location,
    Repeat,
    Reminder,
    /// Next occurrence strictly after the shown one, for recurring events.
    Next,
}

impl<'e> TableColumn<Occurrence<'e>> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Id { .. } => "id",
            EventColumn::Date => "date",
            EventColumn::TimeSpan => "time",
            EventColumn::Name => "name",
            EventColumn::Location => "location",
            EventColumn::Repeat => "repeat",
            EventColumn::Reminder => "reminder",
            EventColumn::Next => "next",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Occurrence<'e>) -> Cow<'a, str> {
        let event = data.event;
        match self {
            EventColumn::Id { full: true } => event.id.as_str().into(),
            EventColumn::Id { full: false } => {
                event.id.as_str().chars().take(SHORT_ID_LEN).collect::<String>().into()
            }
            EventColumn::Date => format_date(data.day).into(),
            EventColumn::TimeSpan => match event.end_on(data.day) {
                Some(end) if end.date() == data.day => {
                    format!("{}~{}", format_time(event.time), format_time(end.time())).into()
                }
                Some(end) => format!(
                    "{}~{} {}",
                    format_time(event.time),
                    format_date(end.date()),
                    format_time(end.time())
                )
                .into(),
                None => format_time(event.time).into(),
            },
            EventColumn::Name => event.name.as_str().into(),
            EventColumn::Location => event.location.as_deref().unwrap_or_default().into(),
            EventColumn::Repeat => match event.repeat {
                Repeat::None => "".into(),
                repeat => repeat.as_ref().to_string().into(),
            },
            EventColumn::Reminder => match event.reminder.kind {
                ReminderKind::None => "".into(),
                _ => format!("{} before", event.reminder).into(),
            },
            EventColumn::Next => match data.day.tomorrow() {
                Ok(from) if event.repeat.is_recurring() => next_occurrence(event, from)
                    .map(format_date)
                    .unwrap_or_default()
                    .into(),
                _ => "".into(),
            },
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, data: &Occurrence<'e>) -> Option<Color> {
        match self {
            EventColumn::Name => Some(color_of(data.event.color_tag)),
            _ => None,
        }
    }
}
