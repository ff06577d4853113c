// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};

use jiff::civil::{Date, Time};

use crate::{
    ColorTag, DEFAULT_DURATION_MINUTES, DraftError, Event, EventId, ExtractedEvent, Reminder,
    Repeat,
};

/// Time prefilled when a draft is opened on an empty day.
pub const DEFAULT_TIME: Time = Time::constant(9, 0, 0, 0);

/// A field that must be filled before a draft can be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Date,
    Time,
}

impl Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DraftField::Name => "name",
            DraftField::Date => "date",
            DraftField::Time => "time",
        })
    }
}

/// Draft for an event, every field still editable and possibly missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    /// Present when editing a stored event; commit keeps it.
    pub id: Option<EventId>,
    pub name: String,
    pub date: Option<Date>,
    pub time: Option<Time>,
    pub location: Option<String>,
    pub color_tag: Option<ColorTag>,
    pub duration_minutes: Option<u32>,
    pub description: Option<String>,
    pub reminder: Option<Reminder>,
    pub repeat: Option<Repeat>,
}

impl EventDraft {
    /// The first missing required field, if any.
    pub fn missing(&self) -> Option<DraftField> {
        if self.name.trim().is_empty() {
            Some(DraftField::Name)
        } else if self.date.is_none() {
            Some(DraftField::Date)
        } else if self.time.is_none() {
            Some(DraftField::Time)
        } else {
            None
        }
    }

    /// Turns the draft into an event, filling defaults for absent fields.
    pub fn into_event(self) -> Result<Event, DraftError> {
        if let Some(field) = self.missing() {
            return Err(DraftError::Missing(field));
        }
        let (Some(date), Some(time)) = (self.date, self.time) else {
            return Err(DraftError::Missing(DraftField::Date));
        };

        Ok(Event {
            id: self.id.unwrap_or_else(EventId::generate),
            name: self.name.trim().to_string(),
            date,
            time,
            location: non_blank(self.location),
            color_tag: self.color_tag.unwrap_or_default(),
            duration_minutes: self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
            description: non_blank(self.description),
            reminder: self.reminder.unwrap_or_default(),
            repeat: self.repeat.unwrap_or_default(),
        })
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            id: Some(event.id.clone()),
            name: event.name.clone(),
            date: Some(event.date),
            time: Some(event.time),
            location: event.location.clone(),
            color_tag: Some(event.color_tag),
            duration_minutes: Some(event.duration_minutes),
            description: event.description.clone(),
            reminder: Some(event.reminder),
            repeat: Some(event.repeat),
        }
    }
}

impl From<ExtractedEvent> for EventDraft {
    fn from(extracted: ExtractedEvent) -> Self {
        Self {
            id: None,
            name: extracted.name,
            date: Some(extracted.date),
            time: Some(extracted.time),
            location: extracted.location,
            color_tag: extracted.color,
            duration_minutes: extracted.duration_minutes,
            description: extracted.description,
            reminder: extracted.reminder,
            repeat: Some(extracted.repeat.unwrap_or_default()),
        }
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// Where an open draft came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOrigin {
    /// A blank draft opened on a day.
    Blank(Date),

    /// A stored event being edited.
    Existing(EventId),

    /// Fields recovered by an extractor.
    Extracted,
}

/// The single editable draft of the calendar.
///
/// A session is either closed or open with an origin. Opening a draft
/// replaces whatever was open. Committing or discarding closes the session;
/// a refused commit leaves it open so the fields can be corrected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftSession {
    state: Option<OpenDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenDraft {
    origin: DraftOrigin,
    draft: EventDraft,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a blank draft on `day` at the default time.
    pub fn open_day(&mut self, day: Date) -> &mut EventDraft {
        self.open_day_at(day, DEFAULT_TIME)
    }

    /// Opens a blank draft on `day` at `time`.
    pub fn open_day_at(&mut self, day: Date, time: Time) -> &mut EventDraft {
        self.open(
            DraftOrigin::Blank(day),
            EventDraft {
                date: Some(day),
                time: Some(time),
                color_tag: Some(ColorTag::Lime),
                repeat: Some(Repeat::None),
                ..Default::default()
            },
        )
    }

    /// Opens a draft prefilled with a stored event.
    pub fn open_event(&mut self, event: &Event) -> &mut EventDraft {
        self.open(DraftOrigin::Existing(event.id.clone()), event.into())
    }

    /// Opens a draft prefilled with extracted fields; never carries an id.
    pub fn open_extracted(&mut self, extracted: ExtractedEvent) -> &mut EventDraft {
        self.open(DraftOrigin::Extracted, extracted.into())
    }

    fn open(&mut self, origin: DraftOrigin, draft: EventDraft) -> &mut EventDraft {
        tracing::debug!(?origin, "opening draft");
        &mut self.state.insert(OpenDraft { origin, draft }).draft
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn origin(&self) -> Option<&DraftOrigin> {
        self.state.as_ref().map(|open| &open.origin)
    }

    pub fn draft(&self) -> Option<&EventDraft> {
        self.state.as_ref().map(|open| &open.draft)
    }

    /// Edits the in-memory draft; nothing is stored until commit.
    pub fn draft_mut(&mut self) -> Option<&mut EventDraft> {
        self.state.as_mut().map(|open| &mut open.draft)
    }

    /// Validates and closes the draft, returning the event to store.
    pub fn commit(&mut self) -> Result<Event, DraftError> {
        let open = self.state.as_ref().ok_or(DraftError::NotOpen)?;
        if let Some(field) = open.draft.missing() {
            tracing::debug!(%field, "draft commit refused");
            return Err(DraftError::Missing(field));
        }

        match self.state.take() {
            Some(open) => open.draft.into_event(),
            None => Err(DraftError::NotOpen),
        }
    }

    /// Closes the draft without storing anything.
    pub fn discard(&mut self) {
        self.state = None;
    }

    /// Closes a draft of a stored event and returns the id to delete.
    pub fn delete_target(&mut self) -> Result<EventId, DraftError> {
        let open = self.state.as_ref().ok_or(DraftError::NotOpen)?;
        let DraftOrigin::Existing(id) = &open.origin else {
            return Err(DraftError::NotDeletable);
        };

        let id = id.clone();
        self.state = None;
        Ok(id)
    }
}
