// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil::{Date, DateTime, Time};
use jiff::{Span, ToSpan};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Default duration of a new event, in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Opaque, stable identifier of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A stored calendar event, the anchor of zero or more occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, assigned at creation.
    pub id: EventId,

    /// Display name, never blank.
    pub name: String,

    /// The anchor date, which is also the first occurrence.
    pub date: Date,

    /// Wall-clock time shared by every occurrence.
    #[serde(with = "crate::datetime::serde_hhmm")]
    pub time: Time,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub color_tag: ColorTag,

    #[serde(default = "default_duration")]
    pub duration_minutes: u32,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub reminder: Reminder,

    #[serde(default)]
    pub repeat: Repeat,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

impl Event {
    /// Creates a one-off event with a fresh id and default attributes.
    pub fn new(name: impl Into<String>, date: Date, time: Time) -> Self {
        Self {
            id: EventId::generate(),
            name: name.into(),
            date,
            time,
            location: None,
            color_tag: ColorTag::default(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            description: None,
            reminder: Reminder::default(),
            repeat: Repeat::default(),
        }
    }

    /// Whether this event has an occurrence on `day`.
    pub fn occurs_on(&self, day: Date) -> bool {
        crate::recurrence::occurs_on(self, day)
    }

    /// The start of the occurrence on `day`.
    pub fn start_on(&self, day: Date) -> DateTime {
        day.to_datetime(self.time)
    }

    /// The end of the occurrence on `day`, `None` on overflow.
    pub fn end_on(&self, day: Date) -> Option<DateTime> {
        let minutes = i64::from(self.duration_minutes);
        self.start_on(day).checked_add(minutes.minutes()).ok()
    }

    /// The instant the reminder fires for the occurrence on `day`.
    pub fn reminder_at(&self, day: Date) -> Option<DateTime> {
        let offset = self.reminder.offset()?;
        self.start_on(day).checked_sub(offset).ok()
    }
}

/// Colour label of an event. Styling belongs to the presentation layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ColorTag {
    #[default]
    Lime,
    Green,
    Orange,
    Amber,
    Yellow,
    Sky,
    Purple,
}

const COLOR_LIME: &str = "lime";
const COLOR_GREEN: &str = "green";
const COLOR_ORANGE: &str = "orange";
const COLOR_AMBER: &str = "amber";
const COLOR_YELLOW: &str = "yellow";
const COLOR_SKY: &str = "sky";
const COLOR_PURPLE: &str = "purple";

impl ColorTag {
    pub const ALL: [ColorTag; 7] = [
        ColorTag::Lime,
        ColorTag::Green,
        ColorTag::Orange,
        ColorTag::Amber,
        ColorTag::Yellow,
        ColorTag::Sky,
        ColorTag::Purple,
    ];
}

impl AsRef<str> for ColorTag {
    fn as_ref(&self) -> &str {
        match self {
            ColorTag::Lime => COLOR_LIME,
            ColorTag::Green => COLOR_GREEN,
            ColorTag::Orange => COLOR_ORANGE,
            ColorTag::Amber => COLOR_AMBER,
            ColorTag::Yellow => COLOR_YELLOW,
            ColorTag::Sky => COLOR_SKY,
            ColorTag::Purple => COLOR_PURPLE,
        }
    }
}

impl Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for ColorTag {
    type Err = ();

    /// Accepts the bare name or a legacy style class such as `bg-lime-400`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        let name = match value.strip_prefix("bg-") {
            Some(rest) => rest.split('-').next().unwrap_or_default(),
            None => value.as_str(),
        };
        match name {
            COLOR_LIME => Ok(ColorTag::Lime),
            COLOR_GREEN => Ok(ColorTag::Green),
            COLOR_ORANGE => Ok(ColorTag::Orange),
            COLOR_AMBER => Ok(ColorTag::Amber),
            COLOR_YELLOW => Ok(ColorTag::Yellow),
            COLOR_SKY => Ok(ColorTag::Sky),
            COLOR_PURPLE => Ok(ColorTag::Purple),
            _ => Err(()),
        }
    }
}

impl Serialize for ColorTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_ref())
    }
}

impl<'de> Deserialize<'de> for ColorTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|()| de::Error::custom(format!("unknown color tag `{s}`")))
    }
}

/// Recurrence rule of an event. One rule per event, no exceptions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Repeat {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

const REPEAT_NONE: &str = "none";
const REPEAT_DAILY: &str = "daily";
const REPEAT_WEEKLY: &str = "weekly";
const REPEAT_MONTHLY: &str = "monthly";
const REPEAT_YEARLY: &str = "yearly";

impl Repeat {
    pub fn is_recurring(self) -> bool {
        self != Repeat::None
    }
}

impl AsRef<str> for Repeat {
    fn as_ref(&self) -> &str {
        match self {
            Repeat::None => REPEAT_NONE,
            Repeat::Daily => REPEAT_DAILY,
            Repeat::Weekly => REPEAT_WEEKLY,
            Repeat::Monthly => REPEAT_MONTHLY,
            Repeat::Yearly => REPEAT_YEARLY,
        }
    }
}

impl Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Repeat {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            REPEAT_NONE => Ok(Repeat::None),
            REPEAT_DAILY => Ok(Repeat::Daily),
            REPEAT_WEEKLY => Ok(Repeat::Weekly),
            REPEAT_MONTHLY => Ok(Repeat::Monthly),
            REPEAT_YEARLY => Ok(Repeat::Yearly),
            _ => Err(()),
        }
    }
}

/// Unit of a reminder lead time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ReminderKind {
    #[default]
    None,
    Minutes,
    Hours,
    Days,
}

const REMINDER_NONE: &str = "none";
const REMINDER_MINUTES: &str = "minutes";
const REMINDER_HOURS: &str = "hours";
const REMINDER_DAYS: &str = "days";

impl AsRef<str> for ReminderKind {
    fn as_ref(&self) -> &str {
        match self {
            ReminderKind::None => REMINDER_NONE,
            ReminderKind::Minutes => REMINDER_MINUTES,
            ReminderKind::Hours => REMINDER_HOURS,
            ReminderKind::Days => REMINDER_DAYS,
        }
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for ReminderKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            REMINDER_NONE => Ok(ReminderKind::None),
            REMINDER_MINUTES => Ok(ReminderKind::Minutes),
            REMINDER_HOURS => Ok(ReminderKind::Hours),
            REMINDER_DAYS => Ok(ReminderKind::Days),
            _ => Err(()),
        }
    }
}

/// Lead time of a reminder before each occurrence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reminder {
    pub kind: ReminderKind,
    pub value: u32,
}

impl Reminder {
    pub fn minutes(value: u32) -> Self {
        Self {
            kind: ReminderKind::Minutes,
            value,
        }
    }

    pub fn hours(value: u32) -> Self {
        Self {
            kind: ReminderKind::Hours,
            value,
        }
    }

    pub fn days(value: u32) -> Self {
        Self {
            kind: ReminderKind::Days,
            value,
        }
    }

    /// The lead time, or `None` when no reminder is set.
    pub fn offset(&self) -> Option<Span> {
        let value = i64::from(self.value);
        match self.kind {
            ReminderKind::None => None,
            ReminderKind::Minutes => Some(value.minutes()),
            ReminderKind::Hours => Some(value.hours()),
            ReminderKind::Days => Some(value.days()),
        }
    }
}

impl Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ReminderKind::None => write!(f, "{}", self.kind),
            kind => write!(f, "{} {}", self.value, kind),
        }
    }
}
