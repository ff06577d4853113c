// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Zoned;
use jiff::civil::{Date, Time};

/// NOTE: Used for storing and exchanging records, so it should be stable across different runs.
pub const STABLE_FORMAT_DATE: &str = "%Y-%m-%d";
pub const STABLE_FORMAT_TIME: &str = "%H:%M";

/// The current civil date on this machine.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    date.strftime(STABLE_FORMAT_DATE).to_string()
}

/// Formats a time as 24h `HH:mm`.
pub fn format_time(time: Time) -> String {
    time.strftime(STABLE_FORMAT_TIME).to_string()
}

/// Parses an ISO calendar date, `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<Date> {
    s.trim().parse().ok()
}

/// Parses a wall-clock time, `HH:mm` with an optional `:ss` suffix which is dropped.
pub fn parse_time(s: &str) -> Option<Time> {
    let mut parts = s.trim().splitn(3, ':');
    let hour: i8 = parts.next()?.trim().parse().ok()?;
    let minute: i8 = parts.next()?.trim().parse().ok()?;
    if let Some(second) = parts.next() {
        second.trim().parse::<i8>().ok()?;
    }
    Time::new(hour, minute, 0, 0).ok()
}

/// Serde adapter storing a [`Time`] as `HH:mm`.
pub mod serde_hhmm {
    use jiff::civil::Time;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &Time, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.strftime(super::STABLE_FORMAT_TIME))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Time, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid time `{s}`, expected HH:mm")))
    }
}
