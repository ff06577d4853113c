// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Materialization of recurring events into per-day occurrences.
//!
//! Each [`Event`] carries at most one [`Repeat`] rule anchored at its date.
//! Occurrences are never stored; they are computed on demand for whatever
//! range is being displayed. Range queries test every day against every
//! event, so cost grows with `days × events`.

use jiff::ToSpan;
use jiff::civil::Date;

use crate::{Event, Repeat};

/// Longest gap between two occurrences of any rule (a Feb 29 yearly anchor).
const MAX_OCCURRENCE_GAP_DAYS: usize = 4 * 366 + 1;

/// An event materialized on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub day: Date,
    pub event: &'a Event,
}

/// Whether `event` has an occurrence on `day`.
///
/// The anchor date always matches. Before the anchor nothing matches. After
/// it, monthly rules match the same day-of-month without rolling over into
/// shorter months, and yearly rules match the same month and day, so a Feb 29
/// anchor only recurs in leap years.
pub fn occurs_on(event: &Event, day: Date) -> bool {
    let anchor = event.date;
    if day == anchor {
        return true;
    } else if day < anchor {
        return false;
    }

    match event.repeat {
        Repeat::None => false,
        Repeat::Daily => true,
        Repeat::Weekly => day.weekday() == anchor.weekday(),
        Repeat::Monthly => day.day() == anchor.day(),
        Repeat::Yearly => day.month() == anchor.month() && day.day() == anchor.day(),
    }
}

/// Every occurrence in the inclusive range `start..=end`, ordered by day and
/// then by the order of `events`. An inverted range yields nothing.
pub fn occurrences_in_range(events: &[Event], start: Date, end: Date) -> Vec<Occurrence<'_>> {
    if start > end {
        return Vec::new();
    }

    start
        .series(1.day())
        .take_while(|day| *day <= end)
        .flat_map(|day| occurrences_on(events, day))
        .collect()
}

/// Occurrences on a single day, in the order of `events`.
pub fn occurrences_on(events: &[Event], day: Date) -> impl Iterator<Item = Occurrence<'_>> {
    events
        .iter()
        .filter(move |event| occurs_on(event, day))
        .map(move |event| Occurrence { day, event })
}

/// The first occurrence on or after `from`.
pub fn next_occurrence(event: &Event, from: Date) -> Option<Date> {
    if from <= event.date {
        return Some(event.date);
    } else if !event.repeat.is_recurring() {
        return None;
    }

    from.series(1.day())
        .take(MAX_OCCURRENCE_GAP_DAYS + 1)
        .find(|day| occurs_on(event, *day))
}
