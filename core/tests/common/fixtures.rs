// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use jiff::civil::{Date, time};
use lumina_core::{Event, Repeat};

/// Creates a one-off event at 09:00 on `date`.
#[must_use]
pub fn event(name: &str, date: Date) -> Event {
    Event::new(name, date, time(9, 0, 0, 0))
}

/// Creates a recurring event anchored at `date`.
#[must_use]
pub fn recurring(name: &str, date: Date, repeat: Repeat) -> Event {
    let mut event = event(name, date);
    event.repeat = repeat;
    event
}

/// Names of `events`, in order.
#[must_use]
pub fn names(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.name.as_str()).collect()
}
