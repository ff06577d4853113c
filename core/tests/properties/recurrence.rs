// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::civil::date;
use lumina_core::Repeat;
use lumina_core::recurrence::{occurrences_in_range, occurs_on};

use crate::common::recurring;

const ALL_RULES: [Repeat; 5] = [
    Repeat::None,
    Repeat::Daily,
    Repeat::Weekly,
    Repeat::Monthly,
    Repeat::Yearly,
];

#[test]
fn recurrence_anchor_is_first_occurrence() {
    for anchor in [date(2024, 1, 31), date(2024, 2, 29), date(2025, 7, 15)] {
        for repeat in ALL_RULES {
            // Arrange
            let event = recurring("e", anchor, repeat);

            // Act
            let before = occurrences_in_range(
                std::slice::from_ref(&event),
                anchor.saturating_sub(2.years()),
                anchor.yesterday().unwrap(),
            );

            // Assert
            assert!(occurs_on(&event, anchor), "{repeat} at {anchor}");
            assert!(before.is_empty(), "{repeat} before {anchor}");
        }
    }
}

#[test]
fn recurrence_without_rule_occurs_once() {
    let anchor = date(2025, 3, 10);
    let events = vec![recurring("once", anchor, Repeat::None)];

    let occurrences = occurrences_in_range(&events, date(2024, 1, 1), date(2026, 12, 31));

    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].day, anchor);
}

#[test]
fn recurrence_weekly_keeps_weekday() {
    let anchor = date(2025, 3, 4);
    let events = vec![recurring("weekly", anchor, Repeat::Weekly)];

    let occurrences = occurrences_in_range(&events, anchor, anchor.saturating_add(69.days()));

    assert_eq!(occurrences.len(), 10);
    for (n, occurrence) in occurrences.iter().enumerate() {
        let expected = anchor.saturating_add((7 * n as i64).days());
        assert_eq!(occurrence.day, expected);
        assert_eq!(occurrence.day.weekday(), anchor.weekday());
    }
}

#[test]
fn recurrence_monthly_skips_short_months() {
    let events = vec![recurring("payday", date(2024, 1, 31), Repeat::Monthly)];

    let february = occurrences_in_range(&events, date(2024, 2, 1), date(2024, 2, 29));
    let april = occurrences_in_range(&events, date(2024, 4, 1), date(2024, 4, 30));
    let year: Vec<_> = occurrences_in_range(&events, date(2024, 1, 1), date(2024, 12, 31))
        .iter()
        .map(|o| o.day.month())
        .collect();

    assert!(february.is_empty());
    assert!(april.is_empty());
    assert_eq!(year, vec![1, 3, 5, 7, 8, 10, 12]);
}

#[test]
fn recurrence_yearly_leap_day_only_in_leap_years() {
    let event = recurring("leap", date(2024, 2, 29), Repeat::Yearly);

    assert!(!occurs_on(&event, date(2025, 2, 28)));
    assert!(!occurs_on(&event, date(2025, 3, 1)));
    assert!(occurs_on(&event, date(2028, 2, 29)));

    let events = vec![event];
    let days: Vec<_> = occurrences_in_range(&events, date(2024, 1, 1), date(2033, 12, 31))
        .iter()
        .map(|o| o.day.year())
        .collect();
    assert_eq!(days, vec![2024, 2028, 2032]);
}

#[test]
fn recurrence_daily_fills_every_day() {
    let events = vec![recurring("daily", date(2025, 1, 1), Repeat::Daily)];

    let occurrences = occurrences_in_range(&events, date(2024, 12, 25), date(2025, 12, 31));

    assert_eq!(occurrences.len(), 365);
}
