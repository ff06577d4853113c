// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::ToSpan;
use jiff::civil::date;
use lumina_core::{GRID_CELLS, MonthCursor, MonthGrid, Repeat, WeekStart};

use crate::common::recurring;

#[test]
fn grid_is_complete_for_every_month() {
    let today = date(2025, 6, 15);
    let mut cursor = MonthCursor::new(2023, 1).expect("valid month");
    for _ in 0..48 {
        for week_start in [WeekStart::Sunday, WeekStart::Monday] {
            // Act
            let grid = MonthGrid::build(cursor, &[], today, week_start);
            let cells = grid.cells();

            // Assert
            assert_eq!(cells.len(), GRID_CELLS, "{cursor}");
            assert_eq!(cells[0].day.weekday(), week_start.weekday(), "{cursor}");
            for pair in cells.windows(2) {
                assert_eq!(pair[0].day.tomorrow().unwrap(), pair[1].day);
            }

            let first = grid.cell(cursor.first_day()).expect("first day on grid");
            let last = grid.cell(cursor.last_day()).expect("last day on grid");
            assert!(first.in_month && last.in_month, "{cursor}");

            let in_month = cells.iter().filter(|c| c.in_month).count();
            assert_eq!(in_month, cursor.last_day().day() as usize, "{cursor}");
        }
        cursor = cursor.next();
    }
}

#[test]
fn grid_is_complete_at_both_ends_of_the_calendar() {
    let today = date(2025, 6, 15);
    for cursor in [MonthCursor::MIN, MonthCursor::MAX] {
        for week_start in [WeekStart::Sunday, WeekStart::Monday] {
            let grid = MonthGrid::build(cursor, &[], today, week_start);
            let cells = grid.cells();

            assert_eq!(cells.len(), GRID_CELLS, "{cursor}");
            assert_eq!(cells[0].day.weekday(), week_start.weekday(), "{cursor}");
            assert!(grid.cell(cursor.first_day()).is_some_and(|c| c.in_month));
            assert!(grid.cell(cursor.last_day()).is_some_and(|c| c.in_month));
        }
    }
}

#[test]
fn grid_marks_only_today() {
    let today = date(2025, 3, 18);
    let grid = MonthGrid::build(MonthCursor::today(today), &[], today, WeekStart::Sunday);

    let todays: Vec<_> = grid.cells().iter().filter(|c| c.is_today).collect();

    assert_eq!(todays.len(), 1);
    assert_eq!(todays[0].day, today);
}

#[test]
fn grid_shows_recurrences_in_neighbouring_months() {
    // Arrange
    let events = vec![recurring("daily", date(2025, 1, 1), Repeat::Daily)];
    let cursor = MonthCursor::new(2025, 3).expect("valid month");

    // Act
    let grid = MonthGrid::build(cursor, &events, date(2025, 3, 1), WeekStart::Sunday);

    // Assert
    assert!(grid.cells().iter().all(|c| c.occurrences.len() == 1));
    assert_eq!(grid.month_occurrence_count(), 31);
}

#[test]
fn grid_navigation_round_trips() {
    let start = MonthCursor::new(2025, 1).expect("valid month");
    let mut cursor = start;
    for _ in 0..25 {
        cursor = cursor.next();
    }
    assert_eq!(cursor.to_string(), "2027-02");
    for _ in 0..25 {
        cursor = cursor.prev();
    }
    assert_eq!(cursor, start);

    let today = date(2025, 8, 9);
    assert_eq!(MonthCursor::today(today).first_day(), today.saturating_sub(8.days()));
}
