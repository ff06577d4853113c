// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::ToSpan;
use jiff::civil::{Date, Weekday};

use crate::Event;
use crate::recurrence::{Occurrence, occurrences_in_range};

/// Number of cells in a month grid, six weeks of seven days.
pub const GRID_CELLS: usize = 42;

/// Default number of occurrences shown in a cell before `+N` overflow.
pub const DEFAULT_CELL_LIMIT: usize = 2;

/// First day of the displayed week.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// The first weekday of a row.
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sunday,
            WeekStart::Monday => Weekday::Monday,
        }
    }

    /// Column of `weekday` in a row, from 0.
    pub fn column(self, weekday: Weekday) -> i8 {
        match self {
            WeekStart::Sunday => weekday.to_sunday_zero_offset(),
            WeekStart::Monday => weekday.to_monday_zero_offset(),
        }
    }

    /// The seven weekdays of a row, in display order.
    pub fn weekdays(self) -> impl Iterator<Item = Weekday> {
        self.weekday().cycle_forward().take(7)
    }
}

/// A displayed month, navigable independently of any grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first: Date,
}

impl MonthCursor {
    /// Earliest month whose whole grid is representable.
    pub const MIN: MonthCursor = MonthCursor {
        first: Date::constant(-9999, 2, 1),
    };

    /// Latest month whose whole grid is representable.
    pub const MAX: MonthCursor = MonthCursor {
        first: Date::constant(9999, 11, 1),
    };

    /// The month `year-month`, `None` when it is not a month or its grid
    /// would leave the supported date range.
    pub fn new(year: i16, month: i8) -> Option<Self> {
        let first = Date::new(year, month, 1).ok()?;
        Self::from_first(first)
    }

    fn from_first(first: Date) -> Option<Self> {
        (Self::MIN.first..=Self::MAX.first)
            .contains(&first)
            .then_some(Self { first })
    }

    /// The month containing `today`, clamped to [`MIN`](Self::MIN) and
    /// [`MAX`](Self::MAX).
    pub fn today(today: Date) -> Self {
        Self {
            first: today
                .first_of_month()
                .clamp(Self::MIN.first, Self::MAX.first),
        }
    }

    pub fn year(&self) -> i16 {
        self.first.year()
    }

    pub fn month(&self) -> i8 {
        self.first.month()
    }

    pub fn first_day(&self) -> Date {
        self.first
    }

    pub fn last_day(&self) -> Date {
        self.first.last_of_month()
    }

    pub fn contains(&self, day: Date) -> bool {
        day.year() == self.year() && day.month() == self.month()
    }

    /// The following month; saturates at [`MAX`](Self::MAX).
    pub fn next(&self) -> Self {
        self.first
            .checked_add(1.month())
            .ok()
            .and_then(Self::from_first)
            .unwrap_or(*self)
    }

    /// The preceding month; saturates at [`MIN`](Self::MIN).
    pub fn prev(&self) -> Self {
        self.first
            .checked_sub(1.month())
            .ok()
            .and_then(Self::from_first)
            .unwrap_or(*self)
    }

    /// Jumps to `year-month`, `None` when out of range.
    pub fn jump(&self, year: i16, month: i8) -> Option<Self> {
        Self::new(year, month)
    }
}

impl Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthCursor {
    type Err = String;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("invalid month `{s}`, expected YYYY-MM"))?;
        let year: i16 = year
            .parse()
            .map_err(|_| format!("invalid year in `{s}`"))?;
        let month: i8 = month
            .parse()
            .map_err(|_| format!("invalid month in `{s}`"))?;
        Self::new(year, month).ok_or_else(|| format!("month out of range: `{s}`"))
    }
}

/// One day of a month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell<'a> {
    pub day: Date,
    pub in_month: bool,
    pub is_today: bool,

    /// Every occurrence on this day, in event order.
    pub occurrences: Vec<Occurrence<'a>>,
}

impl<'a> GridCell<'a> {
    /// At most `limit` occurrences for display, plus how many were left out.
    pub fn visible(&self, limit: usize) -> (&[Occurrence<'a>], usize) {
        let shown = self.occurrences.len().min(limit);
        (&self.occurrences[..shown], self.occurrences.len() - shown)
    }
}

/// A 6 × 7 grid of days for one month and the occurrences on each day.
#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    reference: MonthCursor,
    week_start: WeekStart,
    cells: Vec<GridCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// Lays out the grid for `reference`.
    ///
    /// The first cell is the `week_start` day on or before the first of the
    /// month, and the grid runs for [`GRID_CELLS`] consecutive days.
    #[tracing::instrument(skip(events), fields(events = events.len()))]
    pub fn build(
        reference: MonthCursor,
        events: &'a [Event],
        today: Date,
        week_start: WeekStart,
    ) -> Self {
        let first = reference.first_day();
        let lead = i64::from(week_start.column(first.weekday()));
        // in range for every month between MonthCursor::MIN and MonthCursor::MAX
        let start = first.saturating_sub(lead.days());
        let end = start.saturating_add((GRID_CELLS as i64 - 1).days());

        let mut occurrences = occurrences_in_range(events, start, end).into_iter().peekable();
        let mut cells = Vec::with_capacity(GRID_CELLS);
        for day in start.series(1.day()).take(GRID_CELLS) {
            let mut on_day = Vec::new();
            while let Some(occurrence) = occurrences.next_if(|o| o.day == day) {
                on_day.push(occurrence);
            }
            cells.push(GridCell {
                day,
                in_month: reference.contains(day),
                is_today: day == today,
                occurrences: on_day,
            });
        }

        tracing::debug!(month = %reference, start = %start, "built month grid");
        Self {
            reference,
            week_start,
            cells,
        }
    }

    pub fn reference(&self) -> MonthCursor {
        self.reference
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn cells(&self) -> &[GridCell<'a>] {
        &self.cells
    }

    /// Rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell<'a>]> {
        self.cells.chunks(7)
    }

    /// The cell for `day`, if it is on the grid.
    pub fn cell(&self, day: Date) -> Option<&GridCell<'a>> {
        self.cells.iter().find(|cell| cell.day == day)
    }

    /// Number of occurrences that fall inside the reference month.
    pub fn month_occurrence_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.in_month)
            .map(|cell| cell.occurrences.len())
            .sum()
    }
}
