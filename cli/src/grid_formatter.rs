// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::Colorize;
use lumina_core::{GridCell, MonthGrid};

use crate::util::{color_of, pad_to_width, truncate_to_width, weekday_abbr};

const DEFAULT_CELL_WIDTH: usize = 11;

/// Renders a month grid as a seven-column calendar.
#[derive(Debug, Clone, Copy)]
pub struct GridFormatter {
    cell_limit: usize,
    cell_width: usize,
}

impl GridFormatter {
    pub fn new(cell_limit: usize) -> Self {
        Self {
            cell_limit,
            cell_width: DEFAULT_CELL_WIDTH,
        }
    }

    #[cfg(test)]
    fn with_cell_width(mut self, cell_width: usize) -> Self {
        self.cell_width = cell_width;
        self
    }

    pub fn format<'a>(&'a self, grid: &'a MonthGrid<'a>) -> Display<'a> {
        Display {
            grid,
            formatter: self,
        }
    }

    fn day_label(&self, cell: &GridCell<'_>) -> String {
        let label = pad_to_width(&format!("{:>2}", cell.day.day()), self.cell_width);
        if cell.is_today {
            label.reversed().bold().to_string()
        } else if !cell.in_month {
            label.dimmed().to_string()
        } else {
            label
        }
    }

    fn name_line(&self, cell: &GridCell<'_>, index: usize) -> String {
        let (visible, _) = cell.visible(self.cell_limit);
        match visible.get(index) {
            Some(occurrence) => {
                let name = truncate_to_width(&occurrence.event.name, self.cell_width);
                pad_to_width(&name, self.cell_width)
                    .color(color_of(occurrence.event.color_tag))
                    .to_string()
            }
            None => " ".repeat(self.cell_width),
        }
    }

    fn overflow_line(&self, cell: &GridCell<'_>) -> String {
        match cell.visible(self.cell_limit) {
            (_, 0) => " ".repeat(self.cell_width),
            (_, overflow) => {
                let label = truncate_to_width(&format!("+{overflow} more"), self.cell_width);
                pad_to_width(&label, self.cell_width).italic().to_string()
            }
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    grid: &'a MonthGrid<'a>,
    formatter: &'a GridFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatter = self.formatter;
        let total = formatter.cell_width * 7 + 6;

        let title = self.grid.reference().first_day().strftime("%B %Y").to_string();
        let title = format!("{title:^total$}");
        writeln!(f, "{}", title.trim_end().bold())?;

        let header: Vec<String> = self
            .grid
            .week_start()
            .weekdays()
            .map(|w| pad_to_width(weekday_abbr(w), formatter.cell_width))
            .collect();
        write!(f, "{}", header.join(" ").bold())?;

        for week in self.grid.weeks() {
            writeln!(f)?;
            let days: Vec<_> = week.iter().map(|c| formatter.day_label(c)).collect();
            write!(f, "{}", days.join(" "))?;

            for i in 0..formatter.cell_limit {
                let names: Vec<_> = week.iter().map(|c| formatter.name_line(c, i)).collect();
                write!(f, "\n{}", names.join(" "))?;
            }

            if week.iter().any(|c| c.visible(formatter.cell_limit).1 > 0) {
                let more: Vec<_> = week.iter().map(|c| formatter.overflow_line(c)).collect();
                write!(f, "\n{}", more.join(" "))?;
            }
        }
        Ok(())
    }
}
