// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

use crate::util::pad_to_width;

/// A column of a table over rows of type `T`.
pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

pub trait TableStyle {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result;
}

/// Renders rows through a [`TableStyle`].
#[derive(Debug)]
pub struct Table<'a, S, T, C> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S, T, C> Table<'a, S, T, C> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S: TableStyle, T, C: TableColumn<T>> fmt::Display for Table<'_, S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.style.write(f, self.columns, self.data)
    }
}

/// Space-separated columns, padded to the widest cell.
#[derive(Debug, Clone, Copy)]
pub struct TableStyleBasic {
    separator: &'static str,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self { separator: " " }
    }
}

impl TableStyle for TableStyleBasic {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let table: Vec<Vec<Cow<'_, str>>> = data
            .iter()
            .map(|row| columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let mut widths = vec![0; columns.len()];
        for cells in &table {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.width());
            }
        }

        for (i, (cells, row)) in table.iter().zip(data).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, ((col, cell), width)) in columns.iter().zip(cells).zip(&widths).enumerate() {
                let last = j + 1 == columns.len();
                let cell = match col.padding_direction() {
                    PaddingDirection::Left if last => cell.to_string(), // nothing to align after it
                    PaddingDirection::Left => pad_to_width(cell, *width),
                    PaddingDirection::Right => {
                        format!("{}{cell}", " ".repeat(width.saturating_sub(cell.width())))
                    }
                };
                match col.color(row) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => write!(f, "{cell}")?,
                }
                if !last {
                    write!(f, "{}", self.separator)?;
                }
            }
        }
        Ok(())
    }
}

/// One JSON object per row, keyed by column name.
#[derive(Debug, Clone, Copy)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn write<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let rows: Vec<serde_json::Value> = data
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| (col.name().into_owned(), col.format(row).into_owned().into()))
                    .collect::<serde_json::Map<_, _>>()
                    .into()
            })
            .collect();
        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}
