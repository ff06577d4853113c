// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use colored::Color;
use jiff::civil::{Date, Time, Weekday};
use lumina_core::{ColorTag, MonthCursor, datetime};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

pub fn parse_date(s: &str) -> Result<Date, String> {
    datetime::parse_date(s.trim())
        .ok_or_else(|| format!("Invalid date `{s}`. Expected format: YYYY-MM-DD"))
}

pub fn parse_time(s: &str) -> Result<Time, String> {
    datetime::parse_time(s.trim()).ok_or_else(|| format!("Invalid time `{s}`. Expected format: HH:MM"))
}

pub fn parse_month(s: &str) -> Result<MonthCursor, String> {
    s.trim().parse()
}

/// Terminal color for a color tag.
pub fn color_of(tag: ColorTag) -> Color {
    match tag {
        ColorTag::Lime => Color::BrightGreen,
        ColorTag::Green => Color::Green,
        ColorTag::Orange => Color::TrueColor {
            r: 251,
            g: 146,
            b: 60,
        },
        ColorTag::Amber => Color::TrueColor {
            r: 251,
            g: 191,
            b: 36,
        },
        ColorTag::Yellow => Color::BrightYellow,
        ColorTag::Sky => Color::BrightCyan,
        ColorTag::Purple => Color::Magenta,
    }
}

pub fn weekday_abbr(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

/// Cuts `s` to at most `width` terminal columns, ending with `…` when cut.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    } else if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Pads `s` with spaces on the right up to `width` terminal columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-03-10"), Ok(date(2025, 3, 10)));
        assert_eq!(parse_date(" 2025-03-10 "), Ok(date(2025, 3, 10)));
        assert!(parse_date("10/03/2025").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("07:30"), Ok(time(7, 30, 0, 0)));
        assert!(parse_time("7pm").is_err());
    }

    #[test]
    fn test_parse_month() {
        let month = parse_month("2025-02").unwrap();
        assert_eq!((month.year(), month.month()), (2025, 2));
        assert!(parse_month("2025-13").is_err());
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Dentist", 10), "Dentist");
        assert_eq!(truncate_to_width("Team standup", 8), "Team st…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        let s = "中文会议安排";
        let out = truncate_to_width(s, 7);
        assert_eq!(out, "中文会…");
        assert!(out.width() <= 7);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("中", 4), "中  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
    }
}
