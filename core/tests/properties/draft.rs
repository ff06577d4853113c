// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::{date, time};
use lumina_core::{
    ColorTag, DEFAULT_DURATION_MINUTES, DraftError, DraftField, DraftSession, ExtractedEvent,
    Reminder, ReminderKind, Repeat,
};

#[test]
fn draft_commit_fills_defaults() {
    // Arrange
    let mut session = DraftSession::new();
    let draft = session.open_day(date(2025, 3, 10));
    draft.name = "Coffee".to_string();
    draft.color_tag = None;
    draft.repeat = None;

    // Act
    let event = session.commit().expect("draft should commit");

    // Assert
    assert_eq!(event.name, "Coffee");
    assert_eq!(event.date, date(2025, 3, 10));
    assert_eq!(event.time, time(9, 0, 0, 0));
    assert_eq!(event.duration_minutes, DEFAULT_DURATION_MINUTES);
    assert_eq!(event.repeat, Repeat::None);
    assert_eq!(event.color_tag, ColorTag::Lime);
    assert_eq!(event.reminder.kind, ReminderKind::None);
    assert_eq!(event.reminder.value, 0);
    assert!(!event.id.as_str().is_empty());
}

#[test]
fn draft_commits_get_fresh_ids() {
    let mut session = DraftSession::new();
    session.open_day(date(2025, 3, 10)).name = "a".to_string();
    let a = session.commit().expect("commit a");
    session.open_day(date(2025, 3, 10)).name = "b".to_string();
    let b = session.commit().expect("commit b");

    assert_ne!(a.id, b.id);
}

#[test]
fn draft_reports_each_missing_field() {
    let mut session = DraftSession::new();

    let cases: [(&str, bool, bool, DraftField); 3] = [
        ("", true, true, DraftField::Name),
        ("x", false, true, DraftField::Date),
        ("x", true, false, DraftField::Time),
    ];
    for (name, has_date, has_time, field) in cases {
        let draft = session.open_day(date(2025, 3, 10));
        draft.name = name.to_string();
        if !has_date {
            draft.date = None;
        }
        if !has_time {
            draft.time = None;
        }

        assert_eq!(session.commit(), Err(DraftError::Missing(field)));
        assert!(session.is_open());
    }
}

#[test]
fn draft_from_extraction_keeps_extracted_fields() {
    let extracted = ExtractedEvent {
        name: "Flight".to_string(),
        date: date(2025, 9, 1),
        time: time(6, 45, 0, 0),
        location: Some("Gate 12".to_string()),
        color: Some(ColorTag::Sky),
        duration_minutes: Some(180),
        description: None,
        reminder: Some(Reminder::hours(3)),
        repeat: None,
    };

    let mut session = DraftSession::new();
    session.open_extracted(extracted);
    let event = session.commit().expect("extracted draft should commit");

    assert_eq!(event.location.as_deref(), Some("Gate 12"));
    assert_eq!(event.color_tag, ColorTag::Sky);
    assert_eq!(event.duration_minutes, 180);
    assert_eq!(event.reminder, Reminder::hours(3));
    assert_eq!(event.repeat, Repeat::None);
}
