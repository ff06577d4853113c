// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use jiff::civil::{Date, Time};
use serde_json::{Map, Value};

use crate::datetime::{parse_date, parse_time};
use crate::{ColorTag, ExtractError, Reminder, ReminderKind, Repeat};

/// Input handed to an extraction collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractSource {
    /// A photo of a poster, ticket, screenshot and so on.
    Image { bytes: Vec<u8>, mime: String },

    /// A voice note already converted to text.
    Transcript(String),

    /// A short free-form description.
    Text(String),
}

impl ExtractSource {
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractSource::Image { .. } => "image",
            ExtractSource::Transcript(_) => "transcript",
            ExtractSource::Text(_) => "text",
        }
    }
}

/// Event fields recovered by an extractor.
///
/// Name, date and time are always present; everything else is whatever the
/// collaborator returned in a usable shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEvent {
    pub name: String,
    pub date: Date,
    pub time: Time,
    pub location: Option<String>,
    pub color: Option<ColorTag>,
    pub duration_minutes: Option<u32>,
    pub description: Option<String>,
    pub reminder: Option<Reminder>,
    pub repeat: Option<Repeat>,
}

impl ExtractedEvent {
    /// Parses the JSON text answered by a model.
    ///
    /// Markdown code fences around the payload are tolerated. Text that is not
    /// JSON at all is an error; JSON that lacks a name, a date or a time is
    /// `Ok(None)`.
    pub fn from_json(text: &str) -> Result<Option<Self>, ExtractError> {
        let payload = strip_code_fence(text);
        if payload.is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(payload)
            .map_err(|e| ExtractError::Malformed(format!("not a JSON document: {e}")))?;
        Ok(Self::from_value(&value))
    }

    /// Picks the fields out of a JSON object, or the first object of an array.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Array(items) => items.iter().find_map(Value::as_object)?,
            _ => return None,
        };

        let name = string_field(obj, "name")?;
        let date = string_field(obj, "date").and_then(|s| parse_date(&s))?;
        let time = string_field(obj, "time").and_then(|s| parse_time(&s))?;

        let reminder = string_field(obj, "reminderType")
            .and_then(|s| s.parse::<ReminderKind>().ok())
            .map(|kind| match kind {
                ReminderKind::None => Reminder::default(),
                kind => Reminder {
                    kind,
                    value: number_field(obj, "reminderValue").unwrap_or(0),
                },
            });

        Some(Self {
            name,
            date,
            time,
            location: string_field(obj, "location"),
            color: string_field(obj, "color").and_then(|s| s.parse().ok()),
            duration_minutes: number_field(obj, "duration"),
            description: string_field(obj, "description"),
            reminder,
            repeat: string_field(obj, "repeat").and_then(|s| s.parse().ok()),
        })
    }
}

fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    match text.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => text,
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let s = obj.get(key)?.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn number_field(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    match obj.get(key)? {
        Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).ok(),
            None => n
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
                .map(|v| v.round() as u32),
        },
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Turns a photo, transcript or description into event fields.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// `today` is the temporal reference for relative phrases such as
    /// "next Friday". `Ok(None)` means nothing usable was found.
    async fn extract(
        &self,
        source: ExtractSource,
        today: Date,
    ) -> Result<Option<ExtractedEvent>, ExtractError>;
}

/// Admits at most one extraction at a time.
#[derive(Debug, Clone, Default)]
pub struct ProcessingGate {
    busy: Arc<AtomicBool>,
}

impl ProcessingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a guard while nothing else is in flight, `None` otherwise.
    pub fn try_begin(&self) -> Option<ProcessingGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ProcessingGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_processing(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Runs one extraction behind the gate.
    #[tracing::instrument(skip(self, extractor, source), fields(source = source.kind()))]
    pub async fn run(
        &self,
        extractor: &dyn Extractor,
        source: ExtractSource,
        today: Date,
    ) -> Result<Option<ExtractedEvent>, ExtractError> {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("extraction rejected, another one is in flight");
            return Err(ExtractError::Busy);
        };

        let result = extractor.extract(source, today).await;
        match &result {
            Ok(Some(event)) => tracing::debug!(name = %event.name, date = %event.date, "extracted event"),
            Ok(None) => tracing::debug!("extraction found no event"),
            Err(e) => tracing::warn!(err = %e, "extraction failed"),
        }
        result
    }
}

/// Marks an extraction in flight until dropped.
#[derive(Debug)]
pub struct ProcessingGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
