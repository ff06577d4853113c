// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of Lumina, a personal calendar: events with a single recurrence
//! rule, month grids, event drafts, and synchronization with an event store.

mod config;
mod draft;
mod error;
mod event;
mod extract;
mod grid;
mod localdb;
mod session;
mod store;
mod sync;
mod user;

pub mod datetime;
pub mod recurrence;

pub use crate::config::{
    APP_NAME, Config, expand_path, get_config_dir, get_home_dir, get_state_dir, parse_reminder,
};
pub use crate::draft::{DEFAULT_TIME, DraftField, DraftOrigin, DraftSession, EventDraft};
pub use crate::error::{ConfigError, DraftError, ExtractError, StoreError, SyncError};
pub use crate::event::{
    ColorTag, DEFAULT_DURATION_MINUTES, Event, EventId, Reminder, ReminderKind, Repeat,
};
pub use crate::extract::{
    ExtractSource, ExtractedEvent, Extractor, ProcessingGate, ProcessingGuard,
};
pub use crate::grid::{
    DEFAULT_CELL_LIMIT, GRID_CELLS, GridCell, MonthCursor, MonthGrid, WeekStart,
};
pub use crate::localdb::{DB_FILENAME, LocalStore};
pub use crate::recurrence::Occurrence;
pub use crate::session::{SESSION_FILENAME, SessionFile};
pub use crate::store::{EventStore, MemoryStore, RoutedStore};
pub use crate::sync::{CalendarState, Mutation, SyncPolicy, SyncTicket};
pub use crate::user::{Namespace, User};
