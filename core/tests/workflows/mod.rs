// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the lumina-core crate.
//!
//! These tests drive `CalendarState` through multi-step scenarios: queued
//! sync against scripted stores, account switches, and persistence on disk.

mod account;
mod persistence;
mod sync_queue;
