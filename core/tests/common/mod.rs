// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - A scriptable event store for sync scenarios
//! - Temporary directory management with auto-cleanup

mod fixtures;
mod stores;
mod temp_dir;

#[allow(unused_imports)]
pub use fixtures::{event, names, recurring};
#[allow(unused_imports)]
pub use stores::ScriptedStore;
#[allow(unused_imports)]
pub use temp_dir::setup_temp_dirs;
