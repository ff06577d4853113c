// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP adapters for Lumina: a remote event store, an account client, and an
//! AI extraction client that turns photos and transcripts into events.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::single_match_else
)]

mod auth;
mod config;
mod error;
mod gemini;
mod http;
mod photo;
mod store;

pub use crate::auth::AuthClient;
pub use crate::config::{ExtractorConfig, RemoteConfig};
pub use crate::error::RemoteError;
pub use crate::gemini::{DailyQuote, GeminiExtractor};
pub use crate::photo::{JPEG_QUALITY, MAX_EDGE, prepare_image};
pub use crate::store::RemoteStore;
