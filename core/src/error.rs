// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::draft::DraftField;

/// Errors raised by an event store.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// SQLite layer error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A record could not be serialized for storage.
    #[error("failed to encode event {id}: {source}")]
    Encode {
        /// Id of the offending event.
        id: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// The store path is not usable.
    #[error("invalid store path: {0}")]
    InvalidPath(String),

    /// A remote store rejected or failed the request.
    #[error("remote store error: {0}")]
    Remote(String),
}

/// Errors raised while committing or deleting through a draft.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// No draft is open.
    #[error("no draft is open")]
    NotOpen,

    /// A required field is empty.
    #[error("{0} is required")]
    Missing(DraftField),

    /// Only drafts opened from a stored event can be deleted.
    #[error("only an existing event can be deleted")]
    NotDeletable,
}

/// Errors raised by an extraction collaborator.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Another extraction is still in flight.
    #[error("an extraction is already in progress")]
    Busy,

    /// The source could not be prepared for upload.
    #[error("unreadable source: {0}")]
    Source(String),

    /// The collaborator could not be reached or answered with an error.
    #[error("extraction request failed: {0}")]
    Request(String),

    /// The collaborator answered with something that is not an event.
    #[error("malformed extraction result: {0}")]
    Malformed(String),
}

/// Errors raised by the sync coordinator.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The background sync worker has stopped.
    #[error("sync worker is not running")]
    WorkerStopped,

    /// The draft could not be committed or deleted.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// The store rejected the mutation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while loading the configuration.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configured path could not be expanded.
    #[error("invalid path: {0}")]
    Path(String),

    /// A platform directory could not be determined.
    #[error("{0} not found")]
    MissingDir(&'static str),
}
