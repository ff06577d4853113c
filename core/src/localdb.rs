// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod events;

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::localdb::events::{EventRecord, Events};
use crate::{Event, EventId, EventStore, Namespace, StoreError};

/// File name of the database inside the state directory.
pub const DB_FILENAME: &str = "lumina.db";

/// Event store backed by a local SQLite database.
#[derive(Debug, Clone)]
pub struct LocalStore {
    pool: SqlitePool,
    events: Events,
}

impl LocalStore {
    /// Opens the database in `state_dir`, creating it when missing.
    /// If `state_dir` is `None`, it opens an in-memory database.
    pub async fn open(state_dir: Option<&Path>) -> Result<Self, StoreError> {
        let (options, pool_options) = if let Some(dir) = state_dir {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| StoreError::InvalidPath(format!("{}: {e}", dir.display())))?;

            let filename = dir.join(DB_FILENAME);
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            let options = SqliteConnectOptions::new()
                .filename(&filename)
                .create_if_missing(true);
            (options, SqlitePoolOptions::new())
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            // every connection to `:memory:` is a fresh database, so keep exactly one alive
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
            (SqliteConnectOptions::new().in_memory(true), pool_options)
        };

        let pool = pool_options.connect_with(options).await?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await?;

        let events = Events::new(pool.clone());
        Ok(Self { pool, events })
    }

    pub async fn close(self) {
        tracing::debug!("closing database connection");
        self.pool.close().await;
    }
}

#[async_trait]
impl EventStore for LocalStore {
    #[tracing::instrument(skip(self))]
    async fn fetch_events(&self, namespace: &Namespace) -> Result<Vec<Event>, StoreError> {
        let records = self.events.list(&namespace.key()).await?;

        let mut events = Vec::with_capacity(records.len());
        for record in &records {
            match record.to_event() {
                Ok(event) => events.push(event),
                Err(err) => {
                    tracing::warn!(id = record.id(), %err, "malformed event record, discarding namespace");
                    return Ok(Vec::new());
                }
            }
        }

        tracing::debug!(count = events.len(), "loaded events");
        Ok(events)
    }

    #[tracing::instrument(skip(self, event), fields(id = %event.id))]
    async fn upsert(&self, namespace: &Namespace, event: &Event) -> Result<(), StoreError> {
        let record = EventRecord::from_event(&namespace.key(), event)?;
        self.events.upsert(&record).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, namespace: &Namespace, id: &EventId) -> Result<(), StoreError> {
        if !self.events.delete(&namespace.key(), id.as_str()).await? {
            tracing::debug!("event not found, nothing to delete");
        }
        Ok(())
    }
}
