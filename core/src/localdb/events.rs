// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;

use crate::{Event, StoreError};

#[derive(Debug, Clone)]
pub struct Events {
    pool: SqlitePool,
}

impl Events {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a record, or replaces it in place keeping its position.
    pub async fn upsert(&self, record: &EventRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO events (namespace, id, record)
VALUES (?, ?, ?)
ON CONFLICT(namespace, id) DO UPDATE SET
    record = excluded.record;
";

        sqlx::query(SQL)
            .bind(&record.namespace)
            .bind(&record.id)
            .bind(&record.record)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Records of a namespace in insertion order.
    pub async fn list(&self, namespace: &str) -> Result<Vec<EventRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT namespace, id, record
FROM events
WHERE namespace = ?
ORDER BY seq ASC;
";

        sqlx::query_as(SQL)
            .bind(namespace)
            .fetch_all(&self.pool)
            .await
    }

    /// Returns whether a record was removed.
    pub async fn delete(&self, namespace: &str, id: &str) -> Result<bool, sqlx::Error> {
        const SQL: &str = "DELETE FROM events WHERE namespace = ? AND id = ?;";

        let result = sqlx::query(SQL)
            .bind(namespace)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[cfg(test)]
    pub async fn insert_raw(&self, namespace: &str, id: &str, record: &str) -> Result<(), sqlx::Error> {
        self.upsert(&EventRecord {
            namespace: namespace.to_string(),
            id: id.to_string(),
            record: record.to_string(),
        })
        .await
    }
}

/// One stored event: its JSON record keyed by namespace and id.
#[derive(Debug, sqlx::FromRow)]
pub struct EventRecord {
    namespace: String,
    id: String,
    record: String,
}

impl EventRecord {
    pub fn from_event(namespace: &str, event: &Event) -> Result<Self, StoreError> {
        let record = serde_json::to_string(event).map_err(|source| StoreError::Encode {
            id: event.id.to_string(),
            source,
        })?;

        Ok(Self {
            namespace: namespace.to_string(),
            id: event.id.to_string(),
            record,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn to_event(&self) -> Result<Event, serde_json::Error> {
        serde_json::from_str(&self.record)
    }
}
