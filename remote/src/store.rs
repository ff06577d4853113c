// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use lumina_core::{Event, EventId, EventStore, Namespace, StoreError};
use reqwest::{Method, Url};

use crate::config::RemoteConfig;
use crate::error::RemoteError;
use crate::http::{HttpClient, join_url};

/// Event store backed by the calendar server.
///
/// Each account's events live under `/users/{id}/events`. The guest namespace
/// has no remote counterpart.
#[derive(Debug)]
pub struct RemoteStore {
    http: HttpClient,
    base_url: String,
}

impl RemoteStore {
    /// Creates a store talking to `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or HTTP client creation fails.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        join_url(&config.base_url, &[])?;
        let http = HttpClient::new(
            config.timeout_secs,
            &config.user_agent,
            config.token.clone(),
        )?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn events_url(&self, namespace: &Namespace) -> Result<Url, RemoteError> {
        join_url(&self.base_url, &["users", user_id(namespace)?, "events"])
    }

    fn event_url(&self, namespace: &Namespace, id: &EventId) -> Result<Url, RemoteError> {
        join_url(
            &self.base_url,
            &["users", user_id(namespace)?, "events", id.as_str()],
        )
    }

    async fn fetch(&self, namespace: &Namespace) -> Result<Vec<Event>, RemoteError> {
        let url = self.events_url(namespace)?;
        let resp = self
            .http
            .execute(self.http.build_request(Method::GET, url))
            .await?;
        let records: Vec<serde_json::Value> = resp
            .json()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;

        let mut events = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_value::<Event>(record) {
                Ok(event) => events.push(event),
                Err(err) => {
                    tracing::warn!(%namespace, %err, "malformed remote event, treating calendar as empty");
                    return Ok(Vec::new());
                }
            }
        }
        Ok(events)
    }

    async fn put(&self, namespace: &Namespace, event: &Event) -> Result<(), RemoteError> {
        let url = self.event_url(namespace, &event.id)?;
        let req = self.http.build_request(Method::PUT, url).json(event);
        self.http.execute(req).await?;
        Ok(())
    }

    async fn remove(&self, namespace: &Namespace, id: &EventId) -> Result<(), RemoteError> {
        let url = self.event_url(namespace, id)?;
        match self
            .http
            .execute(self.http.build_request(Method::DELETE, url))
            .await
        {
            Ok(_) => Ok(()),
            Err(RemoteError::NotFound(_)) => {
                tracing::debug!(%namespace, %id, "event already absent on server");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl EventStore for RemoteStore {
    #[tracing::instrument(skip(self))]
    async fn fetch_events(&self, namespace: &Namespace) -> Result<Vec<Event>, StoreError> {
        Ok(self.fetch(namespace).await?)
    }

    #[tracing::instrument(skip(self, event), fields(id = %event.id))]
    async fn upsert(&self, namespace: &Namespace, event: &Event) -> Result<(), StoreError> {
        Ok(self.put(namespace, event).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, namespace: &Namespace, id: &EventId) -> Result<(), StoreError> {
        Ok(self.remove(namespace, id).await?)
    }
}

fn user_id(namespace: &Namespace) -> Result<&str, RemoteError> {
    match namespace {
        Namespace::User(id) => Ok(id),
        Namespace::Guest => Err(RemoteError::Config(
            "guest calendar is not stored on the server".to_string(),
        )),
    }
}
