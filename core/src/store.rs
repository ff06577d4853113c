// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{Event, EventId, Namespace, StoreError};

/// Canonical set of events, partitioned by namespace.
///
/// Implementations keep events in insertion order; an upsert of a known id
/// replaces the event in place. Deleting an unknown id succeeds.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Every event of `namespace`, in insertion order.
    async fn fetch_events(&self, namespace: &Namespace) -> Result<Vec<Event>, StoreError>;

    /// Inserts `event`, or replaces the event with the same id.
    async fn upsert(&self, namespace: &Namespace, event: &Event) -> Result<(), StoreError>;

    /// Removes the event with `id`, if any.
    async fn delete(&self, namespace: &Namespace, id: &EventId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: EventStore + ?Sized> EventStore for Arc<S> {
    async fn fetch_events(&self, namespace: &Namespace) -> Result<Vec<Event>, StoreError> {
        (**self).fetch_events(namespace).await
    }

    async fn upsert(&self, namespace: &Namespace, event: &Event) -> Result<(), StoreError> {
        (**self).upsert(namespace, event).await
    }

    async fn delete(&self, namespace: &Namespace, id: &EventId) -> Result<(), StoreError> {
        (**self).delete(namespace, id).await
    }
}

/// Applies an upsert to an in-memory list with store semantics.
pub fn upsert_in_place(events: &mut Vec<Event>, event: Event) {
    match events.iter_mut().find(|e| e.id == event.id) {
        Some(existing) => *existing = event,
        None => events.push(event),
    }
}

/// Applies a delete to an in-memory list with store semantics.
pub fn remove_by_id(events: &mut Vec<Event>, id: &EventId) {
    events.retain(|e| &e.id != id);
}

/// In-process event store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    namespaces: Mutex<HashMap<Namespace, Vec<Event>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn fetch_events(&self, namespace: &Namespace) -> Result<Vec<Event>, StoreError> {
        let namespaces = self.namespaces.lock().await;
        Ok(namespaces.get(namespace).cloned().unwrap_or_default())
    }

    async fn upsert(&self, namespace: &Namespace, event: &Event) -> Result<(), StoreError> {
        let mut namespaces = self.namespaces.lock().await;
        let events = namespaces.entry(namespace.clone()).or_default();
        upsert_in_place(events, event.clone());
        Ok(())
    }

    async fn delete(&self, namespace: &Namespace, id: &EventId) -> Result<(), StoreError> {
        let mut namespaces = self.namespaces.lock().await;
        if let Some(events) = namespaces.get_mut(namespace) {
            remove_by_id(events, id);
        }
        Ok(())
    }
}

/// Sends guest events to the local store and user events to the remote one.
///
/// Without a remote store, user namespaces are kept locally as well.
#[derive(Clone)]
pub struct RoutedStore {
    local: Arc<dyn EventStore>,
    remote: Option<Arc<dyn EventStore>>,
}

impl RoutedStore {
    pub fn new(local: Arc<dyn EventStore>, remote: Option<Arc<dyn EventStore>>) -> Self {
        Self { local, remote }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    fn route(&self, namespace: &Namespace) -> &dyn EventStore {
        match (namespace, &self.remote) {
            (Namespace::User(_), Some(remote)) => remote.as_ref(),
            _ => self.local.as_ref(),
        }
    }
}

impl std::fmt::Debug for RoutedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutedStore")
            .field("remote", &self.remote.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl EventStore for RoutedStore {
    async fn fetch_events(&self, namespace: &Namespace) -> Result<Vec<Event>, StoreError> {
        self.route(namespace).fetch_events(namespace).await
    }

    async fn upsert(&self, namespace: &Namespace, event: &Event) -> Result<(), StoreError> {
        self.route(namespace).upsert(namespace, event).await
    }

    async fn delete(&self, namespace: &Namespace, id: &EventId) -> Result<(), StoreError> {
        self.route(namespace).delete(namespace, id).await
    }
}
