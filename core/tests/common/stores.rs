// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! A scriptable event store for sync scenarios.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use lumina_core::{Event, EventId, EventStore, MemoryStore, Namespace, StoreError};
use tokio::sync::Semaphore;

/// Memory-backed store that records every call, can be told to fail, and
/// can hold each call until a permit is released.
#[derive(Debug, Default)]
pub struct ScriptedStore {
    inner: MemoryStore,
    log: Mutex<Vec<String>>,
    failing: Mutex<HashSet<EventId>>,
    fail_fetch: AtomicBool,
    gate: Option<Arc<Semaphore>>,
}

#[allow(dead_code)]
impl ScriptedStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mutation waits for one permit of `gate`.
    #[must_use]
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Mutations of `id` fail from now on.
    pub fn fail_on(&self, id: &EventId) {
        self.failing.lock().expect("lock poisoned").insert(id.clone());
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Calls seen so far, e.g. `upsert:Coffee`, `delete:<id>`, `fetch:guest`.
    #[must_use]
    pub fn log(&self) -> Vec<String> {
        self.log.lock().expect("lock poisoned").clone()
    }

    /// Seeds `namespace` without going through the log.
    pub async fn seed(&self, namespace: &Namespace, events: &[Event]) {
        for event in events {
            self.inner
                .upsert(namespace, event)
                .await
                .expect("memory store never fails");
        }
    }

    fn record(&self, entry: String) {
        self.log.lock().expect("lock poisoned").push(entry);
    }

    fn check(&self, id: &EventId) -> Result<(), StoreError> {
        if self.failing.lock().expect("lock poisoned").contains(id) {
            Err(StoreError::Remote(format!("scripted failure for {id}")))
        } else {
            Ok(())
        }
    }

    async fn pass_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
    }
}

#[async_trait]
impl EventStore for ScriptedStore {
    async fn fetch_events(&self, namespace: &Namespace) -> Result<Vec<Event>, StoreError> {
        self.record(format!("fetch:{namespace}"));
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(StoreError::Remote("scripted fetch failure".to_string()));
        }
        self.inner.fetch_events(namespace).await
    }

    async fn upsert(&self, namespace: &Namespace, event: &Event) -> Result<(), StoreError> {
        self.pass_gate().await;
        self.record(format!("upsert:{}", event.name));
        self.check(&event.id)?;
        self.inner.upsert(namespace, event).await
    }

    async fn delete(&self, namespace: &Namespace, id: &EventId) -> Result<(), StoreError> {
        self.pass_gate().await;
        self.record(format!("delete:{id}"));
        self.check(id)?;
        self.inner.delete(namespace, id).await
    }
}
