// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Application state and its synchronization with an event store.
//!
//! [`CalendarState`] owns the in-memory event list. Every mutation is queued
//! to a single background worker which replays them against the store one
//! at a time, in the order they were issued. The syncing flag is derived
//! from the number of mutations still waiting for their round trip.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::store::{remove_by_id, upsert_in_place};
use crate::{
    DraftSession, Event, EventId, EventStore, Namespace, StoreError, SyncError, User,
};

/// When a mutation reaches the in-memory list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SyncPolicy {
    /// Apply immediately and keep the change even if the store rejects it.
    #[default]
    Optimistic,

    /// Apply only once the store accepted it.
    Confirm,
}

/// A change to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Upsert(Event),
    Delete(EventId),
}

impl Mutation {
    pub fn id(&self) -> &EventId {
        match self {
            Mutation::Upsert(event) => &event.id,
            Mutation::Delete(id) => id,
        }
    }

    fn apply(self, events: &mut Vec<Event>) {
        match self {
            Mutation::Upsert(event) => upsert_in_place(events, event),
            Mutation::Delete(id) => remove_by_id(events, &id),
        }
    }
}

struct Job {
    namespace: Namespace,
    mutation: Mutation,
    /// Report the outcome back for [`CalendarState::apply_completed`].
    confirm: bool,
    done: oneshot::Sender<Result<(), StoreError>>,
}

#[derive(Debug)]
struct Completed {
    namespace: Namespace,
    mutation: Mutation,
    succeeded: bool,
}

/// Handle to the store round trip of one mutation.
#[derive(Debug)]
pub struct SyncTicket {
    id: EventId,
    done: oneshot::Receiver<Result<(), StoreError>>,
}

impl SyncTicket {
    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// Waits for the store to accept or reject the mutation.
    pub async fn wait(self) -> Result<(), SyncError> {
        match self.done.await {
            Ok(result) => result.map_err(SyncError::from),
            Err(_) => Err(SyncError::WorkerStopped),
        }
    }
}

/// The calendar as seen by one user: who is logged in, their events, and
/// whether changes are still on their way to the store.
pub struct CalendarState {
    user: Option<User>,
    events: Vec<Event>,
    policy: SyncPolicy,
    store: Arc<dyn EventStore>,
    jobs: mpsc::UnboundedSender<Job>,
    completed: mpsc::UnboundedReceiver<Completed>,
    pending: Arc<watch::Sender<usize>>,
    worker: JoinHandle<()>,
}

impl CalendarState {
    /// Starts the sync worker with an empty guest calendar.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(store: Arc<dyn EventStore>, policy: SyncPolicy) -> Self {
        let (jobs_tx, jobs_rx) = mpsc::unbounded_channel();
        let (completed_tx, completed_rx) = mpsc::unbounded_channel();
        let pending = Arc::new(watch::Sender::new(0));
        let worker = tokio::spawn(run_worker(
            Arc::clone(&store),
            jobs_rx,
            completed_tx,
            Arc::clone(&pending),
        ));

        Self {
            user: None,
            events: Vec::new(),
            policy,
            store,
            jobs: jobs_tx,
            completed: completed_rx,
            pending,
            worker,
        }
    }

    /// Starts the sync worker and loads the events of `user`, or of the guest.
    pub async fn load(store: Arc<dyn EventStore>, policy: SyncPolicy, user: Option<User>) -> Self {
        let mut state = Self::new(store, policy);
        state.user = user;
        state.reload().await;
        state
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn namespace(&self) -> Namespace {
        Namespace::for_user(self.user.as_ref())
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    /// Mutations issued but not yet through their round trip.
    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    pub fn is_syncing(&self) -> bool {
        self.pending() > 0
    }

    /// Creates `event`, or replaces the event with the same id.
    pub fn upsert(&mut self, event: Event) -> Result<SyncTicket, SyncError> {
        self.issue(Mutation::Upsert(event))
    }

    /// Deletes the event with `id`; unknown ids are a no-op.
    pub fn delete(&mut self, id: &EventId) -> Result<SyncTicket, SyncError> {
        self.issue(Mutation::Delete(id.clone()))
    }

    /// Commits the open draft and stores the resulting event.
    pub fn commit_draft(
        &mut self,
        draft: &mut DraftSession,
    ) -> Result<(Event, SyncTicket), SyncError> {
        let event = draft.commit()?;
        let ticket = self.upsert(event.clone())?;
        Ok((event, ticket))
    }

    /// Deletes the stored event the open draft was opened from.
    pub fn delete_from_draft(&mut self, draft: &mut DraftSession) -> Result<SyncTicket, SyncError> {
        let id = draft.delete_target()?;
        self.delete(&id)
    }

    fn issue(&mut self, mutation: Mutation) -> Result<SyncTicket, SyncError> {
        let namespace = self.namespace();
        let id = mutation.id().clone();
        if self.policy == SyncPolicy::Optimistic {
            mutation.clone().apply(&mut self.events);
        }

        let (done_tx, done_rx) = oneshot::channel();
        let job = Job {
            namespace,
            mutation,
            confirm: self.policy == SyncPolicy::Confirm,
            done: done_tx,
        };

        self.pending.send_modify(|n| *n += 1);
        if self.jobs.send(job).is_err() {
            self.pending.send_modify(|n| *n = n.saturating_sub(1));
            tracing::error!(%id, "sync worker is gone, mutation dropped");
            return Err(SyncError::WorkerStopped);
        }

        tracing::debug!(%id, pending = self.pending(), "mutation queued");
        Ok(SyncTicket { id, done: done_rx })
    }

    /// Applies mutations the store has confirmed so far, without waiting.
    ///
    /// Only mutations issued under [`SyncPolicy::Confirm`] are reported
    /// back. Returns how many reached the in-memory list.
    pub fn apply_completed(&mut self) -> usize {
        let namespace = self.namespace();
        let mut applied = 0;
        while let Ok(completed) = self.completed.try_recv() {
            if !completed.succeeded {
                continue;
            } else if completed.namespace != namespace {
                tracing::debug!(id = %completed.mutation.id(), "confirmed mutation belongs to another namespace");
                continue;
            }

            completed.mutation.apply(&mut self.events);
            applied += 1;
        }
        applied
    }

    /// Waits until every issued mutation finished its round trip, then
    /// applies the confirmed ones.
    pub async fn settle(&mut self) -> Result<usize, SyncError> {
        let mut pending = self.pending.subscribe();
        pending
            .wait_for(|n| *n == 0)
            .await
            .map_err(|_| SyncError::WorkerStopped)?;
        Ok(self.apply_completed())
    }

    /// Switches to `user` and replaces the event list with theirs.
    #[tracing::instrument(skip(self, user), fields(user = %user.username))]
    pub async fn login(&mut self, user: User) {
        self.switch(Some(user)).await;
    }

    /// Returns to the guest calendar.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&mut self) {
        self.switch(None).await;
    }

    async fn switch(&mut self, user: Option<User>) {
        if let Err(e) = self.settle().await {
            tracing::warn!(err = %e, "pending mutations were not settled");
        }
        self.user = user;
        self.reload().await;
    }

    /// Replaces the event list with the store's copy; empty when the fetch fails.
    pub async fn reload(&mut self) {
        let namespace = self.namespace();
        self.events = match self.store.fetch_events(&namespace).await {
            Ok(events) => {
                tracing::debug!(%namespace, count = events.len(), "events loaded");
                events
            }
            Err(e) => {
                tracing::warn!(%namespace, err = %e, "failed to fetch events");
                Vec::new()
            }
        };
    }

    /// Lets queued mutations drain and stops the worker.
    pub async fn shutdown(self) {
        let Self { jobs, worker, .. } = self;
        drop(jobs);
        if let Err(e) = worker.await {
            tracing::error!(err = %e, "sync worker failed");
        }
    }
}

impl std::fmt::Debug for CalendarState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarState")
            .field("user", &self.user)
            .field("events", &self.events.len())
            .field("policy", &self.policy)
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

async fn run_worker(
    store: Arc<dyn EventStore>,
    mut jobs: mpsc::UnboundedReceiver<Job>,
    completed: mpsc::UnboundedSender<Completed>,
    pending: Arc<watch::Sender<usize>>,
) {
    tracing::debug!("sync worker started");
    while let Some(job) = jobs.recv().await {
        let Job {
            namespace,
            mutation,
            confirm,
            done,
        } = job;

        let result = match &mutation {
            Mutation::Upsert(event) => store.upsert(&namespace, event).await,
            Mutation::Delete(id) => store.delete(&namespace, id).await,
        };
        match &result {
            Ok(()) => tracing::debug!(id = %mutation.id(), %namespace, "mutation synced"),
            Err(e) => tracing::warn!(id = %mutation.id(), %namespace, err = %e, "mutation failed to sync"),
        }

        let succeeded = result.is_ok();
        // receivers may be gone when the caller does not care about the outcome
        let _ = done.send(result);
        if confirm {
            let _ = completed.send(Completed {
                namespace,
                mutation,
                succeeded,
            });
        }
        pending.send_modify(|n| *n = n.saturating_sub(1));
    }
    tracing::debug!("sync worker stopped");
}
