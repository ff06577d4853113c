// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, sync::Arc};

use jiff::civil::Date;
use lumina_core::{
    CalendarState, DraftSession, Event, EventStore, Extractor, LocalStore, ProcessingGate,
    RoutedStore, SessionFile, SyncTicket, User, datetime,
};
use lumina_remote::{AuthClient, GeminiExtractor, RemoteStore};

use crate::config::Config;

/// Everything a command needs: configuration, the calendar state and the
/// remote collaborators.
#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub state: CalendarState,
    local: LocalStore,
    session: Option<SessionFile>,
    auth: Option<AuthClient>,
    gate: ProcessingGate,
}

impl App {
    /// Opens the stores and restores the saved session.
    #[tracing::instrument(skip(config))]
    pub async fn open(config: Config) -> Result<Self, Box<dyn Error>> {
        let state_dir = config.core.state_dir.clone();
        let local = LocalStore::open(state_dir.as_deref()).await?;

        let (remote, auth) = match &config.remote {
            Some(remote) => (
                Some(Arc::new(RemoteStore::new(remote)?) as Arc<dyn EventStore>),
                Some(AuthClient::new(remote)?),
            ),
            None => (None, None),
        };
        let store = Arc::new(RoutedStore::new(Arc::new(local.clone()), remote));

        let session = state_dir.as_deref().map(SessionFile::new);
        let user = match &session {
            Some(session) => session.load().await,
            None => None,
        };
        if let Some(user) = &user {
            tracing::debug!(user = %user.username, "restored session");
        }

        let state = CalendarState::load(store, config.core.sync_policy, user).await;
        Ok(Self {
            config,
            state,
            local,
            session,
            auth,
            gate: ProcessingGate::new(),
        })
    }

    pub fn today(&self) -> Date {
        datetime::today()
    }

    /// Commits the open draft and waits until the store has it.
    pub async fn commit(&mut self, draft: &mut DraftSession) -> Result<Event, Box<dyn Error>> {
        let (event, ticket) = self.state.commit_draft(draft)?;
        self.finish(ticket).await?;
        Ok(event)
    }

    /// Deletes the event the draft was opened from and waits for the store.
    pub async fn delete(&mut self, draft: &mut DraftSession) -> Result<(), Box<dyn Error>> {
        let ticket = self.state.delete_from_draft(draft)?;
        self.finish(ticket).await
    }

    async fn finish(&mut self, ticket: SyncTicket) -> Result<(), Box<dyn Error>> {
        let id = ticket.id().clone();
        let outcome = ticket.wait().await;
        self.state.settle().await?;
        outcome.map_err(|e| format!("Failed to sync event {id}: {e}").into())
    }

    /// Signs in through the calendar server, or as a local account when no
    /// server is configured.
    pub async fn login(&mut self, username: &str) -> Result<User, Box<dyn Error>> {
        let username = username.trim();
        if username.is_empty() {
            return Err("Username is required".into());
        }

        let user = match &self.auth {
            Some(auth) => auth.login(username).await?,
            None => User::local(username),
        };
        if let Some(session) = &self.session {
            session.save(&user).await?;
        }
        self.state.login(user.clone()).await;
        Ok(user)
    }

    /// Returns to the guest calendar; a failing server logout is only logged.
    pub async fn logout(&mut self) -> Result<(), Box<dyn Error>> {
        if let (Some(auth), Some(_)) = (&self.auth, self.state.user()) {
            if let Err(e) = auth.logout().await {
                tracing::warn!(err = %e, "server logout failed");
            }
        }
        if let Some(session) = &self.session {
            session.clear().await?;
        }
        self.state.logout().await;
        Ok(())
    }

    /// Guards extraction so only one runs at a time.
    pub fn gate(&self) -> &ProcessingGate {
        &self.gate
    }

    /// The configured extraction client.
    pub fn extractor(&self) -> Result<Box<dyn Extractor>, Box<dyn Error>> {
        Ok(Box::new(self.gemini()?))
    }

    pub fn gemini(&self) -> Result<GeminiExtractor, Box<dyn Error>> {
        let config = self
            .config
            .extractor
            .as_ref()
            .ok_or("No extractor configured, add an [extractor] section to the config")?;
        Ok(GeminiExtractor::new(config)?)
    }

    /// Waits for pending mutations and releases the stores.
    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        let Self {
            mut state, local, ..
        } = self;
        state.settle().await?;
        state.shutdown().await;
        local.close().await;
        Ok(())
    }
}
