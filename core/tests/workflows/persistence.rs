// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Events and sessions survive a restart when a state directory is used.

use std::sync::Arc;

use jiff::civil::date;
use lumina_core::{
    CalendarState, DraftSession, EventStore, LocalStore, MemoryStore, Namespace, Repeat,
    RoutedStore, SessionFile, SyncPolicy, User,
};

use crate::common::{names, setup_temp_dirs};

#[tokio::test]
async fn committed_draft_survives_restart() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let local = Arc::new(LocalStore::open(Some(&temp_dirs.state_dir)).await.unwrap());
    let mut state = CalendarState::load(local.clone(), SyncPolicy::Optimistic, None).await;
    let mut draft = DraftSession::new();
    let fields = draft.open_day(date(2025, 3, 10));
    fields.name = "Coffee".to_string();
    fields.repeat = Some(Repeat::Weekly);

    // Act
    let (event, ticket) = state.commit_draft(&mut draft).unwrap();
    ticket.wait().await.unwrap();
    state.shutdown().await;
    drop(local);

    // Assert
    let reopened = Arc::new(LocalStore::open(Some(&temp_dirs.state_dir)).await.unwrap());
    let state = CalendarState::load(reopened, SyncPolicy::Optimistic, None).await;
    assert_eq!(state.events(), &[event]);
    assert!(state.events()[0].occurs_on(date(2025, 3, 17)));
}

#[tokio::test]
async fn session_restores_user_namespace() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let session = SessionFile::new(&temp_dirs.state_dir);
    let local = Arc::new(LocalStore::open(Some(&temp_dirs.state_dir)).await.unwrap());
    let remote = Arc::new(MemoryStore::new());
    let routed = Arc::new(RoutedStore::new(local.clone(), Some(remote.clone())));

    let mut state = CalendarState::load(routed.clone(), SyncPolicy::Optimistic, None).await;
    let mut draft = DraftSession::new();
    draft.open_day(date(2025, 5, 1)).name = "guest event".to_string();
    state.commit_draft(&mut draft).unwrap();

    let dave = User::local("dave");
    state.login(dave.clone()).await;
    session.save(&dave).await.unwrap();
    draft.open_day(date(2025, 5, 2)).name = "dave event".to_string();
    state.commit_draft(&mut draft).unwrap();
    state.shutdown().await;

    // Act
    let restored = session.load().await;
    let state = CalendarState::load(routed, SyncPolicy::Optimistic, restored).await;

    // Assert
    assert_eq!(state.user(), Some(&dave));
    assert_eq!(names(state.events()), vec!["dave event"]);
    assert_eq!(
        names(&local.fetch_events(&Namespace::Guest).await.unwrap()),
        vec!["guest event"]
    );
    assert!(local.fetch_events(&dave.namespace()).await.unwrap().is_empty());
    assert_eq!(remote.fetch_events(&dave.namespace()).await.unwrap().len(), 1);
}
