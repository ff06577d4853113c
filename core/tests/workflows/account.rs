// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Logging in and out swaps the whole event list.

use std::sync::Arc;

use jiff::civil::date;
use lumina_core::{CalendarState, Namespace, SyncPolicy, User};

use crate::common::{ScriptedStore, event, names};

#[tokio::test]
async fn login_replaces_list_wholesale() {
    // Arrange
    let store = Arc::new(ScriptedStore::new());
    let alice = User::local("alice");
    store
        .seed(&Namespace::Guest, &[event("guest", date(2025, 3, 1))])
        .await;
    store
        .seed(
            &alice.namespace(),
            &[
                event("alice 1", date(2025, 3, 2)),
                event("alice 2", date(2025, 3, 3)),
            ],
        )
        .await;
    let mut state = CalendarState::load(store.clone(), SyncPolicy::Optimistic, None).await;
    assert_eq!(names(state.events()), vec!["guest"]);

    // Act
    state.login(alice.clone()).await;

    // Assert
    assert_eq!(state.user(), Some(&alice));
    assert_eq!(state.namespace(), alice.namespace());
    assert_eq!(names(state.events()), vec!["alice 1", "alice 2"]);

    state.logout().await;
    assert_eq!(state.user(), None);
    assert_eq!(names(state.events()), vec!["guest"]);
}

#[tokio::test]
async fn login_settles_pending_mutations_first() {
    // Arrange
    let store = Arc::new(ScriptedStore::new());
    let mut state = CalendarState::load(store.clone(), SyncPolicy::Optimistic, None).await;
    state.upsert(event("guest note", date(2025, 3, 1))).unwrap();

    // Act
    state.login(User::local("bob")).await;

    // Assert
    assert!(state.events().is_empty());
    assert!(!state.is_syncing());
    assert_eq!(
        store.log(),
        vec![
            "fetch:guest".to_string(),
            "upsert:guest note".to_string(),
            "fetch:user:bob".to_string(),
        ]
    );
}

#[tokio::test]
async fn failed_fetch_yields_empty_list() {
    // Arrange
    let store = Arc::new(ScriptedStore::new());
    let alice = User::local("alice");
    store
        .seed(&alice.namespace(), &[event("alice", date(2025, 3, 2))])
        .await;
    let mut state = CalendarState::load(store.clone(), SyncPolicy::Optimistic, None).await;
    state.upsert(event("guest", date(2025, 3, 1))).unwrap();
    store.fail_fetch(true);

    // Act
    state.login(alice).await;

    // Assert
    assert!(state.events().is_empty());
}

#[tokio::test]
async fn confirmed_guest_mutation_stays_out_of_new_account() {
    // Arrange
    let store = Arc::new(ScriptedStore::new());
    let mut state = CalendarState::load(store.clone(), SyncPolicy::Confirm, None).await;

    // Act
    state.upsert(event("guest", date(2025, 3, 1))).unwrap();
    state.login(User::local("carol")).await;

    // Assert
    assert!(state.events().is_empty());
    assert_eq!(state.apply_completed(), 0);
}
