// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Mutations travel to the store one at a time, in issuance order.

use std::sync::Arc;

use jiff::civil::date;
use lumina_core::{CalendarState, EventStore, Namespace, SyncError, SyncPolicy};
use tokio::sync::Semaphore;

use crate::common::{ScriptedStore, event, names};

#[tokio::test]
async fn sync_preserves_issuance_order() {
    // Arrange
    let store = Arc::new(ScriptedStore::new());
    let mut state = CalendarState::new(store.clone(), SyncPolicy::Optimistic);
    let mut a = event("a", date(2025, 3, 10));
    let b = event("b", date(2025, 3, 11));

    // Act
    state.upsert(a.clone()).unwrap();
    state.upsert(b.clone()).unwrap();
    a.name = "a2".to_string();
    state.upsert(a.clone()).unwrap();
    state.delete(&b.id).unwrap();
    state.settle().await.unwrap();

    // Assert
    assert_eq!(
        store.log(),
        vec![
            "upsert:a".to_string(),
            "upsert:b".to_string(),
            "upsert:a2".to_string(),
            format!("delete:{}", b.id),
        ]
    );
    assert_eq!(names(state.events()), vec!["a2"]);
    assert_eq!(
        store.fetch_events(&Namespace::Guest).await.unwrap(),
        state.events().to_vec()
    );
}

#[tokio::test]
async fn syncing_flag_tracks_in_flight_mutations() {
    // Arrange
    let gate = Arc::new(Semaphore::new(0));
    let store = Arc::new(ScriptedStore::gated(gate.clone()));
    let mut state = CalendarState::new(store.clone(), SyncPolicy::Optimistic);
    assert!(!state.is_syncing());

    // Act
    let first = state.upsert(event("a", date(2025, 3, 10))).unwrap();
    let second = state.upsert(event("b", date(2025, 3, 10))).unwrap();

    // Assert
    assert!(state.is_syncing());
    assert_eq!(state.pending(), 2);
    assert_eq!(names(state.events()), vec!["a", "b"]);

    gate.add_permits(1);
    first.wait().await.unwrap();
    assert_eq!(store.log(), vec!["upsert:a".to_string()]);

    gate.add_permits(1);
    second.wait().await.unwrap();
    state.settle().await.unwrap();
    assert!(!state.is_syncing());
}

#[tokio::test]
async fn syncing_flag_clears_after_failure() {
    // Arrange
    let store = Arc::new(ScriptedStore::new());
    let mut state = CalendarState::new(store.clone(), SyncPolicy::Optimistic);
    let doomed = event("doomed", date(2025, 3, 10));
    store.fail_on(&doomed.id);

    // Act
    let ticket = state.upsert(doomed.clone()).unwrap();
    let result = ticket.wait().await;
    state.settle().await.unwrap();

    // Assert
    assert!(matches!(result, Err(SyncError::Store(_))));
    assert!(!state.is_syncing());
    // optimistic changes are never rolled back
    assert_eq!(state.events(), &[doomed]);
    assert!(store.fetch_events(&Namespace::Guest).await.unwrap().is_empty());
}

#[tokio::test]
async fn confirm_policy_skips_failed_mutations() {
    // Arrange
    let store = Arc::new(ScriptedStore::new());
    let mut state = CalendarState::new(store.clone(), SyncPolicy::Confirm);
    let good = event("good", date(2025, 3, 10));
    let bad = event("bad", date(2025, 3, 10));
    store.fail_on(&bad.id);

    // Act
    state.upsert(good.clone()).unwrap();
    state.upsert(bad).unwrap();
    assert!(state.events().is_empty());
    let applied = state.settle().await.unwrap();

    // Assert
    assert_eq!(applied, 1);
    assert_eq!(state.events(), &[good.clone()]);

    // a failed delete leaves the event in place
    store.fail_on(&good.id);
    state.delete(&good.id).unwrap();
    state.settle().await.unwrap();
    assert_eq!(state.events(), &[good]);
}

#[tokio::test]
async fn apply_completed_does_not_wait() {
    let gate = Arc::new(Semaphore::new(0));
    let store = Arc::new(ScriptedStore::gated(gate.clone()));
    let mut state = CalendarState::new(store, SyncPolicy::Confirm);

    let ticket = state.upsert(event("a", date(2025, 3, 10))).unwrap();
    assert_eq!(state.apply_completed(), 0);
    assert!(state.events().is_empty());

    gate.add_permits(1);
    ticket.wait().await.unwrap();
    state.settle().await.unwrap();
    assert_eq!(names(state.events()), vec!["a"]);
}
