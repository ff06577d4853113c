// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use jiff::civil::date;
use lumina_core::{EventStore, LocalStore, MemoryStore, Namespace};

use crate::common::{event, names};

async fn stores() -> Vec<(&'static str, Arc<dyn EventStore>)> {
    let local = LocalStore::open(None).await.expect("Failed to open local store");
    vec![
        ("memory", Arc::new(MemoryStore::new()) as Arc<dyn EventStore>),
        ("local", Arc::new(local) as Arc<dyn EventStore>),
    ]
}

#[tokio::test]
async fn store_upsert_replaces_by_id() {
    for (kind, store) in stores().await {
        // Arrange
        let ns = Namespace::Guest;
        let mut first = event("first", date(2025, 3, 10));
        store.upsert(&ns, &first).await.unwrap();
        store.upsert(&ns, &event("second", date(2025, 3, 11))).await.unwrap();

        // Act
        first.name = "first, renamed".to_string();
        first.date = date(2025, 4, 1);
        store.upsert(&ns, &first).await.unwrap();

        // Assert
        let events = store.fetch_events(&ns).await.unwrap();
        assert_eq!(names(&events), vec!["first, renamed", "second"], "{kind}");
        assert_eq!(events[0], first, "{kind}");
    }
}

#[tokio::test]
async fn store_delete_is_idempotent() {
    for (kind, store) in stores().await {
        // Arrange
        let ns = Namespace::User("alice".to_string());
        let keep = event("keep", date(2025, 3, 10));
        let gone = event("gone", date(2025, 3, 10));
        store.upsert(&ns, &keep).await.unwrap();
        store.upsert(&ns, &gone).await.unwrap();

        // Act
        store.delete(&ns, &gone.id).await.unwrap();
        let once = store.fetch_events(&ns).await.unwrap();
        store.delete(&ns, &gone.id).await.unwrap();
        let twice = store.fetch_events(&ns).await.unwrap();

        // Assert
        assert_eq!(once, vec![keep.clone()], "{kind}");
        assert_eq!(once, twice, "{kind}");
    }
}

#[tokio::test]
async fn store_namespaces_are_isolated() {
    for (kind, store) in stores().await {
        let guest = event("guest", date(2025, 3, 10));
        store.upsert(&Namespace::Guest, &guest).await.unwrap();

        let alice = store
            .fetch_events(&Namespace::User("alice".to_string()))
            .await
            .unwrap();
        store
            .delete(&Namespace::User("alice".to_string()), &guest.id)
            .await
            .unwrap();

        assert!(alice.is_empty(), "{kind}");
        assert_eq!(
            store.fetch_events(&Namespace::Guest).await.unwrap(),
            vec![guest],
            "{kind}"
        );
    }
}
