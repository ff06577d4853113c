// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration test for the common module.
//!
//! Verifies that common test utilities work correctly.

mod common;

use jiff::civil::date;
use lumina_core::{EventStore, Namespace, Repeat};

use common::{ScriptedStore, event, names, recurring, setup_temp_dirs};

#[tokio::test]
async fn common_module_imports_work() {
    let dirs = setup_temp_dirs().await.unwrap();
    assert!(dirs.state_dir.exists());
}

#[test]
fn common_module_fixtures_work() {
    let once = event("Coffee", date(2025, 3, 4));
    let weekly = recurring("Yoga", date(2025, 3, 5), Repeat::Weekly);

    assert_eq!(once.repeat, Repeat::None);
    assert_eq!(weekly.repeat, Repeat::Weekly);
    assert_eq!(names(&[once, weekly]), vec!["Coffee", "Yoga"]);
}

#[tokio::test]
async fn common_module_scripted_store_logs_calls() {
    let store = ScriptedStore::new();
    let namespace = Namespace::Guest;
    let coffee = event("Coffee", date(2025, 3, 4));

    store.upsert(&namespace, &coffee).await.unwrap();
    store.fail_on(&coffee.id);
    assert!(store.delete(&namespace, &coffee.id).await.is_err());

    let events = store.fetch_events(&namespace).await.unwrap();
    assert_eq!(names(&events), vec!["Coffee"]);
    assert_eq!(
        store.log(),
        vec![
            "upsert:Coffee".to_string(),
            format!("delete:{}", coffee.id),
            format!("fetch:{namespace}"),
        ]
    );
}
