use keyguard_storage::{InMemoryPreferenceStore, PreferenceStore};

#[tokio::test]
async fn save_then_load_slot() {
    let store = InMemoryPreferenceStore::new();
    store.save("ble_mac_0", b"AA").await.expect("save");

    let value = store.load("ble_mac_0").await.expect("load");
    assert_eq!(value.as_deref(), Some(&b"AA"[..]));
    assert!(store.load("ble_mac_1").await.expect("load").is_none());
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn rejected_writes_are_not_counted() {
    let store = InMemoryPreferenceStore::new();
    store.set_fail_writes(true);
    assert!(store.save("ble_device_count", &[1, 0]).await.is_err());
    assert_eq!(store.write_count(), 0);
    assert!(!store.contains_key("ble_device_count"));
}
