use domain::{Authorization, DeviceRecord};
use keyguard_registry::DeviceCodec;
use keyguard_registry::codec::{COUNT_KEY, action_key, expiry_key, mac_key, name_key};
use keyguard_storage::slot::encode_string_slot;
use keyguard_storage::InMemoryPreferenceStore;
use std::sync::Arc;

fn record(address: &str, name: &str, action_id: &str, authorization: Authorization) -> DeviceRecord {
    let mut record = DeviceRecord::new(address, name, action_id);
    record.authorization = authorization;
    record
}

#[tokio::test]
async fn round_trip_truncates_deterministically() {
    let store = Arc::new(InMemoryPreferenceStore::new());
    let codec = DeviceCodec::new(store.clone());
    let long_action = "a".repeat(80);
    let devices = vec![
        record("AA:BB:CC:DD:EE:FF", "Fob1", "toggle_relay", Authorization::TemporaryUntil(110)),
        record("11:22:33:44:55:66", "Tag", &long_action, Authorization::Revoked),
        record("00:00:00:00:00:01", "Card", "", Authorization::Permanent),
    ];
    codec.save(&devices).await.expect("save");

    let loaded = codec.load().await.expect("load");
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0], devices[0]);
    assert_eq!(loaded[1].action_id, "a".repeat(63));
    assert_eq!(loaded[1].authorization, Authorization::Revoked);
    assert_eq!(loaded[2], devices[2]);

    // 再存再取结果不变
    codec.save(&loaded).await.expect("save again");
    assert_eq!(codec.load().await.expect("load again"), loaded);
}

#[tokio::test]
async fn missing_count_is_fresh_install() {
    let store = Arc::new(InMemoryPreferenceStore::new());
    store.insert_raw(&mac_key(0), encode_string_slot("AA:BB:CC:DD:EE:FF").to_vec());
    let codec = DeviceCodec::new(store);
    assert!(codec.load().await.expect("load").is_empty());
}

#[tokio::test]
async fn unreadable_slots_are_skipped() {
    let store = Arc::new(InMemoryPreferenceStore::new());
    let codec = DeviceCodec::new(store.clone());
    let devices = vec![
        record("AA:BB:CC:DD:EE:FF", "Fob1", "toggle_relay", Authorization::TemporaryUntil(500)),
        record("11:22:33:44:55:66", "Tag", "", Authorization::Revoked),
        record("00:00:00:00:00:01", "Card", "turn_on_relay", Authorization::Revoked),
        record("00:00:00:00:00:02", "Watch", "", Authorization::Permanent),
    ];
    codec.save(&devices).await.expect("save");

    store.insert_raw(&mac_key(0), b"garbage".to_vec());
    store.remove_raw(&name_key(1));
    store.remove_raw(&action_key(2));
    store.remove_raw(&expiry_key(2));

    let loaded = codec.load().await.expect("load");
    let addresses: Vec<&str> = loaded.iter().map(|d| d.address.as_str()).collect();
    assert_eq!(addresses, vec!["00:00:00:00:00:01", "00:00:00:00:00:02"]);
    assert_eq!(loaded[0].action_id, "");
    assert_eq!(loaded[0].authorization, Authorization::Permanent);
}

#[tokio::test]
async fn duplicate_slots_keep_first() {
    let store = Arc::new(InMemoryPreferenceStore::new());
    let codec = DeviceCodec::new(store.clone());
    let devices = vec![
        record("AA:BB:CC:DD:EE:FF", "first", "", Authorization::Permanent),
        record("AA:BB:CC:DD:EE:FF", "second", "", Authorization::Revoked),
    ];
    codec.save(&devices).await.expect("save");

    let loaded = codec.load().await.expect("load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "first");
}

#[tokio::test]
async fn save_failure_propagates() {
    let store = Arc::new(InMemoryPreferenceStore::new());
    store.set_fail_writes(true);
    let codec = DeviceCodec::new(store.clone());
    let devices = vec![record("AA:BB:CC:DD:EE:FF", "Fob1", "", Authorization::Permanent)];

    assert!(codec.save(&devices).await.is_err());
    assert!(!store.contains_key(COUNT_KEY));
}
