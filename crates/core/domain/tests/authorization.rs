use domain::{Authorization, AuthorizationStatus, DeviceRecord, format_hms};

#[test]
fn raw_encoding_maps_tri_state() {
    assert_eq!(Authorization::from_raw(0), Authorization::Permanent);
    assert_eq!(Authorization::from_raw(1), Authorization::Revoked);
    assert_eq!(Authorization::from_raw(500), Authorization::TemporaryUntil(500));
    assert_eq!(Authorization::TemporaryUntil(500).to_raw(), 500);
    assert_eq!(Authorization::Revoked.to_raw(), 1);
}

#[test]
fn clamped_grant_outlives_requested_window() {
    let grant = Authorization::temporary(0, 1);
    assert!(grant.is_active(0));
    assert!(grant.is_active(1));
    assert!(!grant.is_active(2));
    assert!(grant.is_lapsed(2));
}

#[test]
fn temporary_never_collides_with_sentinels() {
    assert_eq!(Authorization::temporary(0, 1), Authorization::TemporaryUntil(2));
    assert_eq!(
        Authorization::temporary(u32::MAX - 5, 100),
        Authorization::TemporaryUntil(u32::MAX)
    );
    assert_eq!(Authorization::temporary(100, 10), Authorization::TemporaryUntil(110));
}

#[test]
fn temporary_window_is_half_open() {
    let auth = Authorization::temporary(100, 10);
    assert!(auth.is_active(100));
    assert!(auth.is_active(109));
    assert!(!auth.is_active(110));
    assert!(auth.is_lapsed(110));
    assert!(!auth.is_lapsed(109));
}

#[test]
fn revoked_is_inactive_even_at_boot() {
    assert!(!Authorization::Revoked.is_active(0));
    assert!(Authorization::Permanent.is_active(u32::MAX));
    assert!(!Authorization::Revoked.is_lapsed(10));
    assert!(!Authorization::Permanent.is_lapsed(10));
}

#[test]
fn status_reports_remaining_time() {
    let auth = Authorization::TemporaryUntil(3_800);
    assert_eq!(
        auth.status(100),
        AuthorizationStatus::Temporary {
            remaining_secs: 3_700
        }
    );
    assert_eq!(auth.status(3_800), AuthorizationStatus::Unauthorized);
    assert!(Authorization::Permanent.status(0).is_authorized());
    assert_eq!(format_hms(3_700), "01:01:40");
    assert_eq!(format_hms(90_000), "25:00:00");
}

#[test]
fn new_record_is_permanent_and_unseen() {
    let record = DeviceRecord::new("AA:BB:CC:DD:EE:FF", "Fob1", "");
    assert_eq!(record.expiry(), 0);
    assert_eq!(record.last_seen, 0);
    assert!(!record.has_action());
}
