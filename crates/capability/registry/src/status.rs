//! 管理面设备状态视图。

use domain::{AuthorizationStatus, DeviceRecord, format_hms};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceStatus {
    pub address: String,
    pub name: String,
    pub action_id: String,
    pub authorization: AuthorizationStatus,
    pub last_rssi: i32,
    /// 距最近一次出现的秒数；从未出现为 `None`。
    pub seen_ago_secs: Option<u32>,
}

impl DeviceStatus {
    pub fn from_record(record: &DeviceRecord, now: u32) -> Self {
        let seen_ago_secs = (record.last_seen > 0).then(|| now.saturating_sub(record.last_seen));
        Self {
            address: record.address.clone(),
            name: record.name.clone(),
            action_id: record.action_id.clone(),
            authorization: record.authorization.status(now),
            last_rssi: record.last_rssi,
            seen_ago_secs,
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.authorization.is_authorized()
    }

    /// 临时授权剩余时间 `HH:MM:SS`。
    pub fn remaining_label(&self) -> Option<String> {
        match self.authorization {
            AuthorizationStatus::Temporary { remaining_secs } => Some(format_hms(remaining_secs)),
            _ => None,
        }
    }

    pub fn seen_label(&self) -> String {
        match self.seen_ago_secs {
            None => "never seen".to_string(),
            Some(secs) if secs < 60 => format!("seen {} s ago (RSSI {} dBm)", secs, self.last_rssi),
            Some(secs) if secs < 3600 => {
                format!("seen {} min ago (RSSI {} dBm)", secs / 60, self.last_rssi)
            }
            Some(secs) => format!("seen {} h ago (RSSI {} dBm)", secs / 3600, self.last_rssi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DeviceStatus;
    use domain::{Authorization, DeviceRecord};

    #[test]
    fn labels_follow_elapsed_time() {
        let mut record = DeviceRecord::new("AA:BB:CC:DD:EE:FF", "Fob1", "toggle_relay");
        record.authorization = Authorization::TemporaryUntil(4_000);
        record.last_seen = 100;
        record.last_rssi = -67;

        let status = DeviceStatus::from_record(&record, 220);
        assert_eq!(status.remaining_label().as_deref(), Some("01:03:00"));
        assert_eq!(status.seen_label(), "seen 2 min ago (RSSI -67 dBm)");

        record.last_seen = 0;
        let status = DeviceStatus::from_record(&record, 220);
        assert_eq!(status.seen_label(), "never seen");
    }
}
