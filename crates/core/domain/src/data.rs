use crate::authorization::Authorization;
use serde::Serialize;

/// 持久化字符串字段的最大字节数（64 字节槽位，末尾保留 NUL）。
pub const FIELD_CAPACITY: usize = 63;

/// 已登记的 BLE 外设。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub address: String,
    pub name: String,
    /// 外部动作标识，空串表示未绑定动作。
    pub action_id: String,
    pub last_rssi: i32,
    /// 最近一次被扫描到的时钟秒数，0 表示从未出现。
    ///
    /// 恰好在时钟第 0 秒被扫描到的设备与从未出现的设备无法区分，状态里同样显示为从未出现。
    pub last_seen: u32,
    pub authorization: Authorization,
}

impl DeviceRecord {
    /// 新登记设备：永久授权、未出现过。
    pub fn new(
        address: impl Into<String>,
        name: impl Into<String>,
        action_id: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            action_id: action_id.into(),
            last_rssi: 0,
            last_seen: 0,
            authorization: Authorization::Permanent,
        }
    }

    /// 旧版单整数编码的 expiry 值。
    pub fn expiry(&self) -> u32 {
        self.authorization.to_raw()
    }

    pub fn has_action(&self) -> bool {
        !self.action_id.is_empty()
    }
}

/// 超长字段的处理策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy {
    /// 写入时按容量静默截断（兼容旧固件行为）。
    Truncate,
    /// 在入口拒绝超长输入。
    #[default]
    Reject,
}

impl FieldPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "truncate" => Some(Self::Truncate),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}
