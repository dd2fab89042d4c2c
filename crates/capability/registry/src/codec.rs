//! 名册持久化编解码
//!
//! 槽位布局（与旧固件的偏好存储布局一致）：
//! - `ble_device_count`：u16，记录条数
//! - `ble_mac_{i}` / `ble_name_{i}` / `ble_action_{i}`：64 字节定长字符串
//! - `ble_expiry_{i}`：u32，旧版单整数授权编码
//!
//! 保存为全量重写；加载时跳过地址或名称不可读的槽位。

use domain::{Authorization, DeviceRecord};
use keyguard_storage::slot;
use keyguard_storage::{PreferenceStore, StorageError};
use std::sync::Arc;
use tracing::{debug, warn};

pub const COUNT_KEY: &str = "ble_device_count";

pub fn mac_key(index: usize) -> String {
    format!("ble_mac_{}", index)
}

pub fn name_key(index: usize) -> String {
    format!("ble_name_{}", index)
}

pub fn action_key(index: usize) -> String {
    format!("ble_action_{}", index)
}

pub fn expiry_key(index: usize) -> String {
    format!("ble_expiry_{}", index)
}

pub struct DeviceCodec {
    store: Arc<dyn PreferenceStore>,
}

impl DeviceCodec {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// 全量写入名册；遇到第一个后端错误即中止。
    ///
    /// 写入不是原子的：条数先于各槽位写入，中途失败时存储里可能是新旧槽位的混合，
    /// 名册缩短后甚至可能读回已删除的设备。调用方须在失败后重新整体写入
    /// （注册表会把自己标记为脏，由下一次清扫补写）。
    pub async fn save(&self, devices: &[DeviceRecord]) -> Result<(), StorageError> {
        let store = self.store.as_ref();
        let count = u16::try_from(devices.len())
            .map_err(|_| StorageError::new("roster exceeds slot count"))?;
        debug!(target: "keyguard.registry", count, "saving roster");
        slot::save_u16(store, COUNT_KEY, count).await?;
        for (index, device) in devices.iter().enumerate() {
            slot::save_string(store, &mac_key(index), &device.address).await?;
            slot::save_string(store, &name_key(index), &device.name).await?;
            slot::save_string(store, &action_key(index), &device.action_id).await?;
            slot::save_u32(store, &expiry_key(index), device.expiry()).await?;
        }
        Ok(())
    }

    /// 读取名册；没有已保存的条数时返回空名册。
    pub async fn load(&self) -> Result<Vec<DeviceRecord>, StorageError> {
        let store = self.store.as_ref();
        let Some(count) = slot::load_u16(store, COUNT_KEY).await? else {
            debug!(target: "keyguard.registry", "no saved roster");
            return Ok(Vec::new());
        };
        debug!(target: "keyguard.registry", count, "loading roster");

        let mut devices: Vec<DeviceRecord> = Vec::with_capacity(usize::from(count));
        for index in 0..usize::from(count) {
            let Some(address) = slot::load_string(store, &mac_key(index)).await? else {
                warn!(target: "keyguard.registry", index, "unreadable address slot, skipped");
                continue;
            };
            let Some(name) = slot::load_string(store, &name_key(index)).await? else {
                warn!(target: "keyguard.registry", index, "unreadable name slot, skipped");
                continue;
            };
            let action_id = slot::load_string(store, &action_key(index))
                .await?
                .unwrap_or_default();
            let expiry = slot::load_u32(store, &expiry_key(index)).await?.unwrap_or(0);

            if devices.iter().any(|device| device.address == address) {
                warn!(target: "keyguard.registry", index, address = %address, "duplicate address slot, skipped");
                continue;
            }
            let mut record = DeviceRecord::new(address, name, action_id);
            record.authorization = Authorization::from_raw(expiry);
            devices.push(record);
        }
        Ok(devices)
    }
}
