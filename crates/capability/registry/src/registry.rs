//! 设备授权注册表。

use crate::codec::DeviceCodec;
use crate::error::RegistryError;
use crate::status::DeviceStatus;
use domain::{Authorization, Clock, DeviceRecord, FIELD_CAPACITY, FieldPolicy};
use keyguard_storage::PreferenceStore;
use keyguard_telemetry::{record_save_failed, record_save_ok, record_sweep};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 持久化条数为 u16，名册上限随之确定。
pub const MAX_DEVICES: usize = u16::MAX as usize;

/// 临时授权默认时长（24 小时）。
const DEFAULT_TEMPORARY_GRANT_SECONDS: u32 = 24 * 60 * 60;

/// 多任务共享的注册表句柄：单把互斥锁保护整个名册。
pub type SharedRegistry = Arc<tokio::sync::Mutex<DeviceRegistry>>;

pub struct DeviceRegistry {
    devices: Vec<DeviceRecord>,
    codec: DeviceCodec,
    clock: Arc<dyn Clock>,
    policy: FieldPolicy,
    temporary_grant_seconds: u32,
    /// 最近一次写入失败，存储落后于内存名册。
    dirty: bool,
}

impl DeviceRegistry {
    /// 从存储加载已保存的名册。
    pub async fn load(
        store: Arc<dyn PreferenceStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RegistryError> {
        let codec = DeviceCodec::new(store);
        let devices = codec.load().await?;
        info!(target: "keyguard.registry", count = devices.len(), "roster loaded");
        Ok(Self {
            devices,
            codec,
            clock,
            policy: FieldPolicy::default(),
            temporary_grant_seconds: DEFAULT_TEMPORARY_GRANT_SECONDS,
            dirty: false,
        })
    }

    pub fn with_field_policy(mut self, policy: FieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_temporary_grant_seconds(mut self, seconds: u32) -> Self {
        self.temporary_grant_seconds = seconds;
        self
    }

    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(tokio::sync::Mutex::new(self))
    }

    pub fn now(&self) -> u32 {
        self.clock.now_secs()
    }

    /// 登记新设备，或更新已有设备的名称；`action_id` 为空时保留原动作。
    pub async fn add_or_update(
        &mut self,
        address: &str,
        name: &str,
        action_id: &str,
    ) -> Result<(), RegistryError> {
        self.check_field("address", address)?;
        self.check_field("name", name)?;
        self.check_field("action_id", action_id)?;

        match self.position(address) {
            Some(index) => {
                let device = &mut self.devices[index];
                device.name = name.to_string();
                if !action_id.is_empty() {
                    device.action_id = action_id.to_string();
                }
                debug!(target: "keyguard.registry", address, "device updated");
            }
            None => {
                if self.devices.len() >= MAX_DEVICES {
                    return Err(RegistryError::RosterFull(MAX_DEVICES));
                }
                self.devices
                    .push(DeviceRecord::new(address, name, action_id));
                info!(target: "keyguard.registry", address, name, "device added");
            }
        }
        self.persist().await
    }

    /// 删除设备；返回是否存在。未找到时不写存储。
    pub async fn remove(&mut self, address: &str) -> Result<bool, RegistryError> {
        let Some(index) = self.position(address) else {
            return Ok(false);
        };
        self.devices.remove(index);
        info!(target: "keyguard.registry", address, "device removed");
        self.persist().await?;
        Ok(true)
    }

    /// 授权设备：`duration_seconds` 为 0 表示永久授权。
    pub async fn authorize(
        &mut self,
        address: &str,
        duration_seconds: u32,
    ) -> Result<(), RegistryError> {
        let now = self.now();
        let device = self.find_mut(address)?;
        device.authorization = if duration_seconds > 0 {
            Authorization::temporary(now, duration_seconds)
        } else {
            Authorization::Permanent
        };
        info!(
            target: "keyguard.registry",
            address,
            expiry = device.expiry(),
            "device authorized"
        );
        self.persist().await
    }

    /// 按配置的默认时长临时授权。
    pub async fn authorize_temporary(&mut self, address: &str) -> Result<(), RegistryError> {
        self.authorize(address, self.temporary_grant_seconds).await
    }

    pub async fn revoke(&mut self, address: &str) -> Result<(), RegistryError> {
        let device = self.find_mut(address)?;
        device.authorization = Authorization::Revoked;
        info!(target: "keyguard.registry", address, "authorization revoked");
        self.persist().await
    }

    /// 实时判断，不改写已过期但尚未清扫的记录。
    pub fn is_authorized(&self, address: &str) -> bool {
        let now = self.now();
        self.get(address)
            .map(|device| device.authorization.is_active(now))
            .unwrap_or(false)
    }

    /// 记录扫描到的设备；未登记的地址直接忽略。不写存储。
    pub fn record_seen(&mut self, address: &str, rssi: i32) {
        let now = self.now();
        if let Some(device) = self.devices.iter_mut().find(|d| d.address == address) {
            device.last_seen = now;
            device.last_rssi = rssi;
        }
    }

    pub fn get(&self, address: &str) -> Option<&DeviceRecord> {
        self.devices.iter().find(|device| device.address == address)
    }

    /// 按登记顺序的只读视图。
    pub fn list(&self) -> &[DeviceRecord] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// 覆盖设备动作（空串即清除）。
    pub async fn set_action(&mut self, address: &str, action_id: &str) -> Result<(), RegistryError> {
        self.check_field("action_id", action_id)?;
        let device = self.find_mut(address)?;
        device.action_id = action_id.to_string();
        info!(target: "keyguard.registry", address, action_id, "device action set");
        self.persist().await
    }

    /// 把已过截止时间的临时授权改写为撤销状态；有变更或上次写入失败时整体写入一次。
    pub async fn sweep_expired(&mut self) -> Result<usize, RegistryError> {
        let now = self.now();
        let mut expired = 0usize;
        for device in self
            .devices
            .iter_mut()
            .filter(|device| device.authorization.is_lapsed(now))
        {
            device.authorization = Authorization::Revoked;
            expired += 1;
            debug!(
                target: "keyguard.registry",
                address = %device.address,
                name = %device.name,
                "authorization expired"
            );
        }
        record_sweep(expired as u64);
        if expired > 0 || self.dirty {
            self.persist().await?;
        }
        Ok(expired)
    }

    pub fn status(&self, address: &str) -> Option<DeviceStatus> {
        let now = self.now();
        self.get(address)
            .map(|device| DeviceStatus::from_record(device, now))
    }

    pub fn statuses(&self) -> Vec<DeviceStatus> {
        let now = self.now();
        self.devices
            .iter()
            .map(|device| DeviceStatus::from_record(device, now))
            .collect()
    }

    fn position(&self, address: &str) -> Option<usize> {
        self.devices
            .iter()
            .position(|device| device.address == address)
    }

    fn find_mut(&mut self, address: &str) -> Result<&mut DeviceRecord, RegistryError> {
        self.devices
            .iter_mut()
            .find(|device| device.address == address)
            .ok_or_else(|| RegistryError::NotFound(address.to_string()))
    }

    fn check_field(&self, field: &'static str, value: &str) -> Result<(), RegistryError> {
        if self.policy == FieldPolicy::Reject && value.len() > FIELD_CAPACITY {
            return Err(RegistryError::FieldTooLong {
                field,
                len: value.len(),
                capacity: FIELD_CAPACITY,
            });
        }
        Ok(())
    }

    /// 存储是否落后于内存名册（上次写入失败且尚未补写）。
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    async fn persist(&mut self) -> Result<(), RegistryError> {
        match self.codec.save(&self.devices).await {
            Ok(()) => {
                self.dirty = false;
                record_save_ok();
                Ok(())
            }
            Err(err) => {
                self.dirty = true;
                record_save_failed();
                warn!(target: "keyguard.registry", "roster save failed: {}", err);
                Err(err.into())
            }
        }
    }
}
