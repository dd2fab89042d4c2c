//! 偏好槽位内存存储实现
//!
//! 功能：
//! - 槽位读写
//! - 写入计数（测试中用于断言是否发生持久化）
//! - 写入故障注入（测试中模拟存储不可用）

use crate::error::StorageError;
use crate::traits::PreferenceStore;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// 偏好槽位内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryPreferenceStore {
    slots: RwLock<HashMap<String, Vec<u8>>>,
    writes: AtomicU64,
    fail_writes: AtomicBool,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            writes: AtomicU64::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// 成功写入的槽位次数。
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// 开启后所有写入返回错误。
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// 直接放入原始字节（绕过写入计数）。
    pub fn insert_raw(&self, key: &str, value: Vec<u8>) {
        if let Ok(mut map) = self.slots.write() {
            map.insert(key.to_string(), value);
        }
    }

    pub fn remove_raw(&self, key: &str) {
        if let Ok(mut map) = self.slots.write() {
            map.remove(key);
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots
            .read()
            .map(|map| map.contains_key(key))
            .unwrap_or(false)
    }
}

impl Default for InMemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let map = self
            .slots
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StorageError::new("write rejected"));
        }
        let mut map = self
            .slots
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        map.insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
