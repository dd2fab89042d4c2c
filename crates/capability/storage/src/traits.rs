//! 存储接口 Trait 定义
//!
//! 持久化偏好存储：以字符串键寻址的小块字节值，断电重启后保留。
//!
//! 设计原则：
//! - 键由前缀与序号拼接（如 `ble_mac_0`），后端负责命名空间隔离
//! - 值为不透明字节，类型化读写见 [`crate::slot`]
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use async_trait::async_trait;

/// 命名槽位 KV 存储接口
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// 读取槽位；不存在时返回 `None`
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// 覆盖写入槽位
    async fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}
