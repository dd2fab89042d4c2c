//! # Keyguard Storage 模块
//!
//! 本模块提供断电保留的命名槽位 KV 抽象（偏好存储），支持多种后端实现。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：`PreferenceStore`，按字符串键读写字节值
//! 2. **类型化槽位层** (`slot.rs`)：`u16` / `u32` / 64 字节定长字符串
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 5. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `redis.rs`：Redis 存储实现
//!    - `postgres/`：PostgreSQL 存储实现
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use keyguard_storage::{InMemoryPreferenceStore, slot};
//!
//! let store = InMemoryPreferenceStore::new();
//! slot::save_u16(&store, "ble_device_count", 3).await?;
//! assert_eq!(slot::load_u16(&store, "ble_device_count").await?, Some(3));
//! ```
//!
//! ## 设计约束
//!
//! - **注入而非全局**：调用方在构造时显式传入存储实例，不存在进程级单例
//! - **同步完成**：每次 `save` 在返回前完成写入，调用方据此保证写入不交错

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod postgres;
pub mod redis;
pub mod slot;
pub mod traits;

pub use connection::*;
pub use error::*;
pub use traits::*;

pub use in_memory::InMemoryPreferenceStore;
pub use postgres::PgPreferenceStore;
pub use redis::RedisPreferenceStore;
