//! # PostgreSQL 存储实现模块
//!
//! 以单表模拟命名槽位 KV，用于把设备名册托管在外部数据库上。
//!
//! ## 数据库模式要求
//!
//! ```sql
//! create table if not exists preferences (
//!     namespace text not null,
//!     key text not null,
//!     value bytea not null,
//!     updated_at timestamptz not null default now(),
//!     primary key (namespace, key)
//! );
//! ```
//!
//! `PgPreferenceStore::ensure_schema` 会在启动时执行上述建表语句。
//!
//! ## 安全考虑
//! - 所有查询使用参数绑定（`$1`, `$2` 等）
//! - 禁止字符串拼接构建 SQL

pub mod preference;

pub use preference::*;
