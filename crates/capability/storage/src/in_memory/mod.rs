//! 内存存储实现模块
//!
//! 用于测试和无持久化的本地运行（进程退出即丢失）。
//!
//! 包含以下实现：
//! - PreferenceStore: InMemoryPreferenceStore

pub mod preference;

pub use preference::*;
