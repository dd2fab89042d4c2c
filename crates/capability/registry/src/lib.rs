//! # Keyguard Registry 模块
//!
//! BLE 外设授权注册表：设备名册的唯一数据源。
//!
//! ## 组成
//!
//! - [`registry`]：`DeviceRegistry`，按地址增删改查、授权 / 撤销、实时授权判断、过期清扫
//! - [`codec`]：名册与命名槽位 KV 之间的整体编解码（每次变更全量重写）
//! - [`status`]：管理面使用的设备状态视图
//! - [`presence`]：扫描回调入口，授权设备出现时交给外部动作分发器
//! - [`sweeper`]：周期性过期清扫任务
//!
//! ## 并发模型
//!
//! 所有操作经由 [`SharedRegistry`]（单把 `tokio::sync::Mutex`）串行执行，
//! 变更操作在持锁期间完成整体写入，写入之间不会交错。

pub mod codec;
pub mod error;
pub mod presence;
pub mod registry;
pub mod status;
pub mod sweeper;

pub use codec::DeviceCodec;
pub use error::RegistryError;
pub use presence::{
    ActionDispatcher, ActionTrigger, LoggingDispatcher, NoopDispatcher, PresenceError,
    PresenceEvent, PresenceHandler, PresenceOutcome,
};
pub use registry::{DeviceRegistry, MAX_DEVICES, SharedRegistry};
pub use status::DeviceStatus;
pub use sweeper::spawn_sweeper;
