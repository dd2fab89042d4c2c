//! 在场事件处理
//!
//! 扫描回调每收到一条广播即调用 [`PresenceHandler::on_advertisement`]：
//! 先更新遥测字段，再判断是否授权；授权且绑定了动作的设备交给
//! [`ActionDispatcher`] 执行。分发在释放注册表锁之后进行。

use crate::registry::SharedRegistry;
use async_trait::async_trait;
use keyguard_telemetry::{record_action_dispatched, record_action_failed, record_presence};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// 外部扫描器上报的一条广播。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresenceEvent {
    pub address: String,
    pub rssi: i32,
}

impl PresenceEvent {
    /// 解析一行 JSON（`{"address":"AA:BB:CC:DD:EE:FF","rssi":-60}`）。
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }
}

/// 动作触发数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTrigger {
    pub trigger_id: String,
    pub address: String,
    pub action_id: String,
    pub rssi: i32,
    pub seen_at: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    #[error("dispatch error: {0}")]
    Dispatch(String),
}

/// 动作分发器抽象。
#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    async fn dispatch(&self, trigger: &ActionTrigger) -> Result<(), PresenceError>;
}

/// 空分发器（用于占位）。
#[derive(Debug, Default)]
pub struct NoopDispatcher;

#[async_trait]
impl ActionDispatcher for NoopDispatcher {
    async fn dispatch(&self, _trigger: &ActionTrigger) -> Result<(), PresenceError> {
        Ok(())
    }
}

/// 仅记录日志的分发器。
#[derive(Debug, Default)]
pub struct LoggingDispatcher;

#[async_trait]
impl ActionDispatcher for LoggingDispatcher {
    async fn dispatch(&self, trigger: &ActionTrigger) -> Result<(), PresenceError> {
        info!(
            target: "keyguard.presence",
            trigger_id = %trigger.trigger_id,
            address = %trigger.address,
            action_id = %trigger.action_id,
            rssi = trigger.rssi,
            "action triggered"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceOutcome {
    Unknown,
    Unauthorized,
    Authorized { dispatched: bool },
}

pub struct PresenceHandler {
    registry: SharedRegistry,
    dispatcher: Arc<dyn ActionDispatcher>,
}

impl PresenceHandler {
    pub fn new(registry: SharedRegistry, dispatcher: Arc<dyn ActionDispatcher>) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    pub async fn handle(&self, event: &PresenceEvent) -> PresenceOutcome {
        self.on_advertisement(&event.address, event.rssi).await
    }

    pub async fn on_advertisement(&self, address: &str, rssi: i32) -> PresenceOutcome {
        let trigger = {
            let mut registry = self.registry.lock().await;
            registry.record_seen(address, rssi);
            let Some(device) = registry.get(address) else {
                record_presence(false);
                return PresenceOutcome::Unknown;
            };
            record_presence(true);
            if !registry.is_authorized(address) {
                return PresenceOutcome::Unauthorized;
            }
            if !device.has_action() {
                return PresenceOutcome::Authorized { dispatched: false };
            }
            ActionTrigger {
                trigger_id: uuid::Uuid::new_v4().to_string(),
                address: device.address.clone(),
                action_id: device.action_id.clone(),
                rssi,
                seen_at: device.last_seen,
            }
        };

        match self.dispatcher.dispatch(&trigger).await {
            Ok(()) => {
                record_action_dispatched();
                PresenceOutcome::Authorized { dispatched: true }
            }
            Err(err) => {
                record_action_failed();
                warn!(
                    target: "keyguard.presence",
                    address = %trigger.address,
                    action_id = %trigger.action_id,
                    "action dispatch failed: {}",
                    err
                );
                PresenceOutcome::Authorized { dispatched: false }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PresenceEvent;

    #[test]
    fn parses_json_line() {
        let line = " {\"address\":\"AA:BB:CC:DD:EE:FF\",\"rssi\":-61}\n";
        let event = PresenceEvent::from_json_line(line).expect("event");
        assert_eq!(event.address, "AA:BB:CC:DD:EE:FF");
        assert_eq!(event.rssi, -61);
        assert!(PresenceEvent::from_json_line("not json").is_err());
    }
}
