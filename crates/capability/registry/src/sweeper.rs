//! 周期性过期清扫任务。

use crate::registry::SharedRegistry;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

/// 按固定周期对注册表执行过期清扫；错误只记录日志，任务持续运行。
pub fn spawn_sweeper(registry: SharedRegistry, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let mut registry = registry.lock().await;
            match registry.sweep_expired().await {
                Ok(0) => {}
                Ok(expired) => {
                    info!(target: "keyguard.registry", expired, "expired authorizations swept")
                }
                Err(err) => warn!(target: "keyguard.registry", "sweep failed: {}", err),
            }
        }
    })
}
