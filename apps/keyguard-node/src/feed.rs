//! stdin 在场事件输入（台架测试用）。
//!
//! 每行一条 JSON：`{"address":"AA:BB:CC:DD:EE:FF","rssi":-60}`。

use keyguard_registry::{PresenceEvent, PresenceHandler};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

pub async fn run_stdin_feed(handler: PresenceHandler) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!(target: "keyguard.node", "reading presence events from stdin");
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!(target: "keyguard.node", "stdin read failed: {}", err);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match PresenceEvent::from_json_line(&line) {
            Ok(event) => {
                let outcome = handler.handle(&event).await;
                debug!(target: "keyguard.node", address = %event.address, ?outcome, "presence handled");
            }
            Err(err) => warn!(target: "keyguard.node", "invalid presence line: {}", err),
        }
    }
    info!(target: "keyguard.node", "stdin feed closed");
}
