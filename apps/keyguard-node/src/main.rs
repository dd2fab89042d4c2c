//! Keyguard 宿主进程：加载名册、周期清扫过期授权、（可选）从 stdin 接收在场事件。

mod feed;

use domain::{Clock, SystemClock, UptimeClock};
use keyguard_config::{AppConfig, ClockSource, StoreBackend};
use keyguard_registry::{DeviceRegistry, LoggingDispatcher, PresenceHandler, spawn_sweeper};
use keyguard_storage::{
    InMemoryPreferenceStore, PgPreferenceStore, PreferenceStore, RedisPreferenceStore,
};
use keyguard_telemetry::{init_tracing, metrics};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let store = build_store(&config).await?;
    let clock: Arc<dyn Clock> = match config.clock_source {
        ClockSource::Uptime => Arc::new(UptimeClock::new()),
        ClockSource::System => Arc::new(SystemClock),
    };

    let registry = DeviceRegistry::load(store, clock)
        .await?
        .with_field_policy(config.field_policy)
        .with_temporary_grant_seconds(config.temporary_grant_seconds)
        .into_shared();
    info!(
        target: "keyguard.node",
        devices = registry.lock().await.len(),
        backend = ?config.store_backend,
        "registry ready"
    );

    let sweeper = spawn_sweeper(
        registry.clone(),
        Duration::from_secs(config.sweep_interval_seconds),
    );

    let feed = if config.stdin_feed {
        let handler = PresenceHandler::new(registry.clone(), Arc::new(LoggingDispatcher));
        Some(tokio::spawn(feed::run_stdin_feed(handler)))
    } else {
        None
    };

    tokio::signal::ctrl_c().await?;
    info!(target: "keyguard.node", "shutdown requested");

    sweeper.abort();
    if let Some(feed) = feed {
        feed.abort();
    }

    // 退出前补一次清扫，保证过期状态落盘
    if let Err(err) = registry.lock().await.sweep_expired().await {
        warn!(target: "keyguard.node", "final sweep failed: {}", err);
    }
    let snapshot = metrics().snapshot();
    info!(
        target: "keyguard.node",
        saves_ok = snapshot.saves_ok,
        saves_failed = snapshot.saves_failed,
        records_expired = snapshot.records_expired,
        presence_events = snapshot.presence_events,
        actions_dispatched = snapshot.actions_dispatched,
        "stopped"
    );
    Ok(())
}

async fn build_store(
    config: &AppConfig,
) -> Result<Arc<dyn PreferenceStore>, Box<dyn std::error::Error>> {
    let store: Arc<dyn PreferenceStore> = match config.store_backend {
        StoreBackend::Memory => {
            warn!(target: "keyguard.node", "in-memory store: roster is lost on exit");
            Arc::new(InMemoryPreferenceStore::new())
        }
        StoreBackend::Redis => Arc::new(RedisPreferenceStore::connect(
            &config.redis_url,
            &config.store_namespace,
        )?),
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("KEYGUARD_DATABASE_URL required")?;
            Arc::new(PgPreferenceStore::connect(database_url, &config.store_namespace).await?)
        }
    };
    Ok(store)
}
