//! 日志初始化与进程级计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub saves_ok: u64,
    pub saves_failed: u64,
    pub sweeps: u64,
    pub records_expired: u64,
    pub presence_events: u64,
    pub presence_unknown: u64,
    pub actions_dispatched: u64,
    pub actions_failed: u64,
}

pub struct TelemetryMetrics {
    saves_ok: AtomicU64,
    saves_failed: AtomicU64,
    sweeps: AtomicU64,
    records_expired: AtomicU64,
    presence_events: AtomicU64,
    presence_unknown: AtomicU64,
    actions_dispatched: AtomicU64,
    actions_failed: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            saves_ok: AtomicU64::new(0),
            saves_failed: AtomicU64::new(0),
            sweeps: AtomicU64::new(0),
            records_expired: AtomicU64::new(0),
            presence_events: AtomicU64::new(0),
            presence_unknown: AtomicU64::new(0),
            actions_dispatched: AtomicU64::new(0),
            actions_failed: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            saves_ok: self.saves_ok.load(Ordering::Relaxed),
            saves_failed: self.saves_failed.load(Ordering::Relaxed),
            sweeps: self.sweeps.load(Ordering::Relaxed),
            records_expired: self.records_expired.load(Ordering::Relaxed),
            presence_events: self.presence_events.load(Ordering::Relaxed),
            presence_unknown: self.presence_unknown.load(Ordering::Relaxed),
            actions_dispatched: self.actions_dispatched.load(Ordering::Relaxed),
            actions_failed: self.actions_failed.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 记录名册整体写入成功。
pub fn record_save_ok() {
    metrics().saves_ok.fetch_add(1, Ordering::Relaxed);
}

/// 记录名册写入失败。
pub fn record_save_failed() {
    metrics().saves_failed.fetch_add(1, Ordering::Relaxed);
}

/// 记录一次清扫及其改写的记录数。
pub fn record_sweep(expired: u64) {
    let metrics = metrics();
    metrics.sweeps.fetch_add(1, Ordering::Relaxed);
    metrics.records_expired.fetch_add(expired, Ordering::Relaxed);
}

/// 记录在场事件（`known = false` 表示地址未登记）。
pub fn record_presence(known: bool) {
    let metrics = metrics();
    metrics.presence_events.fetch_add(1, Ordering::Relaxed);
    if !known {
        metrics.presence_unknown.fetch_add(1, Ordering::Relaxed);
    }
}

pub fn record_action_dispatched() {
    metrics().actions_dispatched.fetch_add(1, Ordering::Relaxed);
}

pub fn record_action_failed() {
    metrics().actions_failed.fetch_add(1, Ordering::Relaxed);
}
