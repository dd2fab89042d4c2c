//! 应用运行配置加载。

use domain::FieldPolicy;
use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 持久化后端。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Redis,
    Postgres,
}

/// 时钟来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// 进程启动以来的秒数（旧固件语义）。
    Uptime,
    /// Unix 秒数。
    System,
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_backend: StoreBackend,
    pub redis_url: String,
    pub database_url: Option<String>,
    pub store_namespace: String,
    pub sweep_interval_seconds: u64,
    pub field_policy: FieldPolicy,
    pub clock_source: ClockSource,
    pub temporary_grant_seconds: u32,
    pub stdin_feed: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_backend = match read_lowercase_or("KEYGUARD_STORE", "memory").as_str() {
            "memory" => StoreBackend::Memory,
            "redis" => StoreBackend::Redis,
            "postgres" => StoreBackend::Postgres,
            other => return Err(ConfigError::Invalid("KEYGUARD_STORE".to_string(), other.to_string())),
        };
        let redis_url = env::var("KEYGUARD_REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let database_url = read_optional("KEYGUARD_DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("KEYGUARD_DATABASE_URL".to_string()));
        }
        let store_namespace =
            read_optional("KEYGUARD_STORE_NAMESPACE").unwrap_or_else(|| "keyguard".to_string());
        let sweep_interval_seconds = read_u64_with_default("KEYGUARD_SWEEP_INTERVAL_SECONDS", 1)?;
        if sweep_interval_seconds == 0 {
            return Err(ConfigError::Invalid(
                "KEYGUARD_SWEEP_INTERVAL_SECONDS".to_string(),
                "0".to_string(),
            ));
        }
        let policy = read_lowercase_or("KEYGUARD_FIELD_POLICY", "reject");
        let field_policy = FieldPolicy::parse(&policy)
            .ok_or_else(|| ConfigError::Invalid("KEYGUARD_FIELD_POLICY".to_string(), policy))?;
        let clock_source = match read_lowercase_or("KEYGUARD_CLOCK", "uptime").as_str() {
            "uptime" => ClockSource::Uptime,
            "system" => ClockSource::System,
            other => return Err(ConfigError::Invalid("KEYGUARD_CLOCK".to_string(), other.to_string())),
        };
        let temporary_grant_seconds =
            read_u32_with_default("KEYGUARD_TEMPORARY_GRANT_SECONDS", 86_400)?;
        let stdin_feed = read_bool_with_default("KEYGUARD_STDIN_FEED", false);

        Ok(Self {
            store_backend,
            redis_url,
            database_url,
            store_namespace,
            sweep_interval_seconds,
            field_policy,
            clock_source,
            temporary_grant_seconds,
            stdin_feed,
        })
    }
}

fn read_lowercase_or(key: &str, default: &str) -> String {
    read_optional(key)
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_else(|| default.to_string())
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
