use domain::FieldPolicy;
use keyguard_config::{AppConfig, ClockSource, StoreBackend};

// 环境变量为进程级状态，所有断言放在同一个测试里顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("KEYGUARD_STORE", "redis");
        std::env::set_var("KEYGUARD_REDIS_URL", "redis://10.0.0.2:6379");
        std::env::set_var("KEYGUARD_SWEEP_INTERVAL_SECONDS", "5");
        std::env::set_var("KEYGUARD_FIELD_POLICY", "Truncate");
        std::env::set_var("KEYGUARD_CLOCK", "system");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.store_backend, StoreBackend::Redis);
    assert_eq!(config.redis_url, "redis://10.0.0.2:6379");
    assert_eq!(config.sweep_interval_seconds, 5);
    assert_eq!(config.field_policy, FieldPolicy::Truncate);
    assert_eq!(config.clock_source, ClockSource::System);
    assert_eq!(config.temporary_grant_seconds, 86_400);
    assert_eq!(config.store_namespace, "keyguard");
    assert!(!config.stdin_feed);

    unsafe {
        std::env::set_var("KEYGUARD_STORE", "postgres");
        std::env::remove_var("KEYGUARD_DATABASE_URL");
    }
    assert!(AppConfig::from_env().is_err());

    unsafe {
        std::env::set_var("KEYGUARD_STORE", "memory");
        std::env::set_var("KEYGUARD_SWEEP_INTERVAL_SECONDS", "0");
    }
    assert!(AppConfig::from_env().is_err());
}
