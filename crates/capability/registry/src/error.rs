use keyguard_storage::StorageError;

/// 注册表操作错误。
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("device not found: {0}")]
    NotFound(String),
    #[error("{field} too long: {len} bytes (capacity {capacity})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        capacity: usize,
    },
    #[error("roster full: {0} devices")]
    RosterFull(usize),
    /// 名册写入失败；内存中的变更已生效。
    #[error("persistence error: {0}")]
    Persistence(#[from] StorageError),
}
