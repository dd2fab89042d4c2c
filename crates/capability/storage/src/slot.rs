//! 类型化槽位读写
//!
//! 在字节级 `PreferenceStore` 之上提供固定宽度的类型：
//! - `u16` / `u32`：小端序
//! - 定长字符串：64 字节，NUL 填充，内容最多 63 字节
//!
//! 槽位长度与期望宽度不符时视为不可读（返回 `None`），
//! 后端本身的错误照常向上传播。

use crate::error::StorageError;
use crate::traits::PreferenceStore;

/// 定长字符串槽位的字节宽度。
pub const STRING_SLOT_LEN: usize = 64;

/// 按字节容量截断，且不切断 UTF-8 字符。
pub fn truncate_to_capacity(value: &str, capacity: usize) -> &str {
    if value.len() <= capacity {
        return value;
    }
    let mut end = capacity;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// 编码定长字符串槽位（超长部分静默截断）。
pub fn encode_string_slot(value: &str) -> [u8; STRING_SLOT_LEN] {
    let mut buf = [0u8; STRING_SLOT_LEN];
    let content = truncate_to_capacity(value, STRING_SLOT_LEN - 1);
    buf[..content.len()].copy_from_slice(content.as_bytes());
    buf
}

/// 解码定长字符串槽位；宽度不符或非 UTF-8 时返回 `None`。
pub fn decode_string_slot(bytes: &[u8]) -> Option<String> {
    if bytes.len() != STRING_SLOT_LEN {
        return None;
    }
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end]).ok().map(str::to_string)
}

pub async fn load_u16(store: &dyn PreferenceStore, key: &str) -> Result<Option<u16>, StorageError> {
    let value = store.load(key).await?;
    Ok(value.and_then(|bytes| <[u8; 2]>::try_from(bytes.as_slice()).ok().map(u16::from_le_bytes)))
}

pub async fn save_u16(store: &dyn PreferenceStore, key: &str, value: u16) -> Result<(), StorageError> {
    store.save(key, &value.to_le_bytes()).await
}

pub async fn load_u32(store: &dyn PreferenceStore, key: &str) -> Result<Option<u32>, StorageError> {
    let value = store.load(key).await?;
    Ok(value.and_then(|bytes| <[u8; 4]>::try_from(bytes.as_slice()).ok().map(u32::from_le_bytes)))
}

pub async fn save_u32(store: &dyn PreferenceStore, key: &str, value: u32) -> Result<(), StorageError> {
    store.save(key, &value.to_le_bytes()).await
}

pub async fn load_string(
    store: &dyn PreferenceStore,
    key: &str,
) -> Result<Option<String>, StorageError> {
    let value = store.load(key).await?;
    Ok(value.as_deref().and_then(decode_string_slot))
}

pub async fn save_string(
    store: &dyn PreferenceStore,
    key: &str,
    value: &str,
) -> Result<(), StorageError> {
    store.save(key, &encode_string_slot(value)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundary() {
        // "é" 占 2 字节，62 个 'a' + "é" = 64 字节，截断到 63 时不能切半个字符
        let value = format!("{}é", "a".repeat(62));
        let truncated = truncate_to_capacity(&value, 63);
        assert_eq!(truncated.len(), 62);
        assert_eq!(truncate_to_capacity(truncated, 63), truncated);
    }

    #[test]
    fn string_slot_is_nul_padded() {
        let slot = encode_string_slot("Fob1");
        assert_eq!(&slot[..4], b"Fob1");
        assert!(slot[4..].iter().all(|b| *b == 0));
        assert_eq!(decode_string_slot(&slot).as_deref(), Some("Fob1"));
    }

    #[test]
    fn string_slot_keeps_terminator() {
        let slot = encode_string_slot(&"x".repeat(100));
        assert_eq!(slot[STRING_SLOT_LEN - 1], 0);
        assert_eq!(decode_string_slot(&slot).map(|s| s.len()), Some(63));
    }

    #[test]
    fn wrong_width_is_unreadable() {
        assert!(decode_string_slot(b"short").is_none());
    }
}
