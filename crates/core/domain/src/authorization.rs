//! 授权状态三态模型。
//!
//! 内存中使用显式枚举；仅在持久化边界映射为旧版单整数编码：
//! - `0`：永久授权
//! - `1`：已撤销 / 已过期（哨兵值）
//! - `t > 1`：临时授权，截止到时钟秒数 `t`

use serde::Serialize;

const RAW_PERMANENT: u32 = 0;
const RAW_REVOKED: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "until", rename_all = "snake_case")]
pub enum Authorization {
    Permanent,
    Revoked,
    TemporaryUntil(u32),
}

impl Authorization {
    /// 临时授权：`now + duration_seconds`，饱和加法，且不会落到哨兵值上。
    ///
    /// 截止时间算出来是 0 或 1 时会被抬到 2，此时有效窗口比
    /// `[now, now + duration_seconds)` 更长，例如 `temporary(0, 1)` 在第 1 秒仍然有效。
    pub fn temporary(now: u32, duration_seconds: u32) -> Self {
        let until = now.saturating_add(duration_seconds).max(RAW_REVOKED + 1);
        Self::TemporaryUntil(until)
    }

    pub fn from_raw(raw: u32) -> Self {
        match raw {
            RAW_PERMANENT => Self::Permanent,
            RAW_REVOKED => Self::Revoked,
            until => Self::TemporaryUntil(until),
        }
    }

    pub fn to_raw(self) -> u32 {
        match self {
            Self::Permanent => RAW_PERMANENT,
            Self::Revoked => RAW_REVOKED,
            Self::TemporaryUntil(until) => until,
        }
    }

    /// 按当前时钟实时判断，不依赖清扫是否已经执行。
    pub fn is_active(self, now: u32) -> bool {
        match self {
            Self::Permanent => true,
            Self::Revoked => false,
            Self::TemporaryUntil(until) => until > now,
        }
    }

    /// 临时授权已过截止时间、等待清扫改写。
    pub fn is_lapsed(self, now: u32) -> bool {
        matches!(self, Self::TemporaryUntil(until) if until <= now)
    }

    pub fn status(self, now: u32) -> AuthorizationStatus {
        match self {
            Self::Permanent => AuthorizationStatus::Permanent,
            Self::TemporaryUntil(until) if until > now => AuthorizationStatus::Temporary {
                remaining_secs: until - now,
            },
            _ => AuthorizationStatus::Unauthorized,
        }
    }
}

/// 管理面展示用的授权状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthorizationStatus {
    Permanent,
    Temporary { remaining_secs: u32 },
    Unauthorized,
}

impl AuthorizationStatus {
    pub fn is_authorized(self) -> bool {
        !matches!(self, Self::Unauthorized)
    }
}

/// 剩余时间格式化为 `HH:MM:SS`（小时不封顶）。
pub fn format_hms(secs: u32) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
