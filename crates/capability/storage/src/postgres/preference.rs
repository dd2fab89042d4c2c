//! Postgres 偏好槽位存储实现
//!
//! 设计要点：
//! - `(namespace, key)` 作为主键，写入使用 upsert 覆盖
//! - 使用参数化 SQL 防止注入

use crate::error::StorageError;
use crate::traits::PreferenceStore;
use sqlx::{PgPool, Row};

const CREATE_TABLE: &str = "create table if not exists preferences ( \
     namespace text not null, \
     key text not null, \
     value bytea not null, \
     updated_at timestamptz not null default now(), \
     primary key (namespace, key))";

pub struct PgPreferenceStore {
    pub pool: PgPool,
    namespace: String,
}

impl PgPreferenceStore {
    pub fn new(pool: PgPool, namespace: impl Into<String>) -> Self {
        Self {
            pool,
            namespace: namespace.into(),
        }
    }

    pub async fn connect(database_url: &str, namespace: &str) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url).await?;
        let store = Self::new(pool, namespace);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// 建表（幂等）。
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl PreferenceStore for PgPreferenceStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let row = sqlx::query("select value from preferences where namespace = $1 and key = $2")
            .bind(&self.namespace)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(row.try_get("value")?)),
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        sqlx::query(
            "insert into preferences (namespace, key, value) values ($1, $2, $3) \
             on conflict (namespace, key) do update set value = excluded.value, updated_at = now()",
        )
        .bind(&self.namespace)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
