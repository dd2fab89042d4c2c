//! Redis 偏好槽位存储实现
//!
//! 键格式：`{namespace}:pref:{key}`，值为原始字节。

use crate::error::StorageError;
use crate::traits::PreferenceStore;
use redis::AsyncCommands;

fn slot_key(namespace: &str, key: &str) -> String {
    format!("{}:pref:{}", namespace, key)
}

/// Redis 偏好槽位存储
pub struct RedisPreferenceStore {
    client: redis::Client,
    namespace: String,
}

impl RedisPreferenceStore {
    pub fn new(client: redis::Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    pub fn connect(redis_url: &str, namespace: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self::new(client, namespace))
    }
}

#[async_trait::async_trait]
impl PreferenceStore for RedisPreferenceStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let mut connection = self.client.get_multiplexed_tokio_connection().await?;
        let data: Option<Vec<u8>> = connection.get(slot_key(&self.namespace, key)).await?;
        Ok(data)
    }

    async fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut connection = self.client.get_multiplexed_tokio_connection().await?;
        connection
            .set::<_, _, ()>(slot_key(&self.namespace, key), value.to_vec())
            .await?;
        Ok(())
    }
}
