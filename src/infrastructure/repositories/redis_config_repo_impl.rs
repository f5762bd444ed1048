// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_config::ScrapeConfig;
use crate::domain::repositories::config_repository::{ConfigError, ScrapeConfigRepository};
use async_trait::async_trait;
use redis::AsyncCommands;

/// Redis配置仓库实现
///
/// 从Redis按 `<key_prefix><name>` 读取脚本JSON。
/// 适用于脚本需要在不重新部署的情况下热更新的部署形态。
pub struct RedisConfigRepository {
    /// Redis客户端
    client: redis::Client,
    /// 脚本键前缀
    key_prefix: String,
}

impl RedisConfigRepository {
    /// 创建新的Redis配置仓库实例
    ///
    /// # 参数
    ///
    /// * `redis_url` - Redis连接URL
    /// * `key_prefix` - 脚本键前缀
    ///
    /// # 返回值
    ///
    /// * `Ok(RedisConfigRepository)` - 仓库实例
    /// * `Err(ConfigError)` - URL不合法
    pub fn new(redis_url: &str, key_prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let client =
            redis::Client::open(redis_url).map_err(|e| ConfigError::Store(e.to_string()))?;
        Ok(Self {
            client,
            key_prefix: key_prefix.into(),
        })
    }
}

#[async_trait]
impl ScrapeConfigRepository for RedisConfigRepository {
    async fn load(&self, name: &str) -> Result<ScrapeConfig, ConfigError> {
        let key = format!("{}{}", self.key_prefix, name.to_lowercase());
        tracing::debug!(key, "Loading scrape configuration from Redis");

        let mut con = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| ConfigError::Store(e.to_string()))?;

        let raw: Option<String> = con
            .get(&key)
            .await
            .map_err(|e| ConfigError::Store(e.to_string()))?;
        let raw = raw.ok_or_else(|| ConfigError::NotFound(name.to_string()))?;

        let config: ScrapeConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}
