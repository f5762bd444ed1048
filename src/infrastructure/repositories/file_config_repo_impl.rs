// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_config::ScrapeConfig;
use crate::domain::repositories::config_repository::{ConfigError, ScrapeConfigRepository};
use async_trait::async_trait;
use std::path::PathBuf;

/// 文件配置仓库实现
///
/// 从目录中读取 `<name>.json`（名称小写化匹配），
/// 每家航空公司一个文件。
pub struct FileConfigRepository {
    /// 脚本文件目录
    dir: PathBuf,
}

impl FileConfigRepository {
    /// 创建新的文件配置仓库实例
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ScrapeConfigRepository for FileConfigRepository {
    async fn load(&self, name: &str) -> Result<ScrapeConfig, ConfigError> {
        let path = self.dir.join(format!("{}.json", name.to_lowercase()));
        tracing::debug!(path = %path.display(), "Loading scrape configuration");

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(name.to_string()));
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config: ScrapeConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}
