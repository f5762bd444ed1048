// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_config::ScrapeConfig;
use async_trait::async_trait;
use thiserror::Error;

/// 配置错误类型
///
/// 所有变体都是致命的：配置错误意味着爬取不会开始。
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置未找到
    #[error("Scrape configuration not found: {0}")]
    NotFound(String),
    /// JSON格式错误
    #[error("Malformed scrape configuration: {0}")]
    Malformed(#[from] serde_json::Error),
    /// 缺少main阶段
    #[error("Script must define a non-empty main phase")]
    MissingMainPhase,
    /// att形状与动作不匹配
    #[error("Step '{step}': att shape does not match action '{action}'")]
    AttMismatch { step: String, action: &'static str },
    /// 不支持的按键名称
    #[error("Step '{step}': unsupported key '{key}' (expected return, enter or escape)")]
    UnsupportedKey { step: String, key: String },
    /// 提取字段集合为空
    #[error("Result group must declare at least one extraction field")]
    EmptyFieldSet,
    /// 变量占位符未解析
    #[error("Step '{step}': unresolved placeholder '{{{{{placeholder}}}}}'")]
    UnresolvedPlaceholder { step: String, placeholder: String },
    /// 读取配置的I/O错误
    #[error("Failed to read scrape configuration: {0}")]
    Io(#[from] std::io::Error),
    /// 存储后端错误
    #[error("Config store error: {0}")]
    Store(String),
}

/// 抓取配置仓库特质
///
/// 按名称加载一份抓取配置；实现负责解析和结构校验，
/// 返回的配置保证通过 `ScrapeConfig::validate`。
#[async_trait]
pub trait ScrapeConfigRepository: Send + Sync {
    /// 按名称加载配置
    async fn load(&self, name: &str) -> Result<ScrapeConfig, ConfigError>;
}
