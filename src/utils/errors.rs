// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::browser::traits::SessionError;
use crate::domain::repositories::config_repository::ConfigError;
use thiserror::Error;

/// 爬取流程错误类型
///
/// 步骤级失败对当前爬取是致命的：向上传播，不做自动重试。
#[derive(Error, Debug)]
pub enum CrawlError {
    /// 配置错误，爬取不会开始
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 步骤执行失败，中止所在阶段
    #[error("Step '{step}' failed: {source}")]
    Step {
        step: String,
        #[source]
        source: SessionError,
    },

    /// 替换后的URL不合法
    #[error("Step '{step}': invalid url '{url}': {reason}")]
    InvalidUrl {
        step: String,
        url: String,
        reason: String,
    },

    /// 提取规则中的定位器无法解析
    #[error("Invalid selector in extraction rules: '{0}'")]
    InvalidSelector(String),

    /// 会话级错误（启动、快照获取等）
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}
