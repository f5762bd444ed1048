// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::browser::traits::{BrowserSession, Key, SessionError};
use crate::domain::models::scrape_config::{Action, Step, StepArg};
use crate::domain::repositories::config_repository::ConfigError;
use crate::utils::errors::CrawlError;
use std::time::Duration;
use url::Url;

/// 步骤执行器
///
/// 将单个已解析的步骤分发到对应的浏览器自动化原语。
/// 步骤必须先经过变量替换；执行器假定参数中不再包含占位符。
pub struct StepExecutor;

impl StepExecutor {
    /// 执行单个步骤
    ///
    /// # 参数
    ///
    /// * `session` - 浏览器会话
    /// * `name` - 步骤名称（用于错误定位）
    /// * `step` - 已完成变量替换的步骤
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 步骤执行成功
    /// * `Err(CrawlError)` - 步骤失败，调用方应中止所在阶段
    pub async fn execute<S: BrowserSession + ?Sized>(
        session: &S,
        name: &str,
        step: &Step,
    ) -> Result<(), CrawlError> {
        tracing::debug!(step = name, action = step.action.as_str(), "Executing step");

        match (step.action, &step.att) {
            (Action::Goto, StepArg::Text(url)) => {
                Url::parse(url).map_err(|e| CrawlError::InvalidUrl {
                    step: name.to_string(),
                    url: url.clone(),
                    reason: e.to_string(),
                })?;
                session
                    .goto(url)
                    .await
                    .map_err(|e| Self::step_failed(name, e))
            }
            (
                Action::ClickElement,
                StepArg::Target {
                    element: Some(element),
                    ..
                },
            ) => session
                .click(element)
                .await
                .map_err(|e| Self::step_failed(name, e)),
            (
                Action::Input,
                StepArg::Target {
                    element: Some(element),
                    value: Some(value),
                },
            ) => session
                .type_text(element, value)
                .await
                .map_err(|e| Self::step_failed(name, e)),
            (
                Action::PressKey,
                StepArg::Target {
                    element,
                    value: Some(value),
                },
            ) => {
                let key = value
                    .parse::<Key>()
                    .map_err(|key| ConfigError::UnsupportedKey {
                        step: name.to_string(),
                        key,
                    })?;
                session
                    .press_key(element.as_deref(), key)
                    .await
                    .map_err(|e| Self::step_failed(name, e))
            }
            (Action::Wait, StepArg::Seconds(seconds)) => {
                session.wait(Duration::from_secs(*seconds)).await;
                Ok(())
            }
            // Shape mismatches are caught at load time; this keeps the dispatch total
            (action, _) => Err(CrawlError::Config(ConfigError::AttMismatch {
                step: name.to_string(),
                action: action.as_str(),
            })),
        }
    }

    fn step_failed(name: &str, source: SessionError) -> CrawlError {
        CrawlError::Step {
            step: name.to_string(),
            source,
        }
    }
}
