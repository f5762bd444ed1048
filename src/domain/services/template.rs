// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scrape_config::{Phase, Step, StepArg};
use crate::domain::repositories::config_repository::ConfigError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder regex is valid"));

/// 模板服务
///
/// 在执行前将 `{{name}}` 占位符替换为查询变量，产出完全解析的步骤。
/// 每个阶段整体解析一次：阶段内任一步骤存在未绑定的占位符时，
/// 该阶段的任何步骤都不会执行。
pub struct TemplateService;

impl TemplateService {
    /// 解析一个阶段的全部步骤
    ///
    /// # 参数
    ///
    /// * `phase` - 按配置顺序排列的命名步骤
    /// * `variables` - 变量名到值的映射
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<(String, Step)>)` - 完全解析后的步骤，保持配置顺序
    /// * `Err(ConfigError)` - 第一个未解析的占位符
    pub fn resolve_phase(
        phase: &Phase,
        variables: &HashMap<String, String>,
    ) -> Result<Vec<(String, Step)>, ConfigError> {
        phase
            .iter()
            .map(|(name, step)| {
                let att = Self::resolve_att(name, &step.att, variables)?;
                Ok((
                    name.clone(),
                    Step {
                        action: step.action,
                        att,
                    },
                ))
            })
            .collect()
    }

    fn resolve_att(
        step: &str,
        att: &StepArg,
        variables: &HashMap<String, String>,
    ) -> Result<StepArg, ConfigError> {
        match att {
            StepArg::Seconds(seconds) => Ok(StepArg::Seconds(*seconds)),
            StepArg::Text(text) => Ok(StepArg::Text(Self::resolve_str(step, text, variables)?)),
            StepArg::Target { element, value } => Ok(StepArg::Target {
                element: element
                    .as_ref()
                    .map(|e| Self::resolve_str(step, e, variables))
                    .transpose()?,
                value: value
                    .as_ref()
                    .map(|v| Self::resolve_str(step, v, variables))
                    .transpose()?,
            }),
        }
    }

    fn resolve_str(
        step: &str,
        input: &str,
        variables: &HashMap<String, String>,
    ) -> Result<String, ConfigError> {
        let resolved = PLACEHOLDER.replace_all(input, |caps: &Captures| {
            variables
                .get(&caps[1])
                .cloned()
                // Leave unknown placeholders in place so they are reported below
                .unwrap_or_else(|| caps[0].to_string())
        });

        if let Some(caps) = PLACEHOLDER.captures(&resolved) {
            return Err(ConfigError::UnresolvedPlaceholder {
                step: step.to_string(),
                placeholder: caps[1].to_string(),
            });
        }

        Ok(resolved.into_owned())
    }
}
