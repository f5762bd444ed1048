// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::browser::traits::BrowserSession;
use crate::domain::models::scrape_config::{Phase, Script};
use crate::domain::models::trip::TripQuery;
use crate::domain::services::step_executor::StepExecutor;
use crate::domain::services::template::TemplateService;
use crate::utils::errors::CrawlError;
use std::collections::HashMap;

/// 脚本运行器
///
/// 按 before、main、after 的固定顺序执行脚本阶段。阶段内的步骤
/// 严格按配置顺序串行执行；任一步骤失败即中止该阶段并向上传播，
/// 已执行步骤在浏览器会话上产生的副作用不会回滚。
pub struct ScriptRunner<'a, S: BrowserSession + ?Sized> {
    /// 浏览器会话
    session: &'a S,
    /// 导航脚本
    script: &'a Script,
    /// 查询变量
    variables: HashMap<String, String>,
}

impl<'a, S: BrowserSession + ?Sized> ScriptRunner<'a, S> {
    /// 创建新的脚本运行器
    pub fn new(session: &'a S, script: &'a Script, query: &TripQuery) -> Self {
        Self {
            session,
            script,
            variables: query.variables(),
        }
    }

    /// 执行前置阶段
    pub async fn run_before(&self) -> Result<(), CrawlError> {
        self.run_phase("before", &self.script.before).await
    }

    /// 执行主阶段
    pub async fn run_main(&self) -> Result<(), CrawlError> {
        self.run_phase("main", &self.script.main).await
    }

    /// 执行后置阶段
    pub async fn run_after(&self) -> Result<(), CrawlError> {
        self.run_phase("after", &self.script.after).await
    }

    async fn run_phase(&self, label: &str, phase: &Phase) -> Result<(), CrawlError> {
        if phase.is_empty() {
            tracing::debug!(phase = label, "Phase is empty, skipping");
            return Ok(());
        }

        // Resolve the whole phase up front: every placeholder must be bound
        // before any of its steps executes
        let resolved = TemplateService::resolve_phase(phase, &self.variables)?;

        tracing::info!(phase = label, steps = resolved.len(), "Running phase");
        for (name, step) in &resolved {
            StepExecutor::execute(self.session, name, step)
                .await
                .map_err(|e| {
                    tracing::error!(
                        phase = label,
                        step = name.as_str(),
                        error = %e,
                        "Step failed, aborting phase"
                    );
                    e
                })?;
        }

        Ok(())
    }
}
