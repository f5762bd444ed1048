// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::browser::traits::BrowserSession;
use crate::domain::models::crawl::CrawlReport;
use crate::domain::models::flight::FlightRecord;
use crate::domain::models::scrape_config::ScrapeConfig;
use crate::domain::models::trip::TripQuery;
use crate::domain::repositories::config_repository::ScrapeConfigRepository;
use crate::domain::services::extraction_service::ExtractionService;
use crate::domain::services::script_runner::ScriptRunner;
use crate::utils::errors::CrawlError;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// 爬取阶段状态
///
/// 状态严格顺序推进，一次爬取内不跳过也不回退。
/// before或main阶段失败进入终态Failed，不再尝试提取。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// 配置已加载
    Loaded,
    /// 前置阶段已完成
    BeforeRan,
    /// 主阶段已完成
    MainRan,
    /// 提取已完成
    Extracted,
    /// 后置阶段已完成
    AfterRan,
    /// 爬取失败（终态）
    Failed,
}

/// 爬取服务
///
/// 编排一次完整的爬取调用：加载配置、执行脚本阶段、
/// 提取航班记录。浏览器会话在所有退出路径上都会被关闭。
pub struct CrawlService {
    /// 抓取配置仓库
    config_repo: Arc<dyn ScrapeConfigRepository>,
}

impl CrawlService {
    /// 创建新的爬取服务实例
    pub fn new(config_repo: Arc<dyn ScrapeConfigRepository>) -> Self {
        Self { config_repo }
    }

    /// 执行一次完整爬取
    ///
    /// 会话由调用方提供，本次爬取独占；无论成功还是失败，
    /// 返回前都会关闭会话。失败的爬取产出零条记录和失败原因，
    /// 从不产出部分填充的结果集。
    ///
    /// # 参数
    ///
    /// * `airline` - 配置名称
    /// * `query` - 行程查询参数
    /// * `session` - 本次爬取独占的浏览器会话
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlReport)` - 爬取报告
    /// * `Err(CrawlError)` - 失败原因
    pub async fn crawl<S: BrowserSession>(
        &self,
        airline: &str,
        query: &TripQuery,
        mut session: S,
    ) -> Result<CrawlReport, CrawlError> {
        let crawl_id = Uuid::new_v4();
        let started_at = Utc::now();
        tracing::info!(
            %crawl_id,
            airline,
            origin = %query.origin,
            destination = %query.destination,
            departure_date = %query.departure_date,
            return_date = %query.return_date,
            "Starting crawl"
        );

        let result = match self.config_repo.load(airline).await {
            Ok(config) => Self::drive(&session, &config, query)
                .await
                .map(|records| (config, records)),
            Err(e) => Err(CrawlError::Config(e)),
        };

        // Release the session on every exit path
        if let Err(e) = session.close().await {
            tracing::warn!(%crawl_id, error = %e, "Failed to close browser session");
        }

        match result {
            Ok((config, records)) => {
                let report = CrawlReport {
                    crawl_id,
                    airline: airline.to_string(),
                    description: config.description,
                    records,
                    started_at,
                    finished_at: Utc::now(),
                };
                tracing::info!(%crawl_id, records = report.records.len(), "Crawl finished");
                Ok(report)
            }
            Err(e) => {
                tracing::error!(%crawl_id, error = %e, "Crawl failed");
                Err(e)
            }
        }
    }

    async fn drive<S: BrowserSession>(
        session: &S,
        config: &ScrapeConfig,
        query: &TripQuery,
    ) -> Result<Vec<FlightRecord>, CrawlError> {
        let mut state = CrawlState::Loaded;
        let runner = ScriptRunner::new(session, &config.script, query);

        match runner.run_before().await {
            Ok(()) => state = CrawlState::BeforeRan,
            Err(e) => {
                state = CrawlState::Failed;
                tracing::error!(?state, "Before phase failed");
                return Err(e);
            }
        }

        match runner.run_main().await {
            Ok(()) => state = CrawlState::MainRan,
            Err(e) => {
                state = CrawlState::Failed;
                tracing::error!(?state, "Main phase failed");
                return Err(e);
            }
        }

        // Extraction happens exactly once, against the session's current page
        let extracted = match session.current_document().await {
            Ok(html) => ExtractionService::extract_all(&html, &config.tag.result_group),
            Err(e) => Err(CrawlError::Session(e)),
        };
        let records = match extracted {
            Ok(records) => {
                state = CrawlState::Extracted;
                records
            }
            Err(e) => {
                state = CrawlState::Failed;
                tracing::error!(?state, "Extraction failed");
                return Err(e);
            }
        };

        match runner.run_after().await {
            Ok(()) => state = CrawlState::AfterRan,
            Err(e) => {
                state = CrawlState::Failed;
                tracing::error!(?state, "After phase failed");
                return Err(e);
            }
        }

        tracing::debug!(?state, "Crawl state machine complete");
        Ok(records)
    }
}
