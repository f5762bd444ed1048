// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::flight::FlightRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 爬取报告
///
/// 一次爬取调用的完整产出：提取到的航班记录及运行元数据。
/// 失败的爬取不产生报告，只产生错误。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    /// 爬取调用唯一标识符
    pub crawl_id: Uuid,
    /// 航空公司配置名称
    pub airline: String,
    /// 配置描述
    pub description: String,
    /// 按文档顺序排列的航班记录（可以为空，表示未找到航班）
    pub records: Vec<FlightRecord>,
    /// 爬取开始时间
    pub started_at: DateTime<Utc>,
    /// 爬取结束时间
    pub finished_at: DateTime<Utc>,
}
