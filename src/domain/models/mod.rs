// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 抓取配置（scrape_config）：声明式的导航脚本与提取规则
/// - 行程查询（trip）：脚本变量替换消费的查询参数
/// - 航班记录（flight）：提取产出的结构化记录
/// - 爬取报告（crawl）：一次爬取的完整产出
pub mod crawl;
pub mod flight;
pub mod scrape_config;
pub mod trip;
