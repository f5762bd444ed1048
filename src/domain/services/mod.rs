// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务：
/// - 模板服务（template）：步骤参数中的变量占位符替换
/// - 步骤执行器（step_executor）：将单个步骤分发到浏览器原语
/// - 脚本运行器（script_runner）：按固定顺序执行三个阶段
/// - 提取服务（extraction_service）：从HTML快照提取航班记录
/// - 爬取服务（crawl_service）：编排一次完整的爬取调用
pub mod crawl_service;
pub mod extraction_service;
pub mod script_runner;
pub mod step_executor;
pub mod template;
