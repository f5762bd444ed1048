// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：抓取配置、行程查询和航班记录
/// - 仓库接口（repositories）：抓取脚本的加载抽象接口
/// - 服务（services）：脚本执行与数据提取的领域服务
///
/// 领域层是系统的核心，不依赖于具体的存储实现，
/// 体现了纯粹的业务逻辑和业务规则。
pub mod models;
pub mod repositories;
pub mod services;
