// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 行程查询
///
/// 脚本变量替换消费的查询参数：IATA机场代码与ISO日期，
/// 均为自由文本，核心不做格式校验。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripQuery {
    /// 出发机场代码
    pub origin: String,
    /// 到达机场代码
    pub destination: String,
    /// 出发日期
    pub departure_date: String,
    /// 返程日期
    pub return_date: String,
}

impl TripQuery {
    /// 创建新的行程查询
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: impl Into<String>,
        return_date: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            departure_date: departure_date.into(),
            return_date: return_date.into(),
        }
    }

    /// 展开为变量名到值的映射，供占位符替换使用
    pub fn variables(&self) -> HashMap<String, String> {
        HashMap::from([
            ("origin".to_string(), self.origin.clone()),
            ("destination".to_string(), self.destination.clone()),
            ("departure_date".to_string(), self.departure_date.clone()),
            ("return_date".to_string(), self.return_date.clone()),
        ])
    }
}
