// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 航班记录
///
/// 从一个组根节点提取出的结构化记录。字段集合由配置的
/// `items.elements` 决定；定位器未匹配到节点的字段值为 `None`。
/// 所有值都是提取到的原始文本，核心不做类型转换。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// 字段名到提取文本的映射，保持配置中的字段顺序
    #[serde(flatten)]
    fields: IndexMap<String, Option<String>>,
}

impl FlightRecord {
    /// 写入一个字段（`None` 表示定位器未匹配到内容）
    pub fn set(&mut self, field: impl Into<String>, value: Option<String>) {
        self.fields.insert(field.into(), value);
    }

    /// 读取一个字段的提取文本
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_deref())
    }

    /// 字段是否存在于记录中（即使值缺失）
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// 记录中的字段名，保持配置顺序
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
