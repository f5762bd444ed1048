// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::flight::FlightRecord;
use crate::domain::models::scrape_config::ResultGroupRule;
use crate::utils::errors::CrawlError;
use scraper::{ElementRef, Html, Selector};

/// 提取服务
///
/// 从HTML快照中提取航班记录。对DOM快照而言这是纯函数：
/// 不产生副作用，重试只能由调用方重新执行整次爬取。
pub struct ExtractionService;

impl ExtractionService {
    /// 提取全部航班记录
    ///
    /// 按文档顺序定位所有组根节点，对每个组根节点产出一条记录。
    /// 每个字段定位器都相对于其条目根节点求值，从不相对于文档根。
    /// 没有组根节点匹配时返回空序列，表示"未找到航班"，不是错误。
    ///
    /// # 参数
    ///
    /// * `html` - 当前页面的HTML快照
    /// * `rule` - 结果组规则
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<FlightRecord>)` - 按文档顺序排列的记录
    /// * `Err(CrawlError)` - 规则中的定位器无法解析
    pub fn extract_all(
        html: &str,
        rule: &ResultGroupRule,
    ) -> Result<Vec<FlightRecord>, CrawlError> {
        let document = Html::parse_document(html);
        let group_selector = Self::parse_selector(&rule.tag)?;
        let item_selector = Self::parse_relative(&rule.items.tag)?;

        // Parse every field selector once, surfacing rule defects before walking groups
        let mut field_selectors = Vec::with_capacity(rule.items.elements.len());
        for (field, extraction) in &rule.items.elements {
            field_selectors.push((field.as_str(), Self::parse_relative(&extraction.tag)?));
        }

        let mut records = Vec::new();
        for group_root in document.select(&group_selector) {
            // "." keeps the group root itself as the item root
            let item_root = match &item_selector {
                None => Some(group_root),
                Some(selector) => group_root.select(selector).next(),
            };

            let mut record = FlightRecord::default();
            for (field, selector) in &field_selectors {
                let value = item_root.and_then(|root| Self::first_text(root, selector.as_ref()));
                record.set(*field, value);
            }
            records.push(record);
        }

        tracing::info!(records = records.len(), "Extraction complete");
        Ok(records)
    }

    /// 提取单个字段
    ///
    /// 对节点的子树求值定位器，返回第一个匹配节点的文本。
    /// 没有匹配时返回 `None`——缺失数据是预期情况，不是错误。
    pub fn extract_field(
        node: ElementRef<'_>,
        locator: &str,
    ) -> Result<Option<String>, CrawlError> {
        let selector = Self::parse_relative(locator)?;
        Ok(Self::first_text(node, selector.as_ref()))
    }

    // "." selects the context node itself; anything else is a CSS selector
    fn parse_relative(locator: &str) -> Result<Option<Selector>, CrawlError> {
        if locator == "." {
            Ok(None)
        } else {
            Self::parse_selector(locator).map(Some)
        }
    }

    fn parse_selector(locator: &str) -> Result<Selector, CrawlError> {
        Selector::parse(locator).map_err(|_| CrawlError::InvalidSelector(locator.to_string()))
    }

    fn first_text(node: ElementRef<'_>, selector: Option<&Selector>) -> Option<String> {
        let target = match selector {
            None => Some(node),
            Some(selector) => node.select(selector).next(),
        };

        target.and_then(|element| {
            let text = element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        })
    }
}
