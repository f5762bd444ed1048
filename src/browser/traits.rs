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

use async_trait::async_trait;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// 会话错误类型
#[derive(Error, Debug)]
pub enum SessionError {
    /// 页面导航失败
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    /// 元素未找到
    #[error("Element not found: {0}")]
    ElementNotFound(String),
    /// 浏览器错误
    #[error("Browser error: {0}")]
    Browser(String),
}

/// 可发送的按键
///
/// 按键名称在配置加载时校验，未知名称是配置错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Return,
    Enter,
    Escape,
}

impl Key {
    /// 对应的DOM KeyboardEvent键名
    pub fn dom_key(&self) -> &'static str {
        match self {
            Key::Return | Key::Enter => "Enter",
            Key::Escape => "Escape",
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "return" => Ok(Key::Return),
            "enter" => Ok(Key::Enter),
            "escape" => Ok(Key::Escape),
            other => Err(other.to_string()),
        }
    }
}

/// 浏览器会话特质
///
/// 爬取引擎消费的浏览器自动化能力集。一次爬取独占一个会话，
/// 会话内的操作严格顺序执行。
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 导航到指定URL并等待页面加载
    async fn goto(&self, url: &str) -> Result<(), SessionError>;

    /// 点击匹配定位器的元素（多个匹配时取文档序第一个）
    async fn click(&self, locator: &str) -> Result<(), SessionError>;

    /// 清空并向匹配定位器的输入框输入文本
    async fn type_text(&self, locator: &str, text: &str) -> Result<(), SessionError>;

    /// 向目标元素（或当前聚焦元素）发送按键
    async fn press_key(&self, locator: Option<&str>, key: Key) -> Result<(), SessionError>;

    /// 静态等待，不检查页面内容
    async fn wait(&self, duration: Duration);

    /// 获取当前页面的HTML快照
    async fn current_document(&self) -> Result<String, SessionError>;

    /// 关闭会话并释放浏览器资源
    async fn close(&mut self) -> Result<(), SessionError>;
}
