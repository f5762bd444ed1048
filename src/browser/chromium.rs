// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::browser::traits::{BrowserSession, Key, SessionError};
use crate::config::settings::BrowserSettings;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Chromium浏览器会话
///
/// 基于chromiumoxide通过CDP驱动的浏览器会话实现。
/// 每次爬取启动（或附加到）一个独立的浏览器实例，会话之间互不共享。
pub struct ChromiumSession {
    /// 浏览器实例
    browser: Browser,
    /// 当前页面
    page: Page,
    /// CDP事件处理任务
    handler_task: JoinHandle<()>,
}

impl ChromiumSession {
    /// 启动新的浏览器会话
    ///
    /// 优先附加到 `CHROMIUM_REMOTE_DEBUGGING_URL`（或配置中指定的远程调试地址），
    /// 否则按照配置启动本地Chromium进程。
    ///
    /// # 参数
    ///
    /// * `settings` - 浏览器启动配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ChromiumSession)` - 就绪的浏览器会话
    /// * `Err(SessionError)` - 启动或连接失败
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, SessionError> {
        let remote_debugging_url = settings
            .remote_debugging_url
            .clone()
            .or_else(|| std::env::var("CHROMIUM_REMOTE_DEBUGGING_URL").ok());

        let (browser, mut handler) = if let Some(ref url) = remote_debugging_url {
            tracing::info!("Connecting to remote Chrome instance at: {}", url);
            Browser::connect(url).await.map_err(|e| {
                SessionError::Browser(format!("Failed to connect to remote Chrome: {}", e))
            })?
        } else {
            let mut builder = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(Duration::from_secs(settings.request_timeout));

            if !settings.headless {
                builder = builder.with_head();
            }

            for arg in &settings.args {
                builder = builder.arg(arg.as_str());
            }

            Browser::launch(
                builder
                    .build()
                    .map_err(|e| SessionError::Browser(e.to_string()))?,
            )
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))?
        };

        // Drain CDP events until the browser goes away
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SessionError::Browser(e.to_string()))?;

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    async fn find(&self, locator: &str) -> Result<Element, SessionError> {
        // find_element resolves the first match in document order
        self.page
            .find_element(locator)
            .await
            .map_err(|_| SessionError::ElementNotFound(locator.to_string()))
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn goto(&self, url: &str) -> Result<(), SessionError> {
        tracing::info!("Navigating to URL: {}", url);
        // goto waits for the load event by default
        self.page
            .goto(url)
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn click(&self, locator: &str) -> Result<(), SessionError> {
        tracing::debug!("Clicking element: {}", locator);
        self.find(locator)
            .await?
            .click()
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Browser(format!("Click failed on {}: {}", locator, e)))
    }

    async fn type_text(&self, locator: &str, text: &str) -> Result<(), SessionError> {
        tracing::debug!("Typing into element: {}", locator);
        let element = self.find(locator).await?;
        element
            .click()
            .await
            .map_err(|e| SessionError::Browser(format!("Focus failed on {}: {}", locator, e)))?;

        // Clear any existing value before typing
        self.page
            .evaluate(format!(
                "document.querySelector('{}').value = ''",
                locator.replace('\'', "\\'")
            ))
            .await
            .map_err(|e| SessionError::Browser(format!("Clear failed on {}: {}", locator, e)))?;

        element
            .type_str(text)
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Browser(format!("Input failed on {}: {}", locator, e)))
    }

    async fn press_key(&self, locator: Option<&str>, key: Key) -> Result<(), SessionError> {
        if let Some(locator) = locator {
            tracing::debug!("Pressing '{}' on element: {}", key.dom_key(), locator);
            // Focus the target first so the key lands on it
            self.find(locator)
                .await?
                .click()
                .await
                .map_err(|e| SessionError::Browser(format!("Focus failed on {}: {}", locator, e)))?;
        } else {
            tracing::debug!("Pressing '{}' on the active element", key.dom_key());
        }

        let dom_key = key.dom_key();
        self.page
            .evaluate(format!(
                r#"
                document.activeElement.dispatchEvent(new KeyboardEvent('keydown', {{key: '{k}', bubbles: true}}));
                document.activeElement.dispatchEvent(new KeyboardEvent('keypress', {{key: '{k}', bubbles: true}}));
                document.activeElement.dispatchEvent(new KeyboardEvent('keyup', {{key: '{k}', bubbles: true}}));
                "#,
                k = dom_key
            ))
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Browser(format!("Key press '{}' failed: {}", dom_key, e)))
    }

    async fn wait(&self, duration: Duration) {
        tracing::info!("Performing static wait for {:?}", duration);
        tokio::time::sleep(duration).await;
    }

    async fn current_document(&self) -> Result<String, SessionError> {
        self.page
            .content()
            .await
            .map_err(|e| SessionError::Browser(format!("page.content() failed: {}", e)))
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        tracing::info!("Closing browser session");
        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Browser(e.to_string()));
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        result
    }
}
