// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use farecrawl::browser::traits::{BrowserSession, Key, SessionError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 仓库内置的抓取脚本目录
pub fn crawlers_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("crawlers")
}

/// 浏览器会话替身
///
/// 记录每次调用并返回预置的HTML快照，不触碰真实浏览器。
pub struct MockSession {
    calls: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
    document: String,
}

impl MockSession {
    pub fn new(document: &str) -> (Self, Arc<Mutex<Vec<String>>>, Arc<AtomicBool>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));
        let session = Self {
            calls: calls.clone(),
            closed: closed.clone(),
            document: document.to_string(),
        };
        (session, calls, closed)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn goto(&self, url: &str) -> Result<(), SessionError> {
        self.record(format!("goto {url}"));
        Ok(())
    }

    async fn click(&self, locator: &str) -> Result<(), SessionError> {
        self.record(format!("click {locator}"));
        Ok(())
    }

    async fn type_text(&self, locator: &str, text: &str) -> Result<(), SessionError> {
        self.record(format!("type {locator}={text}"));
        Ok(())
    }

    async fn press_key(&self, locator: Option<&str>, key: Key) -> Result<(), SessionError> {
        self.record(format!("press {:?} {}", locator, key.dom_key()));
        Ok(())
    }

    async fn wait(&self, duration: Duration) {
        self.record(format!("wait {}s", duration.as_secs()));
    }

    async fn current_document(&self) -> Result<String, SessionError> {
        self.record("document".to_string());
        Ok(self.document.clone())
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
