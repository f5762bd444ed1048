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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含抓取脚本存储、Redis和浏览器启动等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 抓取脚本配置
    pub crawlers: CrawlerSettings,
    /// Redis配置（仅 store = "redis" 时需要）
    pub redis: Option<RedisSettings>,
    /// 浏览器启动配置
    pub browser: BrowserSettings,
}

/// 抓取脚本存储配置
#[derive(Debug, Deserialize)]
pub struct CrawlerSettings {
    /// 存储类型 (file, redis)
    pub store: String,
    /// 脚本文件目录 (当 store=file 时使用)
    pub config_dir: String,
}

/// Redis配置设置
#[derive(Debug, Deserialize)]
pub struct RedisSettings {
    /// Redis连接URL
    pub url: String,
    /// 脚本键前缀
    pub key_prefix: String,
}

/// 浏览器启动配置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 是否以无头模式运行
    pub headless: bool,
    /// 额外的Chromium启动参数
    pub args: Vec<String>,
    /// CDP请求超时时间（秒）
    pub request_timeout: u64,
    /// 远程调试地址（设置后附加到已有实例而不是启动新进程）
    pub remote_debugging_url: Option<String>,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default crawler script store
            .set_default("crawlers.store", "file")?
            .set_default("crawlers.config_dir", "crawlers")?
            // Default browser settings
            .set_default("browser.headless", true)?
            .set_default("browser.request_timeout", 30)?
            .set_default(
                "browser.args",
                vec![
                    "--disable-gpu".to_string(),
                    "--disable-dev-shm-usage".to_string(),
                    "--disable-blink-features=AutomationControlled".to_string(),
                    "--incognito".to_string(),
                    "--window-size=1920,1080".to_string(),
                ],
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("FARECRAWL").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_files() {
        let settings = Settings::new().expect("default settings should load");

        assert_eq!(settings.crawlers.store, "file");
        assert_eq!(settings.crawlers.config_dir, "crawlers");
        assert!(settings.browser.headless);
        assert_eq!(settings.browser.request_timeout, 30);
        assert!(settings
            .browser
            .args
            .iter()
            .any(|a| a == "--disable-dev-shm-usage"));
    }
}
