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

use anyhow::Context;
use clap::Parser;
use farecrawl::browser::chromium::ChromiumSession;
use farecrawl::config::settings::Settings;
use farecrawl::domain::models::trip::TripQuery;
use farecrawl::domain::repositories::config_repository::ScrapeConfigRepository;
use farecrawl::domain::services::crawl_service::CrawlService;
use farecrawl::infrastructure::repositories::file_config_repo_impl::FileConfigRepository;
use farecrawl::infrastructure::repositories::redis_config_repo_impl::RedisConfigRepository;
use farecrawl::utils::telemetry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "farecrawl", version, about = "Configuration-driven airline fare crawler")]
struct Cli {
    /// Airline configuration name (e.g. latam)
    #[arg(long)]
    airline: String,

    /// Origin airport IATA code
    #[arg(long)]
    origin: String,

    /// Destination airport IATA code
    #[arg(long)]
    destination: String,

    /// Outbound date (ISO, e.g. 2024-06-01)
    #[arg(long)]
    departure_date: String,

    /// Return date (ISO, e.g. 2024-06-10)
    #[arg(long)]
    return_date: String,

    /// Override the crawler configuration directory
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Write extracted records to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

/// 主函数
///
/// 应用程序入口点：加载配置、启动浏览器会话、执行一次爬取
/// 并输出提取到的航班记录。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    let cli = Cli::parse();
    info!("Starting farecrawl...");

    // 2. Load configuration
    let mut settings = Settings::new().context("failed to load settings")?;
    if let Some(dir) = &cli.config_dir {
        settings.crawlers.config_dir = dir.display().to_string();
    }
    if cli.headed {
        settings.browser.headless = false;
    }
    info!("Configuration loaded");

    // 3. Select the scrape config store
    let config_repo: Arc<dyn ScrapeConfigRepository> = match settings.crawlers.store.as_str() {
        "redis" => {
            let redis = settings
                .redis
                .as_ref()
                .context("crawlers.store = \"redis\" requires a [redis] section")?;
            Arc::new(RedisConfigRepository::new(&redis.url, redis.key_prefix.clone())?)
        }
        _ => Arc::new(FileConfigRepository::new(
            settings.crawlers.config_dir.clone(),
        )),
    };

    // 4. Launch the browser session for this crawl
    let session = ChromiumSession::launch(&settings.browser)
        .await
        .context("failed to launch browser session")?;
    info!("Browser session established");

    // 5. Run the crawl
    let query = TripQuery::new(
        cli.origin,
        cli.destination,
        cli.departure_date,
        cli.return_date,
    );
    let service = CrawlService::new(config_repo);
    let report = service.crawl(&cli.airline, &query, session).await?;

    info!(
        crawl_id = %report.crawl_id,
        records = report.records.len(),
        "Crawl completed"
    );

    // 6. Emit the extracted records
    let rendered = serde_json::to_string_pretty(&report.records)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "Records written");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
