mod config;
mod crawler;
mod model;
mod parser;
mod point;
mod scraper;
mod storage;

use crate::config::{AppConfig, SiteConfig, load_config};
use crate::crawler::crawl_site;
use crate::model::MetricPoint;
use crate::point::build_point;
use crate::scraper::HttpFetcher;
use crate::storage::InfluxWriter;

use futures::future::join_all;
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file
    let config: Arc<AppConfig> = match load_config("config.json") {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let fetcher = match HttpFetcher::new(config.request_timeout_seconds) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return;
        }
    };
    let writer = InfluxWriter::new(&config.influx);

    info!("🚀 BoulderPulse started, {} sites configured", config.sites.len());

    // Main processing loop; a single pass unless an interval is configured.
    loop {
        let points = crawl_cycle(&config, &fetcher).await;

        if let Err(e) = writer.write_points(&points).await {
            warn!("Batch write failed, {} points lost: {}", points.len(), e);
        }

        match config.check_interval_seconds {
            Some(seconds) => {
                info!("Waiting {}s until the next cycle...", seconds);
                sleep(Duration::from_secs(seconds)).await;
            }
            None => break,
        }
    }
}

/// Crawls every configured site concurrently. A failing site is logged and
/// skipped; it never takes the rest of the batch down with it.
async fn crawl_cycle(config: &AppConfig, fetcher: &HttpFetcher) -> Vec<MetricPoint> {
    let tasks: Vec<_> = config
        .sites
        .iter()
        .map(|(site_name, site_config)| process_site(site_name, site_config, fetcher))
        .collect();

    join_all(tasks).await.into_iter().flatten().collect()
}

/// Crawls one site and builds its point. Every per-site error ends up here
/// as a log line; the cycle continues with the remaining sites.
async fn process_site(
    site_name: &str,
    site_config: &SiteConfig,
    fetcher: &HttpFetcher,
) -> Option<MetricPoint> {
    let result = match crawl_site(site_name, site_config, fetcher).await {
        Ok(result) => result,
        Err(e) => {
            error!("failed to crawl site {}: {}", site_name, e);
            return None;
        }
    };

    info!(
        "crawled {:<25}: free={} active={}",
        site_name, result.free, result.active
    );

    Some(build_point(site_name, site_config, &result))
}
