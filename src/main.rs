/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use log::info;
use shutterfly_sites::sites::{
    ApiClient, CMD_ENDPOINT, ClientOptions, CrawlOptions, Crawler, DEFAULT_DETAIL_LAYOUT,
    RetryPolicy, export_to_dir,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Collect album and photo metadata from a Shutterfly Sites website")]
struct Cli {
    /// Name of the shutterfly site to collect metadata from
    site_name: String,

    /// Directory receiving albums.csv and photos.csv
    #[arg(short = 'o', long, env = "SITES_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Also save every decoded response as JSON in this directory
    #[arg(long, env = "SITES_DUMP_DIR")]
    dump_dir: Option<PathBuf>,

    /// Per request timeout
    #[arg(long, env = "SITES_TIMEOUT_SECS", default_value_t = 60)]
    timeout_secs: u64,

    /// Minimum delay between two requests
    #[arg(long, env = "SITES_REQUEST_INTERVAL_MS", default_value_t = 250)]
    request_interval_ms: u64,

    /// Attempts per request before giving up (1 disables retries)
    #[arg(long, env = "SITES_MAX_ATTEMPTS", default_value_t = 3)]
    max_attempts: u32,

    /// Delay before the first retry, doubled for each further retry
    #[arg(long, env = "SITES_BACKOFF_MS", default_value_t = 1000)]
    backoff_ms: u64,

    /// Command endpoint
    #[arg(long, env = "SITES_BASE_URL", default_value = CMD_ENDPOINT)]
    base_url: String,

    /// Layout requested when fetching the comments of a single item
    #[arg(long, env = "SITES_DETAIL_LAYOUT", default_value = DEFAULT_DETAIL_LAYOUT)]
    detail_layout: String,
}

impl Cli {
    fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            request_interval: Duration::from_millis(self.request_interval_ms),
            retry: RetryPolicy {
                max_attempts: self.max_attempts,
                initial_backoff: Duration::from_millis(self.backoff_ms),
                ..RetryPolicy::default()
            },
            user_agent: None,
        }
    }

    fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            detail_layout: self.detail_layout.clone(),
            dump_dir: self.dump_dir.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let client = ApiClient::new(cli.client_options())?;
    let crawler = Crawler::with_options(client, &cli.site_name, cli.crawl_options());
    let crawl = crawler
        .crawl_site()
        .await
        .with_context(|| format!("Failed collecting metadata for site {}", cli.site_name))?;

    let paths = export_to_dir(&cli.output_dir, &crawl)
        .with_context(|| format!("Failed writing tables to {}", cli.output_dir.display()))?;
    info!(
        "Done. Albums in {}, photos in {}",
        paths.albums.display(),
        paths.photos.display()
    );
    Ok(())
}
