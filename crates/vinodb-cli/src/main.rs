mod export;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vinodb_core::{AppConfig, FailurePolicy};
use vinodb_scraper::{scrape_catalog, CatalogClient, ScrapeOptions};

#[derive(Debug, Parser)]
#[command(name = "vinodb-cli")]
#[command(about = "Scrape catalog prices into the monthly competitor price report")]
struct Cli {
    /// Listing pages to scrape, starting at page 1.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pages: Option<u32>,

    /// Ceiling on simultaneously in-flight detail-page requests.
    #[arg(long, value_parser = parse_positive_usize)]
    max_concurrent: Option<usize>,

    /// Catalog listing URL; `?page=N` is appended.
    #[arg(long)]
    base_url: Option<String>,

    /// Directory the spreadsheet is written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip listing items without a name or link instead of failing.
    #[arg(long)]
    skip_malformed: bool,

    /// Skip items whose detail page fails instead of failing.
    #[arg(long)]
    skip_failed_details: bool,
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(v) => Ok(v),
        Err(e) => Err(e.to_string()),
    }
}

/// Command-line flags take precedence over environment configuration.
fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(pages) = cli.pages {
        config.pages = pages;
    }
    if let Some(max) = cli.max_concurrent {
        config.max_concurrent_requests = max;
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir.clone_from(dir);
    }
    if cli.skip_malformed {
        config.on_malformed_item = FailurePolicy::SkipAndLog;
    }
    if cli.skip_failed_details {
        config.on_detail_failure = FailurePolicy::SkipAndLog;
    }
    config
}

fn build_client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    CatalogClient::new(config.request_timeout_secs, &config.user_agent)
        .context("failed to build catalog client")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = apply_overrides(vinodb_core::load_app_config()?, &cli);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(?config, "effective configuration");

    let client = build_client(&config)?;
    let report = scrape_catalog(&client, &ScrapeOptions::from_config(&config)).await?;

    let filename = export::report_filename(chrono::Local::now().date_naive());
    let path = config.output_dir.join(&filename);
    export::write_report(&path, &report.records)?;

    tracing::info!(
        path = %path.display(),
        records = report.records.len(),
        "report written"
    );
    println!("Data saved to {filename}");

    Ok(())
}
