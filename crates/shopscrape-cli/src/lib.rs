//! Command-line driver for shopscrape.
//!
//! With no arguments the binary scrapes pages 1–2 of the live storefront,
//! writes `output.json`, and renders the four charts next to it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shopscrape::charts::generate_charts;
use shopscrape::pipeline::scrape_to_file;
use shopscrape::ScrapeConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "shopscrape", version)]
#[command(about = "Scrape storefront products into JSON and render summary charts")]
pub struct Cli {
    /// Storefront root URL
    #[arg(long, default_value = shopscrape::config::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// First listing page to scrape
    #[arg(long, default_value_t = 1)]
    pub first_page: u32,

    /// Last listing page to scrape (inclusive)
    #[arg(long, default_value_t = 2)]
    pub last_page: u32,

    /// JSON file the records are written to and read back from
    #[arg(short, long, default_value = shopscrape::config::DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Directory receiving the chart images
    #[arg(long, default_value = ".")]
    pub chart_dir: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Scrape, persist, then render charts (default)
    All,
    /// Scrape and persist only
    Scrape,
    /// Render charts from an existing JSON file
    Charts,
}

impl Cli {
    pub fn config(&self) -> ScrapeConfig {
        ScrapeConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            first_page: self.first_page,
            last_page: self.last_page,
            output_path: self.output.clone(),
            chart_dir: self.chart_dir.clone(),
        }
    }

    pub fn selected_command(&self) -> Command {
        self.command.unwrap_or(Command::All)
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// `shopscrape=info` filter.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shopscrape=info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Run the selected phases in order.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = cli.config();
    let command = cli.selected_command();

    if matches!(command, Command::All | Command::Scrape) {
        let records = scrape_to_file(&config)
            .await
            .with_context(|| format!("scraping {}", config.base_url))?;
        info!(
            "saved {} products to {}",
            records.len(),
            config.output_path.display()
        );
    }

    if matches!(command, Command::All | Command::Charts) {
        let written = generate_charts(&config.output_path, &config.chart_dir).with_context(|| {
            format!("generating charts from {}", config.output_path.display())
        })?;
        info!("rendered {} charts", written.len());
    }

    Ok(())
}
