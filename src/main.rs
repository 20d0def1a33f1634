//! Influencer Insight - influencer marketing dashboard generator
//!
//! A CLI tool that loads or generates influencer statistics for
//! Instagram and YouTube, aggregates them, and renders a dashboard
//! report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad arguments, unreadable input, write failure, etc.)

mod analysis;
mod cli;
mod config;
mod format;
mod generator;
mod models;
mod report;
mod source;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE};
use generator::MockGenerator;
use models::{DashboardReport, ReportMetadata};
use source::DataSource;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is loaded before logging so its `verbose` setting applies.
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(config.log_level(args.quiet));

    info!("Influencer Insight v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Config: {:?}", config);

    if let Err(e) = run_dashboard(&args, &config).await {
        error!("Dashboard failed: {}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .insight.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    // Logs go to stderr so `--output -` stays clean.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load records, aggregate them, and write the rendered report.
async fn run_dashboard(args: &Args, config: &Config) -> Result<()> {
    let data_source = select_source(args, config)?;
    info!("Data source: {}", data_source.describe());

    let seed = config.generator.seed.unwrap_or_else(rand::random);
    debug!("Generator seed: {}", seed);
    let now = Utc::now();
    let mut mock = MockGenerator::new(seed, now);

    let records = data_source
        .fetch(&mut mock)
        .await
        .context("Failed to fetch influencer data")?;
    match records {
        Some(ref records) => info!("Fetched {} influencer records", records.len()),
        None => info!("No influencer records loaded"),
    }

    let metadata = ReportMetadata {
        source: data_source.describe(),
        generated_at: now,
        seed: match data_source {
            DataSource::Input(_) => None,
            _ => Some(seed),
        },
    };

    let report = DashboardReport::new(metadata, records);
    if report.summary.is_none() {
        warn!("No influencer data to aggregate");
    }

    let output = match config.general.format {
        OutputFormat::Markdown => report::generate_markdown_report(&report, &config.report),
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Text => report::generate_text_summary(&report),
    };

    write_output(&config.general.output, &output).await?;

    if !args.quiet && config.general.output != "-" {
        eprint!("{}", report::generate_text_summary(&report));
        eprintln!("\n✅ Report saved to: {}", config.general.output);
    }

    Ok(())
}

/// Pick the data source from CLI flags and config.
fn select_source(args: &Args, config: &Config) -> Result<DataSource> {
    if let Some(ref input) = args.input {
        return Ok(DataSource::Input(input.clone()));
    }

    let sheet_url = config.source.sheet_url.clone();

    if let Some(kind) = config.source.integration {
        let api_key = args.api_key.as_deref().unwrap_or("");
        return Ok(DataSource::integration(kind, api_key, sheet_url)?);
    }

    if let Some(count) = config.generator.count {
        return Ok(DataSource::Generated { count });
    }

    Ok(DataSource::sheet(sheet_url)?)
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so a broken default file is reported
/// straight to stderr. An explicit `--config` must load.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(config) => Ok(config.unwrap_or_default()),
        Err(e) => {
            eprintln!("⚠️  Failed to load {}: {:#}; using defaults", CONFIG_FILE, e);
            Ok(Config::default())
        }
    }
}

/// Write the report to a file, or stdout for `-`.
async fn write_output(target: &str, content: &str) -> Result<()> {
    if target == "-" {
        print!("{}", content);
        return Ok(());
    }

    tokio::fs::write(target, content)
        .await
        .with_context(|| format!("Failed to write report to {}", target))
}
