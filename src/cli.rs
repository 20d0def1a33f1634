//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::source::IntegrationKind;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Influencer Insight - influencer marketing dashboard in your terminal
///
/// Aggregates follower counts, engagement averages and audience
/// demographics for Instagram and YouTube influencers and renders
/// them as a Markdown, JSON, or plain-text dashboard.
///
/// Examples:
///   insight
///   insight --input influencers.json --format text --output -
///   insight --count 25 --seed 7
///   insight --integration modash --api-key $KEY
///   insight --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON file holding an array of influencer records
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["count", "integration"])]
    pub input: Option<PathBuf>,

    /// Google Sheet holding the influencer roster
    #[arg(long, value_name = "URL")]
    pub sheet_url: Option<String>,

    /// Third-party integration used to enrich the roster
    #[arg(long, value_name = "KIND")]
    pub integration: Option<IntegrationKind>,

    /// API key for the selected integration
    #[arg(long, value_name = "KEY", env = "INSIGHT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Generate this many random influencers instead of using the roster
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub count: Option<usize>,

    /// Seed for the mock data generator
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output file path for the report, `-` for stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json, text)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Number of influencers in the top-followers table
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Leave the per-influencer profile cards out of the report
    #[arg(long)]
    pub no_profiles: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .insight.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .insight.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
    /// Plain-text console summary
    Text,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.count == Some(0) {
            return Err("Count must be at least 1".to_string());
        }

        if let Some(ref input) = self.input {
            if !input.is_file() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }

        Ok(())
    }
}
