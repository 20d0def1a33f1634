//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.insight.toml` files.

use crate::cli::OutputFormat;
use crate::source::IntegrationKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".insight.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Mock generator settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Data source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Report output path, `-` for stdout.
    #[serde(default = "default_output")]
    pub output: String,

    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            format: OutputFormat::default(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "insight_report.md".to_string()
}

/// Mock data generator settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Generate this many random influencers instead of using the roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// RNG seed; a random one is picked when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Data source settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Google Sheet holding the roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_url: Option<String>,

    /// Third-party integration to enrich the roster with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<IntegrationKind>,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of influencers in the top-followers table.
    #[serde(default = "default_top_influencers")]
    pub top_influencers: usize,

    /// Include one profile card per influencer.
    #[serde(default = "default_true")]
    pub include_profiles: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_influencers: default_top_influencers(),
            include_profiles: true,
        }
    }
}

fn default_top_influencers() -> usize {
    5
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.insight.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence; only explicitly provided values override.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(format) = args.format {
            self.general.format = format;
        }
        if args.verbose {
            self.general.verbose = true;
        }

        if args.count.is_some() {
            self.generator.count = args.count;
        }
        if args.seed.is_some() {
            self.generator.seed = args.seed;
        }

        if args.sheet_url.is_some() {
            self.source.sheet_url = args.sheet_url.clone();
        }
        if args.integration.is_some() {
            self.source.integration = args.integration;
        }

        if let Some(top) = args.top {
            self.report.top_influencers = top;
        }
        if args.no_profiles {
            self.report.include_profiles = false;
        }
    }

    /// Log level after merging: `quiet` wins, then `verbose` from either source.
    pub fn log_level(&self, quiet: bool) -> tracing::Level {
        if quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::make_args;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "insight_report.md");
        assert_eq!(config.general.format, OutputFormat::Markdown);
        assert_eq!(config.report.top_influencers, 5);
        assert!(config.report.include_profiles);
        assert!(config.generator.seed.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "-"
format = "json"

[generator]
count = 20
seed = 99

[source]
integration = "modash"

[report]
top_influencers = 3
include_profiles = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "-");
        assert_eq!(config.general.format, OutputFormat::Json);
        assert_eq!(config.generator.count, Some(20));
        assert_eq!(config.generator.seed, Some(99));
        assert_eq!(config.source.integration, Some(IntegrationKind::Modash));
        assert_eq!(config.report.top_influencers, 3);
        assert!(!config.report.include_profiles);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.general.output, "insight_report.md");
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE), "[generator]\nseed = 7\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.generator.seed, Some(7));

        std::fs::write(dir.path().join(CONFIG_FILE), "[generator\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = Config::default();
        config.generator.seed = Some(1);
        config.report.top_influencers = 10;

        let mut args = make_args();
        args.seed = Some(2);
        args.format = Some(OutputFormat::Text);
        args.no_profiles = true;

        config.merge_with_args(&args);

        assert_eq!(config.generator.seed, Some(2));
        assert_eq!(config.general.format, OutputFormat::Text);
        assert_eq!(config.report.top_influencers, 10);
        assert!(!config.report.include_profiles);
    }

    #[test]
    fn test_log_level_from_config_file() {
        let mut config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        config.merge_with_args(&make_args());
        assert_eq!(config.log_level(false), tracing::Level::DEBUG);
        assert_eq!(config.log_level(true), tracing::Level::ERROR);
    }

    #[test]
    fn test_log_level_from_args() {
        let mut config = Config::default();
        assert_eq!(config.log_level(false), tracing::Level::INFO);

        let mut args = make_args();
        args.verbose = true;
        config.merge_with_args(&args);
        assert_eq!(config.log_level(false), tracing::Level::DEBUG);
    }
}
