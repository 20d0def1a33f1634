//! Influencer data sources.
//!
//! Records come from a JSON export on disk, from the demo roster run
//! through the mock generator, from a purely random sample, or from a
//! mock third-party integration that re-generates statistics for the
//! roster.

use crate::generator::MockGenerator;
use crate::models::{InfluencerRecord, SheetRow};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while selecting or loading a data source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Integration selected without a key
    #[error("API key required to connect to {0}")]
    MissingApiKey(IntegrationKind),

    /// Sheet URL does not point at Google Sheets
    #[error("Invalid Google Sheet URL: {0}")]
    InvalidSheetUrl(String),

    /// Input file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not a JSON array of records
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Third-party services that can enrich the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    /// HypeAuditor
    Hypeauditor,
    /// Modash
    Modash,
    /// Mock data (demo)
    Mock,
}

impl fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationKind::Hypeauditor => write!(f, "HypeAuditor"),
            IntegrationKind::Modash => write!(f, "Modash"),
            IntegrationKind::Mock => write!(f, "Mock Data (Demo)"),
        }
    }
}

/// Where the dashboard gets its records from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// JSON array of records on disk.
    Input(PathBuf),
    /// Demo roster with freshly generated statistics.
    Sheet { url: Option<String> },
    /// Random influencers, no roster.
    Generated { count: usize },
    /// Roster enriched through a third-party integration.
    Integration {
        kind: IntegrationKind,
        api_key: String,
        url: Option<String>,
    },
}

impl DataSource {
    /// Build a sheet source, validating the URL when one is given.
    pub fn sheet(url: Option<String>) -> Result<Self, SourceError> {
        if let Some(ref url) = url {
            validate_sheet_url(url)?;
        }
        Ok(DataSource::Sheet { url })
    }

    /// Build an integration source. The key must not be blank.
    pub fn integration(
        kind: IntegrationKind,
        api_key: &str,
        url: Option<String>,
    ) -> Result<Self, SourceError> {
        if api_key.trim().is_empty() {
            return Err(SourceError::MissingApiKey(kind));
        }
        if let Some(ref url) = url {
            validate_sheet_url(url)?;
        }
        Ok(DataSource::Integration {
            kind,
            api_key: api_key.to_string(),
            url,
        })
    }

    /// Human-readable provenance for the report header.
    pub fn describe(&self) -> String {
        match self {
            DataSource::Input(path) => format!("File: {}", path.display()),
            DataSource::Sheet { url: Some(url) } => format!("Google Sheet: {}", url),
            DataSource::Sheet { url: None } => "Demo roster".to_string(),
            DataSource::Generated { count } => format!("Random sample of {}", count),
            DataSource::Integration { kind, .. } => kind.to_string(),
        }
    }

    /// Resolve the source into a list of records.
    ///
    /// `None` means nothing was loaded: an input file holding JSON `null`.
    pub async fn fetch(
        &self,
        generator: &mut MockGenerator,
    ) -> Result<Option<Vec<InfluencerRecord>>, SourceError> {
        match self {
            DataSource::Input(path) => load_records(path).await,
            DataSource::Sheet { url } => {
                info!(
                    "Fetching roster from {}",
                    url.as_deref().unwrap_or("built-in demo roster")
                );
                Ok(Some(generator.generate_for_roster(&SheetRow::default_roster())))
            }
            DataSource::Generated { count } => Ok(Some(generator.generate(*count))),
            DataSource::Integration { kind, api_key, url } => {
                info!("Connecting to {}", kind);
                debug!(
                    "Enriching {} with a {}-character API key",
                    url.as_deref().unwrap_or("built-in demo roster"),
                    api_key.chars().count()
                );
                Ok(Some(enrich_roster(generator, &SheetRow::default_roster())))
            }
        }
    }
}

/// Read a JSON array of records. A file holding `null` yields `None`.
pub async fn load_records(path: &Path) -> Result<Option<Vec<InfluencerRecord>>, SourceError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let records: Option<Vec<InfluencerRecord>> =
        serde_json::from_str(&content).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let Some(records) = records else {
        warn!("{} holds no records", path.display());
        return Ok(None);
    };

    debug!("Loaded {} records from {}", records.len(), path.display());

    let unrecognized = records
        .iter()
        .filter(|r| !r.platform.is_recognized())
        .count();
    if unrecognized > 0 {
        warn!(
            "{} records have an unrecognized platform and are left out of the platform distribution",
            unrecognized
        );
    }

    Ok(Some(records))
}

/// Generate fresh statistics and lay the roster's identity over them.
pub fn enrich_roster(generator: &mut MockGenerator, rows: &[SheetRow]) -> Vec<InfluencerRecord> {
    generator
        .generate(rows.len())
        .into_iter()
        .zip(rows)
        .map(|(enhanced, row)| InfluencerRecord {
            id: row.id.clone(),
            username: row.username.clone(),
            platform: row.platform.clone(),
            ..enhanced
        })
        .collect()
}

fn validate_sheet_url(url: &str) -> Result<(), SourceError> {
    if url.contains("docs.google.com/spreadsheets") {
        Ok(())
    } else {
        Err(SourceError::InvalidSheetUrl(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;
    use chrono::Utc;
    use std::io::Write;

    #[test]
    fn test_integration_requires_key() {
        let err = DataSource::integration(IntegrationKind::Modash, "  ", None).unwrap_err();
        assert!(matches!(err, SourceError::MissingApiKey(IntegrationKind::Modash)));
        assert_eq!(err.to_string(), "API key required to connect to Modash");

        assert!(DataSource::integration(IntegrationKind::Mock, "demo", None).is_ok());
    }

    #[test]
    fn test_sheet_url_validation() {
        assert!(DataSource::sheet(None).is_ok());
        assert!(DataSource::sheet(Some(
            "https://docs.google.com/spreadsheets/d/abc".to_string()
        ))
        .is_ok());
        assert!(matches!(
            DataSource::sheet(Some("https://example.com".to_string())),
            Err(SourceError::InvalidSheetUrl(_))
        ));
    }

    #[test]
    fn test_describe() {
        assert_eq!(DataSource::Sheet { url: None }.describe(), "Demo roster");
        let source = DataSource::integration(IntegrationKind::Mock, "key", None).unwrap();
        assert_eq!(source.describe(), "Mock Data (Demo)");
    }

    #[test]
    fn test_enrich_roster_overlays_identity() {
        let roster = SheetRow::default_roster();
        let mut generator = MockGenerator::new(5, Utc::now());
        let records = enrich_roster(&mut generator, &roster);

        assert_eq!(records.len(), roster.len());
        assert_eq!(records[2].id, "3");
        assert_eq!(records[2].username, "TechReviewer");
        assert_eq!(records[2].platform, Platform::Youtube);
    }

    #[test]
    fn test_fetch_sheet_uses_roster() {
        let mut generator = MockGenerator::new(5, Utc::now());
        let source = DataSource::Sheet { url: None };
        let records = tokio_test::block_on(source.fetch(&mut generator))
            .unwrap()
            .unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[0].username, "travel_mike");
    }

    #[test]
    fn test_fetch_generated() {
        let mut generator = MockGenerator::new(5, Utc::now());
        let source = DataSource::Generated { count: 3 };
        let records = tokio_test::block_on(source.fetch(&mut generator))
            .unwrap()
            .unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(source.describe(), "Random sample of 3");
    }

    #[test]
    fn test_load_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"1","platform":"youtube","followerCount":500000,
                "averageViews":250000,"averageReach":230000,"averageBrandedViews":100000,
                "genderSplit":{{"male":50,"female":50,"other":0}},
                "ageSplit":{{"18-24":40,"25-34":40,"35-44":20}}}}]"#
        )
        .unwrap();

        let records = tokio_test::block_on(load_records(file.path()))
            .unwrap()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].follower_count, 500_000);
    }

    #[test]
    fn test_load_records_null_is_not_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "null").unwrap();

        let source = DataSource::Input(file.path().to_path_buf());
        let mut generator = MockGenerator::new(5, Utc::now());
        let records = tokio_test::block_on(source.fetch(&mut generator)).unwrap();
        assert!(records.is_none());
    }

    #[test]
    fn test_load_records_errors() {
        let missing = tokio_test::block_on(load_records(Path::new("/nonexistent/records.json")));
        assert!(matches!(missing, Err(SourceError::Read { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let malformed = tokio_test::block_on(load_records(file.path()));
        assert!(matches!(malformed, Err(SourceError::Parse { .. })));
    }
}
