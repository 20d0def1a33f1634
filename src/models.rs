//! Data models for the influencer dashboard.
//!
//! This module contains the core data structures used throughout
//! the application for representing influencer records, roster rows,
//! and the aggregate summary computed over them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Social platform an influencer publishes on.
///
/// Only Instagram and YouTube are recognized. Any other tag is kept
/// verbatim so records carrying it still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Instagram,
    Youtube,
    Other(String),
}

impl Platform {
    /// The two platforms the dashboard knows how to chart.
    pub const RECOGNIZED: [Platform; 2] = [Platform::Instagram, Platform::Youtube];

    /// Returns the wire tag of the platform.
    pub fn tag(&self) -> &str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Youtube => "youtube",
            Platform::Other(tag) => tag,
        }
    }

    /// Returns true for Instagram and YouTube.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Platform::Other(_))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Instagram => write!(f, "Instagram"),
            Platform::Youtube => write!(f, "YouTube"),
            Platform::Other(tag) => write!(f, "{}", tag),
        }
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        // Tags are matched exactly; "Instagram" is not "instagram".
        match s {
            "instagram" => Platform::Instagram,
            "youtube" => Platform::Youtube,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl From<String> for Platform {
    fn from(s: String) -> Self {
        Platform::from(s.as_str())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.tag().to_string()
    }
}

/// Audience gender split, nominally percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenderSplit {
    #[serde(default)]
    pub male: f64,
    #[serde(default)]
    pub female: f64,
    #[serde(default)]
    pub other: f64,
}

/// Fixed audience age bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "13-17")]
    Teen,
    #[serde(rename = "18-24")]
    YoungAdult,
    #[serde(rename = "25-34")]
    Adult,
    #[serde(rename = "35-44")]
    MidAdult,
    #[serde(rename = "45-54")]
    Mature,
    #[serde(rename = "55+")]
    Senior,
}

impl AgeBand {
    /// All bands, youngest first.
    pub const ALL: [AgeBand; 6] = [
        AgeBand::Teen,
        AgeBand::YoungAdult,
        AgeBand::Adult,
        AgeBand::MidAdult,
        AgeBand::Mature,
        AgeBand::Senior,
    ];

    /// Returns the display label of the band.
    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Teen => "13-17",
            AgeBand::YoungAdult => "18-24",
            AgeBand::Adult => "25-34",
            AgeBand::MidAdult => "35-44",
            AgeBand::Mature => "45-54",
            AgeBand::Senior => "55+",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Audience age split keyed by band label. Missing bands read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeSplit {
    #[serde(rename = "13-17", default)]
    pub teen: f64,
    #[serde(rename = "18-24", default)]
    pub young_adult: f64,
    #[serde(rename = "25-34", default)]
    pub adult: f64,
    #[serde(rename = "35-44", default)]
    pub mid_adult: f64,
    #[serde(rename = "45-54", default)]
    pub mature: f64,
    #[serde(rename = "55+", default)]
    pub senior: f64,
}

impl AgeSplit {
    /// Builds a split from values ordered as [`AgeBand::ALL`].
    pub fn from_values(values: [f64; 6]) -> Self {
        let [teen, young_adult, adult, mid_adult, mature, senior] = values;
        Self {
            teen,
            young_adult,
            adult,
            mid_adult,
            mature,
            senior,
        }
    }

    /// Returns the value stored for a band.
    pub fn get(&self, band: AgeBand) -> f64 {
        match band {
            AgeBand::Teen => self.teen,
            AgeBand::YoungAdult => self.young_adult,
            AgeBand::Adult => self.adult,
            AgeBand::MidAdult => self.mid_adult,
            AgeBand::Mature => self.mature,
            AgeBand::Senior => self.senior,
        }
    }

    /// Sum over all six bands.
    #[cfg(test)]
    pub fn total(&self) -> f64 {
        AgeBand::ALL.iter().map(|band| self.get(*band)).sum()
    }
}

/// Audience share per state or region.
pub type StateSplit = BTreeMap<String, f64>;

/// One influencer's statistics snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerRecord {
    /// Stable identifier (roster row id or generated `inf-N`).
    pub id: String,
    /// Handle on the platform.
    #[serde(default)]
    pub username: String,
    /// Platform the influencer publishes on.
    pub platform: Platform,
    /// Optional avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Number of followers.
    pub follower_count: u64,
    /// Country of residence.
    #[serde(default)]
    pub location: String,
    /// Main language of the content.
    #[serde(default)]
    pub content_language: String,
    /// Average views per post.
    pub average_views: u64,
    /// Average reach per post.
    pub average_reach: u64,
    /// Average views on branded posts.
    pub average_branded_views: u64,
    /// Audience gender split.
    pub gender_split: GenderSplit,
    /// Audience split by state.
    #[serde(default)]
    pub state_split: StateSplit,
    /// Audience age split.
    pub age_split: AgeSplit,
    /// When the statistics were collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// One row of the roster the dashboard fetches statistics for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub id: String,
    pub username: String,
    pub platform: Platform,
}

impl SheetRow {
    fn new(id: &str, username: &str, platform: Platform) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            platform,
        }
    }

    /// The built-in demo roster.
    pub fn default_roster() -> Vec<SheetRow> {
        vec![
            SheetRow::new("1", "travel_mike", Platform::Instagram),
            SheetRow::new("2", "fitness_jane", Platform::Instagram),
            SheetRow::new("3", "TechReviewer", Platform::Youtube),
            SheetRow::new("4", "FoodieDelights", Platform::Youtube),
            SheetRow::new("5", "fashion_trends", Platform::Instagram),
            SheetRow::new("6", "GamingWithAlex", Platform::Youtube),
            SheetRow::new("7", "beauty_guru", Platform::Instagram),
            SheetRow::new("8", "DIYProjects", Platform::Youtube),
        ]
    }
}

/// Record counts per recognized platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDistribution {
    pub instagram: usize,
    pub youtube: usize,
}

impl PlatformDistribution {
    /// Returns the count for a platform; unrecognized platforms have none.
    pub fn count(&self, platform: &Platform) -> usize {
        match platform {
            Platform::Instagram => self.instagram,
            Platform::Youtube => self.youtube,
            Platform::Other(_) => 0,
        }
    }
}

/// Rounded gender percentages over all records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderDistribution {
    pub male: u64,
    pub female: u64,
    pub other: u64,
}

impl GenderDistribution {
    /// Sum of the three buckets; within one of 100 unless all are zero.
    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.male + self.female + self.other
    }
}

/// Averaged value for one age band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBucket {
    pub band: AgeBand,
    pub value: u64,
}

/// Summary statistics over a list of influencer records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Number of records.
    pub total_influencers: usize,
    /// Sum of follower counts.
    pub total_followers: u64,
    /// Rounded average of views.
    pub average_views: u64,
    /// Rounded average of reach.
    pub average_reach: u64,
    /// Rounded average of branded views.
    pub average_branded_views: u64,
    /// Record counts per platform.
    pub platforms: PlatformDistribution,
    /// Gender percentages.
    pub gender: GenderDistribution,
    /// Per-record average for each age band, youngest first.
    pub age: Vec<AgeBucket>,
}

/// Metadata about a rendered dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Where the records came from.
    pub source: String,
    /// When the dashboard was generated.
    pub generated_at: DateTime<Utc>,
    /// Generator seed, when the records are mock data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// The complete dashboard: summary plus the records it was computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// Aggregate statistics, absent when there are no records.
    pub summary: Option<AggregateSummary>,
    /// Records shown as profile cards.
    pub influencers: Vec<InfluencerRecord>,
}

impl DashboardReport {
    /// Build a report, computing the summary from the records.
    ///
    /// `None` records (nothing loaded) render like an empty list.
    pub fn new(metadata: ReportMetadata, influencers: Option<Vec<InfluencerRecord>>) -> Self {
        let summary = crate::analysis::aggregate_loaded(influencers.as_deref());
        Self {
            metadata,
            summary,
            influencers: influencers.unwrap_or_default(),
        }
    }
}
