//! Influencer aggregation and statistics.
//!
//! This module reduces a list of influencer records to the summary
//! statistics shown on the dashboard. Every function here is pure: the
//! input is never mutated and nothing is cached between calls.

use crate::models::{
    AgeBand, AgeBucket, AggregateSummary, GenderDistribution, InfluencerRecord, Platform,
    PlatformDistribution,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Aggregate a list of records into a summary.
///
/// Returns `None` for an empty list: there is nothing to render.
pub fn aggregate(records: &[InfluencerRecord]) -> Option<AggregateSummary> {
    if records.is_empty() {
        return None;
    }

    let count = records.len();
    let total_followers = records.iter().map(|r| r.follower_count).sum();

    let summary = AggregateSummary {
        total_influencers: count,
        total_followers,
        average_views: average(records.iter().map(|r| r.average_views), count),
        average_reach: average(records.iter().map(|r| r.average_reach), count),
        average_branded_views: average(records.iter().map(|r| r.average_branded_views), count),
        platforms: platform_distribution(records),
        gender: gender_distribution(records),
        age: age_distribution(records),
    };

    debug!(
        "Aggregated {} records ({} followers)",
        summary.total_influencers, summary.total_followers
    );

    Some(summary)
}

/// Aggregate records that may not have been loaded yet.
///
/// `None` input behaves exactly like an empty list.
pub fn aggregate_loaded(records: Option<&[InfluencerRecord]>) -> Option<AggregateSummary> {
    records.and_then(aggregate)
}

/// Count records per recognized platform. Other tags land in neither bucket.
pub fn platform_distribution(records: &[InfluencerRecord]) -> PlatformDistribution {
    let mut dist = PlatformDistribution::default();

    for record in records {
        match record.platform {
            Platform::Instagram => dist.instagram += 1,
            Platform::Youtube => dist.youtube += 1,
            Platform::Other(_) => {}
        }
    }

    dist
}

/// Gender percentages against the combined total of all three buckets.
pub fn gender_distribution(records: &[InfluencerRecord]) -> GenderDistribution {
    let male: f64 = records.iter().map(|r| r.gender_split.male).sum();
    let female: f64 = records.iter().map(|r| r.gender_split.female).sum();
    let other: f64 = records.iter().map(|r| r.gender_split.other).sum();
    let total = male + female + other;

    if total <= 0.0 {
        return GenderDistribution::default();
    }

    GenderDistribution {
        male: round_half_up(male / total * 100.0),
        female: round_half_up(female / total * 100.0),
        other: round_half_up(other / total * 100.0),
    }
}

/// Per-record average of each age band.
///
/// The sums are divided by the record count, so the bands are not
/// renormalized to 100.
pub fn age_distribution(records: &[InfluencerRecord]) -> Vec<AgeBucket> {
    let count = records.len();

    AgeBand::ALL
        .iter()
        .map(|&band| {
            let value = if count == 0 {
                0
            } else {
                let sum: f64 = records.iter().map(|r| r.age_split.get(band)).sum();
                round_half_up(sum / count as f64)
            };
            AgeBucket { band, value }
        })
        .collect()
}

/// Group records by platform.
pub fn group_by_platform(records: &[InfluencerRecord]) -> BTreeMap<Platform, Vec<&InfluencerRecord>> {
    let mut grouped: BTreeMap<Platform, Vec<&InfluencerRecord>> = BTreeMap::new();

    for record in records {
        grouped
            .entry(record.platform.clone())
            .or_default()
            .push(record);
    }

    grouped
}

/// Get the top N influencers by follower count.
pub fn top_influencers(records: &[InfluencerRecord], n: usize) -> Vec<&InfluencerRecord> {
    let mut sorted: Vec<&InfluencerRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.follower_count
            .cmp(&a.follower_count)
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted.truncate(n);
    sorted
}

/// Rounded mean of integer values.
fn average(values: impl Iterator<Item = u64>, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let sum: u64 = values.sum();
    round_half_up(sum as f64 / count as f64)
}

/// Round to the nearest integer, halves going up.
fn round_half_up(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value + 0.5).floor() as u64
}
