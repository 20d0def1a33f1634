//! Markdown, JSON and text report generation.
//!
//! This module turns a dashboard report into the document the user reads.
//! Counts go through the K/M formatter; distributions are printed as the
//! aggregator computed them.

use crate::analysis::{group_by_platform, top_influencers};
use crate::config::ReportConfig;
use crate::format::{format_count, format_percent};
use crate::models::{AggregateSummary, DashboardReport, InfluencerRecord, Platform, ReportMetadata};
use anyhow::Result;

const NO_DATA: &str = "No influencer data available";

/// Generate a complete Markdown dashboard.
pub fn generate_markdown_report(report: &DashboardReport, options: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str("# Influencer Insight\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));

    if let Some(ref summary) = report.summary {
        output.push_str(&generate_overview_section(summary));
        output.push_str(&generate_platform_section(summary, &report.influencers));
        output.push_str(&generate_gender_section(summary));
        output.push_str(&generate_age_section(summary));
        output.push_str(&generate_top_section(
            &report.influencers,
            options.top_influencers,
        ));
    }

    if options.include_profiles {
        output.push_str(&generate_profiles_section(&report.influencers));
    } else if report.summary.is_none() {
        output.push_str(&format!("{}\n\n", NO_DATA));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if let Some(seed) = metadata.seed {
        section.push_str(&format!("- **Seed:** {}\n", seed));
    }
    section.push('\n');

    section
}

/// Generate the overview stats table.
fn generate_overview_section(summary: &AggregateSummary) -> String {
    let mut section = String::new();

    section.push_str("## Overview Stats\n\n");
    section.push_str("| Total Influencers | Total Followers | Avg. Views | Avg. Reach | Branded |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {} |\n\n",
        summary.total_influencers,
        format_count(summary.total_followers),
        format_count(summary.average_views),
        format_count(summary.average_reach),
        format_count(summary.average_branded_views),
    ));

    section
}

/// Generate the platform distribution section.
fn generate_platform_section(summary: &AggregateSummary, records: &[InfluencerRecord]) -> String {
    let mut section = String::new();
    let grouped = group_by_platform(records);

    section.push_str("## Platform Distribution\n\n");
    section.push_str("| Platform | Influencers | Followers |\n");
    section.push_str("|:---|:---:|:---:|\n");
    for platform in &Platform::RECOGNIZED {
        let followers: u64 = grouped
            .get(platform)
            .map(|group| group.iter().map(|r| r.follower_count).sum())
            .unwrap_or(0);
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            platform,
            summary.platforms.count(platform),
            format_count(followers)
        ));
    }
    section.push('\n');

    section
}

/// Generate the gender demographics section.
fn generate_gender_section(summary: &AggregateSummary) -> String {
    let mut section = String::new();

    section.push_str("## Gender Demographics\n\n");
    section.push_str("| Male | Female | Other |\n");
    section.push_str("|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} |\n\n",
        format_percent(summary.gender.male),
        format_percent(summary.gender.female),
        format_percent(summary.gender.other),
    ));

    section
}

/// Generate the age distribution section.
fn generate_age_section(summary: &AggregateSummary) -> String {
    let mut section = String::new();

    section.push_str("## Age Distribution\n\n");
    section.push_str("| Age | Percentage |\n");
    section.push_str("|:---|:---:|\n");
    for bucket in &summary.age {
        section.push_str(&format!(
            "| {} | {} |\n",
            bucket.band,
            format_percent(bucket.value)
        ));
    }
    section.push('\n');

    section
}

/// Generate the top influencers table.
fn generate_top_section(records: &[InfluencerRecord], n: usize) -> String {
    let top = top_influencers(records, n);
    if top.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Top Influencers\n\n");
    section.push_str("| # | Influencer | Platform | Followers |\n");
    section.push_str("|:---:|:---|:---|:---:|\n");
    for (i, record) in top.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            i + 1,
            display_name(record),
            record.platform,
            format_count(record.follower_count)
        ));
    }
    section.push('\n');

    section
}

/// Generate one profile card per influencer.
fn generate_profiles_section(records: &[InfluencerRecord]) -> String {
    let mut section = String::new();

    section.push_str("## Influencer Profiles\n\n");

    if records.is_empty() {
        section.push_str(&format!("{}\n\n", NO_DATA));
        return section;
    }

    for record in records {
        section.push_str(&generate_profile_card(record));
    }

    section
}

/// Generate a single profile card.
fn generate_profile_card(record: &InfluencerRecord) -> String {
    let mut card = String::new();

    card.push_str(&format!(
        "### {} ({}) - {} followers\n\n",
        display_name(record),
        record.platform,
        format_count(record.follower_count)
    ));

    let origin: Vec<&str> = [record.location.as_str(), record.content_language.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !origin.is_empty() {
        card.push_str(&format!("*{}*\n\n", origin.join(" • ")));
    }

    card.push_str(&format!(
        "- **Avg. Views:** {}\n",
        format_count(record.average_views)
    ));
    card.push_str(&format!(
        "- **Avg. Reach:** {}\n",
        format_count(record.average_reach)
    ));
    card.push_str(&format!(
        "- **Avg. Branded Views:** {}\n",
        format_count(record.average_branded_views)
    ));

    let gender = record.gender_split;
    card.push_str(&format!(
        "- **Gender Split:** Male {:.0}% | Female {:.0}% | Other {:.0}%\n",
        gender.male, gender.female, gender.other
    ));

    if let Some(updated) = record.last_updated {
        card.push_str(&format!(
            "- **Last updated:** {}\n",
            updated.format("%Y-%m-%d")
        ));
    }

    card.push_str("\n---\n\n");

    card
}

/// Generate the report footer.
fn generate_footer() -> String {
    "*Report generated by Influencer Insight*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &DashboardReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate a compact plain-text summary for the console.
pub fn generate_text_summary(report: &DashboardReport) -> String {
    let summary = match report.summary {
        Some(ref summary) => summary,
        None => return format!("{}\n", NO_DATA),
    };

    let mut lines = Vec::new();

    lines.push(format!("Source: {}", report.metadata.source));
    lines.push(format!(
        "Influencers: {} | Followers: {}",
        summary.total_influencers,
        format_count(summary.total_followers)
    ));
    lines.push(format!(
        "Avg. Views: {} | Avg. Reach: {} | Branded: {}",
        format_count(summary.average_views),
        format_count(summary.average_reach),
        format_count(summary.average_branded_views)
    ));
    lines.push(format!(
        "Platforms: Instagram {} | YouTube {}",
        summary.platforms.instagram, summary.platforms.youtube
    ));
    lines.push(format!(
        "Gender: Male {} | Female {} | Other {}",
        format_percent(summary.gender.male),
        format_percent(summary.gender.female),
        format_percent(summary.gender.other)
    ));

    let ages: Vec<String> = summary
        .age
        .iter()
        .map(|b| format!("{} {}", b.band, format_percent(b.value)))
        .collect();
    lines.push(format!("Age: {}", ages.join(" | ")));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn display_name(record: &InfluencerRecord) -> &str {
    if record.username.is_empty() {
        &record.id
    } else {
        &record.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeSplit, GenderSplit};
    use chrono::{TimeZone, Utc};

    fn create_test_record(id: &str, username: &str, platform: Platform, followers: u64) -> InfluencerRecord {
        InfluencerRecord {
            id: id.to_string(),
            username: username.to_string(),
            platform,
            profile_picture: None,
            follower_count: followers,
            location: "Canada".to_string(),
            content_language: "English".to_string(),
            average_views: followers / 10,
            average_reach: followers / 8,
            average_branded_views: followers / 20,
            gender_split: GenderSplit {
                male: 55.0,
                female: 40.0,
                other: 5.0,
            },
            state_split: Default::default(),
            age_split: AgeSplit::from_values([5.0, 40.0, 30.0, 15.0, 5.0, 5.0]),
            last_updated: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        }
    }

    fn create_test_report(influencers: Vec<InfluencerRecord>) -> DashboardReport {
        let metadata = ReportMetadata {
            source: "Demo roster".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap(),
            seed: Some(42),
        };
        DashboardReport::new(metadata, Some(influencers))
    }

    fn sample_influencers() -> Vec<InfluencerRecord> {
        vec![
            create_test_record("1", "travel_mike", Platform::Instagram, 1_200_000),
            create_test_record("2", "TechReviewer", Platform::Youtube, 500_000),
            create_test_record("3", "", Platform::Instagram, 100),
        ]
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report(sample_influencers());
        let markdown = generate_markdown_report(&report, &ReportConfig::default());

        assert!(markdown.contains("# Influencer Insight"));
        assert!(markdown.contains("## Overview Stats"));
        assert!(markdown.contains("| 3 | 1.7M |"));
        assert!(markdown.contains("## Platform Distribution"));
        assert!(markdown.contains("| Instagram | 2 | 1.2M |"));
        assert!(markdown.contains("| YouTube | 1 | 500.0K |"));
        assert!(markdown.contains("## Gender Demographics"));
        assert!(markdown.contains("| 55% | 40% | 5% |"));
        assert!(markdown.contains("| 18-24 | 40% |"));
        assert!(markdown.contains("## Influencer Profiles"));
        assert!(markdown.contains("### travel_mike (Instagram) - 1.2M followers"));
        assert!(markdown.contains("- **Seed:** 42"));
    }

    #[test]
    fn test_top_section_orders_by_followers() {
        let section = generate_top_section(&sample_influencers(), 2);

        let mike = section.find("travel_mike").unwrap();
        let tech = section.find("TechReviewer").unwrap();
        assert!(mike < tech);
        assert!(!section.contains("| 3 |"));
    }

    #[test]
    fn test_profile_card_falls_back_to_id() {
        let record = create_test_record("inf-9", "", Platform::Youtube, 999_999);
        let card = generate_profile_card(&record);

        assert!(card.contains("### inf-9 (YouTube) - 1000.0K followers"));
        assert!(card.contains("*Canada • English*"));
        assert!(card.contains("Male 55% | Female 40% | Other 5%"));
        assert!(card.contains("2024-05-01"));
    }

    #[test]
    fn test_markdown_without_data() {
        let report = create_test_report(Vec::new());
        let markdown = generate_markdown_report(&report, &ReportConfig::default());

        assert!(markdown.contains(NO_DATA));
        assert!(!markdown.contains("## Overview Stats"));

        let options = ReportConfig {
            include_profiles: false,
            ..ReportConfig::default()
        };
        let markdown = generate_markdown_report(&report, &options);
        assert!(markdown.contains(NO_DATA));
        assert!(!markdown.contains("## Influencer Profiles"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report(sample_influencers());
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"summary\""));
        assert!(json.contains("\"total_followers\": 1700100"));
        assert!(json.contains("\"followerCount\""));

        let empty = generate_json_report(&create_test_report(Vec::new())).unwrap();
        assert!(empty.contains("\"summary\": null"));
    }

    #[test]
    fn test_generate_text_summary() {
        let report = create_test_report(sample_influencers());
        let text = generate_text_summary(&report);

        assert!(text.contains("Influencers: 3 | Followers: 1.7M"));
        assert!(text.contains("Platforms: Instagram 2 | YouTube 1"));
        assert!(text.contains("Age: 13-17 5%"));

        let empty = generate_text_summary(&create_test_report(Vec::new()));
        assert_eq!(empty, format!("{}\n", NO_DATA));
    }
}
