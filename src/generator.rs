//! Mock influencer data generation.
//!
//! Produces plausible statistics for demo dashboards. Generation is
//! driven by a seeded RNG so the same seed always yields the same data.

use crate::models::{AgeSplit, GenderSplit, InfluencerRecord, Platform, SheetRow, StateSplit};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const LANGUAGES: [&str; 5] = ["English", "Spanish", "Hindi", "French", "German"];

const LOCATIONS: [&str; 7] = [
    "United States",
    "India",
    "United Kingdom",
    "Canada",
    "Australia",
    "Brazil",
    "Japan",
];

const STATES: [&str; 10] = [
    "California",
    "New York",
    "Texas",
    "Florida",
    "Illinois",
    "Pennsylvania",
    "Ohio",
    "Georgia",
    "North Carolina",
    "Michigan",
];

const INSTAGRAM_HANDLES: [&str; 6] = [
    "beauty_by_jane",
    "travel_with_mike",
    "tech_reviewer",
    "fitness_pro",
    "food_lover",
    "lifestyle_guru",
];

const YOUTUBE_HANDLES: [&str; 5] = [
    "TechReviews",
    "GamingWithJosh",
    "CookingMasters",
    "FitnessJourney",
    "TravelVlogs",
];

/// Roster records draw from the first five locations only.
const ROSTER_LOCATIONS: usize = 5;

/// Roster records split their audience over these states, in this order.
const ROSTER_STATES: [&str; 5] = ["California", "New York", "Texas", "Florida", "Illinois"];

const REACH_MULTIPLIER: f64 = 1.2;

/// Which location and state pools a record draws from.
#[derive(Debug, Clone, Copy)]
enum Audience {
    Sample,
    Roster,
}

/// Seeded generator for mock influencer records.
pub struct MockGenerator {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl MockGenerator {
    /// Create a generator. `now` stamps every record's `last_updated`.
    pub fn new(seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now,
        }
    }

    /// Generate `count` random influencers with ids `inf-1..inf-N`.
    pub fn generate(&mut self, count: usize) -> Vec<InfluencerRecord> {
        debug!("Generating {} mock influencers", count);

        (0..count)
            .map(|i| {
                let platform = Platform::RECOGNIZED[self.rng.random_range(0..Platform::RECOGNIZED.len())].clone();
                let handles: &[&str] = match platform {
                    Platform::Instagram => &INSTAGRAM_HANDLES,
                    _ => &YOUTUBE_HANDLES,
                };
                let username = format!(
                    "{}{}",
                    self.pick(handles),
                    self.rng.random_range(0..1000)
                );
                self.build_record(format!("inf-{}", i + 1), username, platform, Audience::Sample)
            })
            .collect()
    }

    /// Generate one record per roster row, keeping the row's identity.
    pub fn generate_for_roster(&mut self, rows: &[SheetRow]) -> Vec<InfluencerRecord> {
        debug!("Generating statistics for {} roster rows", rows.len());

        rows.iter()
            .map(|row| {
                self.build_record(
                    row.id.clone(),
                    row.username.clone(),
                    row.platform.clone(),
                    Audience::Roster,
                )
            })
            .collect()
    }

    fn build_record(
        &mut self,
        id: String,
        username: String,
        platform: Platform,
        audience: Audience,
    ) -> InfluencerRecord {
        let is_instagram = platform == Platform::Instagram;

        let follower_base = if is_instagram { 10_000.0 } else { 50_000.0 };
        let follower_count = ((self.rng.random::<f64>() * 20.0 + 1.0) * follower_base).floor();

        let views_multiplier = if is_instagram { 0.2 } else { 0.1 };
        let branded_multiplier = if is_instagram { 0.8 } else { 0.6 };

        let (location, state_split) = match audience {
            Audience::Sample => (self.pick(&LOCATIONS), self.state_split()),
            Audience::Roster => (
                self.pick(&LOCATIONS[..ROSTER_LOCATIONS]),
                self.roster_state_split(),
            ),
        };
        let content_language = self.pick(&LANGUAGES).to_string();

        InfluencerRecord {
            id,
            username,
            platform,
            profile_picture: None,
            follower_count: follower_count as u64,
            location: location.to_string(),
            content_language,
            average_views: (follower_count * views_multiplier).floor() as u64,
            average_reach: (follower_count * views_multiplier * REACH_MULTIPLIER).floor() as u64,
            average_branded_views: (follower_count * views_multiplier * branded_multiplier).floor()
                as u64,
            gender_split: self.gender_split(),
            state_split,
            age_split: self.age_split(),
            last_updated: Some(self.now),
        }
    }

    /// Male 20..80, female 5..(100 - male), other takes the rest.
    fn gender_split(&mut self) -> GenderSplit {
        let male = self.rng.random_range(0..60u32) + 20;
        let female = self.rng.random_range(0..95 - male) + 5;
        let other = 100 - male - female;

        GenderSplit {
            male: f64::from(male),
            female: f64::from(female),
            other: f64::from(other),
        }
    }

    /// Each band draws from what the younger bands left; 55+ takes the rest.
    fn age_split(&mut self) -> AgeSplit {
        let teen = self.rng.random_range(0..15u32);
        let young_adult = self.rng.random_range(0..50 - teen) + 20;
        let adult = self.rng.random_range(0..80 - teen - young_adult) + 10;
        let mid_adult = self.rng.random_range(0..95 - teen - young_adult - adult) + 5;
        let mature = self.rng.random_range(0..100 - teen - young_adult - adult - mid_adult);
        let senior = 100 - teen - young_adult - adult - mid_adult - mature;

        AgeSplit::from_values([teen, young_adult, adult, mid_adult, mature, senior].map(f64::from))
    }

    /// Shares over 3 to 7 draws of the state list, summing to 100.
    fn state_split(&mut self) -> StateSplit {
        let mut split = StateSplit::new();
        let draws: u32 = self.rng.random_range(3..=7);
        let mut remaining: u32 = 100;

        for j in 0..draws - 1 {
            let share = if j == draws - 2 {
                remaining
            } else {
                self.rng.random_range(0..remaining - (draws - j - 1)) + 1
            };
            let state = self.pick(&STATES).to_string();
            split.insert(state, f64::from(share));
            remaining -= share;
        }

        // Last draw gets whatever is left, possibly overwriting an earlier one.
        let state = self.pick(&STATES).to_string();
        split.insert(state, f64::from(remaining));

        split
    }

    /// Random shares for the first four roster states; the fourth takes what
    /// is left, so Illinois always ends up with 0.
    fn roster_state_split(&mut self) -> StateSplit {
        let mut split = StateSplit::new();
        let mut remaining: u32 = 100;

        for (i, state) in ROSTER_STATES[..4].iter().enumerate() {
            let share = if i == 3 {
                remaining
            } else {
                self.rng.random_range(0..remaining - (3 - i as u32)) + 1
            };
            split.insert(state.to_string(), f64::from(share));
            remaining -= share;
        }
        split.insert(ROSTER_STATES[4].to_string(), f64::from(remaining));

        split
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.rng.random_range(0..items.len())]
    }
}
