//! Analysis modules.
//!
//! Reductions over influencer records that feed the dashboard.

pub mod aggregator;

pub use aggregator::*;
