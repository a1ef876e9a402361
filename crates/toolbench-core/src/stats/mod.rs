//! Live benchmark statistics

mod aggregator;
mod types;

pub use aggregator::StatsAggregator;
pub use types::{AggregateStats, CategoryTally, PassRate};
