//! Leaderboard aggregation and views.

mod calculator;
mod views;

pub use calculator::MetricsCalculator;
pub use views::{top_gainers, LeaderboardFilter, TagFilter};
