//! Synthetic data: leaderboard snapshots and the market ticker.

mod classify;
mod leaderboard;
mod ticker;

pub use leaderboard::LeaderboardGenerator;
pub use ticker::TickerGenerator;
