//! Data models for traders, positions, equity curves, markets, and metrics.

mod equity;
mod market;
mod metrics;
mod position;
mod time_range;
mod trader;

pub use equity::{curve_drawdown, EquitySample, HISTORY_DAYS};
pub use market::{CoinPrice, Instrument};
pub use metrics::{CoinVolume, GlobalMetrics};
pub use position::{Position, PositionSide};
pub use time_range::TimeRange;
pub use trader::{average_leverage, Trader, TraderTag};
