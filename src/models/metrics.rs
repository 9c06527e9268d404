//! Leaderboard-wide summary statistics.

use serde::{Deserialize, Serialize};

use super::market::Instrument;

/// Aggregated notional for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinVolume {
    pub name: Instrument,
    pub value: f64,
}

/// Summary of a leaderboard snapshot. Recomputed on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMetrics {
    /// Mark notional across every open position, USD
    pub total_volume: f64,

    /// Mean trader ROI in percent
    pub average_roi: f64,

    /// Share of positions that are long, in percent
    pub long_percentage: f64,

    /// Share of positions that are short, in percent
    pub short_percentage: f64,

    /// Up to five instruments by aggregated notional, largest first
    pub top_traded_coins: Vec<CoinVolume>,
}

impl GlobalMetrics {
    /// Most traded instrument, if anyone holds a position.
    pub fn top_asset(&self) -> Option<Instrument> {
        self.top_traded_coins.first().map(|c| c.name)
    }
}

impl Default for GlobalMetrics {
    fn default() -> Self {
        Self {
            total_volume: 0.0,
            average_roi: 0.0,
            long_percentage: 0.0,
            short_percentage: 0.0,
            top_traded_coins: Vec::new(),
        }
    }
}
