//! Trader model representing one leaderboard account snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::equity::EquitySample;
use super::position::Position;

/// Classification label shown next to a trader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraderTag {
    Whale,
    Degen,
    Safe,
    Alpha,
    Trader,
}

impl TraderTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraderTag::Whale => "Whale",
            TraderTag::Degen => "Degen",
            TraderTag::Safe => "Safe",
            TraderTag::Alpha => "Alpha",
            TraderTag::Trader => "Trader",
        }
    }

    /// Legend text for the tag.
    pub fn description(&self) -> &'static str {
        match self {
            TraderTag::Whale => "Account value above $1M.",
            TraderTag::Degen => "Average leverage above 15x. High risk, high reward.",
            TraderTag::Safe => "Average leverage below 3x.",
            TraderTag::Alpha => "ROI above 100% of the monthly baseline for the window.",
            TraderTag::Trader => "No standout trait.",
        }
    }
}

impl fmt::Display for TraderTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TraderTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WHALE" => Ok(TraderTag::Whale),
            "DEGEN" => Ok(TraderTag::Degen),
            "SAFE" => Ok(TraderTag::Safe),
            "ALPHA" => Ok(TraderTag::Alpha),
            "TRADER" => Ok(TraderTag::Trader),
            other => anyhow::bail!("Unknown tag: {}", other),
        }
    }
}

/// Coarse bucket for the 1-10 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        if score < 4 {
            RiskBand::Low
        } else if score < 8 {
            RiskBand::Moderate
        } else {
            RiskBand::High
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
        })
    }
}

/// Leaderboard account with its positions and equity curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trader {
    /// 1-based position in generation order
    pub rank: usize,

    /// Wallet address (0x-prefixed, 40 lowercase hex digits)
    pub address: String,

    /// P&L over the reporting window in USD
    pub pnl: f64,

    pub total_account_value: f64,

    /// Return over the reporting window, in percent
    pub roi: f64,

    /// Win rate in percent
    pub win_rate: f64,

    pub total_trades: u32,

    pub sharpe_ratio: f64,

    /// Current open positions
    #[serde(default)]
    pub positions: Vec<Position>,

    /// Daily equity curve, oldest first
    #[serde(default)]
    pub history: Vec<EquitySample>,

    /// One or two classification labels
    pub tags: Vec<TraderTag>,

    /// Risk indicator from 1 (calm) to 10 (reckless)
    pub risk_score: u8,

    /// Max drawdown in percent
    pub max_drawdown: f64,
}

impl Trader {
    /// Shortened address, e.g. `0x1234...abcd`.
    pub fn display_name(&self) -> String {
        if self.address.len() > 10 {
            format!("{}...{}", &self.address[..6], &self.address[self.address.len() - 4..])
        } else {
            self.address.clone()
        }
    }

    /// Mean leverage across open positions, 1.0 when flat.
    pub fn average_leverage(&self) -> f64 {
        average_leverage(&self.positions)
    }

    /// Count of (long, short) positions.
    pub fn position_split(&self) -> (usize, usize) {
        let longs = self.positions.iter().filter(|p| p.is_long()).count();
        (longs, self.positions.len() - longs)
    }

    pub fn risk_band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }

    pub fn has_tag(&self, tag: TraderTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Case-insensitive address substring match.
    pub fn matches_search(&self, term: &str) -> bool {
        self.address.to_lowercase().contains(&term.to_lowercase())
    }

    /// Total unrealized P&L of open positions.
    pub fn unrealized_pnl(&self) -> f64 {
        self.positions.iter().map(|p| p.pnl).sum()
    }

    /// Equity at the end of the curve, if any.
    pub fn latest_equity(&self) -> Option<f64> {
        self.history.last().map(|s| s.equity)
    }
}

/// Mean leverage across positions, 1.0 when there are none.
pub fn average_leverage(positions: &[Position]) -> f64 {
    if positions.is_empty() {
        return 1.0;
    }
    positions.iter().map(|p| p.leverage as f64).sum::<f64>() / positions.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Instrument, PositionSide};

    fn trader_with(positions: Vec<Position>) -> Trader {
        Trader {
            rank: 1,
            address: "0xAbCdef0123456789abcdef0123456789abcdef01".to_lowercase(),
            pnl: 0.0,
            total_account_value: 100_000.0,
            roi: 0.0,
            win_rate: 50.0,
            total_trades: 100,
            sharpe_ratio: 2.0,
            positions,
            history: Vec::new(),
            tags: vec![TraderTag::Trader],
            risk_score: 5,
            max_drawdown: 10.0,
        }
    }

    #[test]
    fn test_average_leverage() {
        let positions = vec![
            Position::open(Instrument::Btc, PositionSide::Long, 10, 100.0, 1.0, 1.0),
            Position::open(Instrument::Eth, PositionSide::Short, 20, 100.0, 1.0, 1.0),
        ];
        assert_eq!(average_leverage(&positions), 15.0);
        assert_eq!(average_leverage(&[]), 1.0);
    }

    #[test]
    fn test_position_split() {
        let trader = trader_with(vec![
            Position::open(Instrument::Btc, PositionSide::Long, 2, 100.0, 1.0, 1.0),
            Position::open(Instrument::Btc, PositionSide::Long, 2, 100.0, 1.0, 1.0),
            Position::open(Instrument::Sol, PositionSide::Short, 2, 100.0, 1.0, 1.0),
        ]);
        assert_eq!(trader.position_split(), (2, 1));
    }

    #[test]
    fn test_display_and_search() {
        let trader = trader_with(Vec::new());
        assert_eq!(trader.display_name(), "0xabcd...ef01");
        assert!(trader.matches_search("ABCDEF"));
        assert!(!trader.matches_search("zz"));
    }

    #[test]
    fn test_risk_band() {
        assert_eq!(RiskBand::from_score(1), RiskBand::Low);
        assert_eq!(RiskBand::from_score(3), RiskBand::Low);
        assert_eq!(RiskBand::from_score(4), RiskBand::Moderate);
        assert_eq!(RiskBand::from_score(7), RiskBand::Moderate);
        assert_eq!(RiskBand::from_score(8), RiskBand::High);
        assert_eq!(RiskBand::from_score(10), RiskBand::High);
    }

    #[test]
    fn test_labels_respect_width() {
        assert_eq!(format!("[{:<7}]", TraderTag::Whale), "[Whale  ]");
        assert_eq!(format!("[{:>6}]", TraderTag::Safe), "[  Safe]");
        assert_eq!(format!("[{:<9}]", RiskBand::High), "[High     ]");
    }

    #[test]
    fn test_tag_parse() {
        assert_eq!("degen".parse::<TraderTag>().unwrap(), TraderTag::Degen);
        assert!("shrimp".parse::<TraderTag>().is_err());
    }
}
