//! Position model representing an open perpetual exposure.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::market::Instrument;

/// Direction of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSide::Long => "LONG",
            PositionSide::Short => "SHORT",
        }
    }

    /// +1 for longs, -1 for shorts.
    pub fn sign(&self) -> f64 {
        match self {
            PositionSide::Long => 1.0,
            PositionSide::Short => -1.0,
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Open position inside a trader snapshot. Immutable once opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Contract traded
    pub coin: Instrument,

    /// Size in base units
    pub size: f64,

    /// Average entry price
    pub entry_price: f64,

    /// Current mark price
    pub mark_price: f64,

    /// Unrealized P&L in USD
    pub pnl: f64,

    /// Leverage multiplier (1x to 24x)
    pub leverage: u32,

    pub side: PositionSide,

    /// Margin committed in USD
    pub margin_used: f64,
}

impl Position {
    /// Open a position sized from committed margin and leverage.
    ///
    /// Notional at entry is `margin_used * leverage`; base size and unrealized
    /// P&L are derived from it against the mark price.
    pub fn open(
        coin: Instrument,
        side: PositionSide,
        leverage: u32,
        margin_used: f64,
        entry_price: f64,
        mark_price: f64,
    ) -> Self {
        let size_usd = margin_used * leverage as f64;
        let price_move = (mark_price - entry_price) / entry_price;

        Self {
            coin,
            size: size_usd / entry_price,
            entry_price,
            mark_price,
            pnl: size_usd * side.sign() * price_move,
            leverage,
            side,
            margin_used,
        }
    }

    /// Notional at entry in USD.
    pub fn size_usd(&self) -> f64 {
        self.size * self.entry_price
    }

    /// Notional at the current mark in USD.
    pub fn notional(&self) -> f64 {
        self.size * self.mark_price
    }

    /// Unrealized return on committed margin, in percent.
    pub fn return_on_margin(&self) -> f64 {
        if self.margin_used > 0.0 {
            self.pnl / self.margin_used * 100.0
        } else {
            0.0
        }
    }

    pub fn is_long(&self) -> bool {
        self.side == PositionSide::Long
    }

    /// One-line summary, e.g. `LONG BTC (Lev: 10x, PnL: $1234)`.
    pub fn summary(&self) -> String {
        format!(
            "{} {} (Lev: {}x, PnL: ${:.0})",
            self.side, self.coin, self.leverage, self.pnl
        )
    }
}
