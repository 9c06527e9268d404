//! Market model: the fixed instrument universe, base prices, and ticker entries.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Perpetual contract traded on the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Instrument {
    Btc,
    Eth,
    Sol,
    Hype,
    Arb,
    Sui,
    Tia,
    Wif,
    Pepe,
}

/// Reference price used to synthesize entry, mark, and ticker prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceBasis {
    /// Majors trade around a fixed reference.
    Anchored(f64),
    /// Alts have no stable reference; a fresh base is drawn on every lookup.
    Floating { min: f64, max: f64 },
}

impl PriceBasis {
    /// Resolve the base price for one lookup.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            PriceBasis::Anchored(price) => price,
            PriceBasis::Floating { min, max } => rng.gen_range(min..max),
        }
    }
}

impl Instrument {
    /// Every listed instrument, in ticker order.
    pub const ALL: [Instrument; 9] = [
        Instrument::Btc,
        Instrument::Eth,
        Instrument::Sol,
        Instrument::Hype,
        Instrument::Arb,
        Instrument::Sui,
        Instrument::Tia,
        Instrument::Wif,
        Instrument::Pepe,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Instrument::Btc => "BTC",
            Instrument::Eth => "ETH",
            Instrument::Sol => "SOL",
            Instrument::Hype => "HYPE",
            Instrument::Arb => "ARB",
            Instrument::Sui => "SUI",
            Instrument::Tia => "TIA",
            Instrument::Wif => "WIF",
            Instrument::Pepe => "PEPE",
        }
    }

    /// Base price table shared by the leaderboard and ticker generators.
    pub fn price_basis(&self) -> PriceBasis {
        match self {
            Instrument::Btc => PriceBasis::Anchored(65_000.0),
            Instrument::Eth => PriceBasis::Anchored(3_200.0),
            Instrument::Sol => PriceBasis::Anchored(145.0),
            _ => PriceBasis::Floating { min: 1.0, max: 20.0 },
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

impl FromStr for Instrument {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|i| i.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown instrument: {}", s))
    }
}

/// Ticker tape entry. Rebuilt wholesale on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPrice {
    pub symbol: Instrument,
    pub price: f64,
    /// 24h change in percent
    pub change_24h: f64,
}

impl CoinPrice {
    pub fn is_up(&self) -> bool {
        self.change_24h >= 0.0
    }
}
