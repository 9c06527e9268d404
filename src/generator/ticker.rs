//! Synthetic market ticker.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{CoinPrice, Instrument};

/// Produces ticker snapshots, one quote per listed instrument.
pub struct TickerGenerator {
    rng: StdRng,
}

impl TickerGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fresh quotes: base price +/- 1%, 24h change within +/- 5%.
    pub fn snapshot(&mut self) -> Vec<CoinPrice> {
        Instrument::ALL
            .into_iter()
            .map(|symbol| {
                let base = symbol.price_basis().sample(&mut self.rng);
                CoinPrice {
                    symbol,
                    price: base * self.rng.gen_range(0.99..1.01),
                    change_24h: self.rng.gen_range(-5.0..5.0),
                }
            })
            .collect()
    }
}

impl Default for TickerGenerator {
    fn default() -> Self {
        Self::new()
    }
}
