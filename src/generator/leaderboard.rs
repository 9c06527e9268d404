//! Synthetic leaderboard generation.

use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::models::{
    average_leverage, EquitySample, Instrument, Position, PositionSide, TimeRange, Trader,
    HISTORY_DAYS,
};

use super::classify::{classify, rank_decay, risk_score};

/// Probability that a generated position is long.
const LONG_BIAS: f64 = 0.55;

/// Generates self-consistent trader snapshots from a seedable random source.
pub struct LeaderboardGenerator {
    rng: StdRng,
    /// Day the equity curves end on
    anchor_date: NaiveDate,
}

impl LeaderboardGenerator {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            anchor_date: Utc::now().date_naive(),
        }
    }

    /// Create a reproducible generator.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            anchor_date: Utc::now().date_naive(),
        }
    }

    /// Pin the last day of generated equity curves.
    pub fn with_anchor_date(mut self, date: NaiveDate) -> Self {
        self.anchor_date = date;
        self
    }

    /// Build `count` traders for the reporting window, ranked in generation
    /// order. A zero count yields an empty board.
    pub fn generate(&mut self, count: usize, range: TimeRange) -> Vec<Trader> {
        debug!(count = count, range = %range, "Generating leaderboard");

        (0..count).map(|index| self.generate_trader(index, range)).collect()
    }

    fn generate_trader(&mut self, index: usize, range: TimeRange) -> Trader {
        let multiplier = range.multiplier();

        let baseline_roi = self.rng.gen_range(-20.0..300.0) * rank_decay(index);
        let roi = range.scale_roi(baseline_roi);

        let total_account_value = self.rng.gen_range(10_000.0..5_000_000.0);
        let pnl = total_account_value * (roi / 100.0);
        let positions = self.generate_positions(total_account_value);
        let avg_leverage = average_leverage(&positions);

        let win_rate = self.rng.gen_range(40.0..90.0);
        let max_drawdown = self.rng.gen_range(5.0..35.0);

        let tags = classify(avg_leverage, roi, total_account_value, range);
        let risk_score = risk_score(avg_leverage, win_rate, max_drawdown);

        let total_trades = (self.rng.gen_range(50.0..2_000.0) * multiplier.max(1.0)) as u32;
        let sharpe_ratio = self.rng.gen_range(1.0..4.0);
        let address = self.generate_address();
        let history = self.generate_history(total_account_value);

        Trader {
            rank: index + 1,
            address,
            pnl,
            total_account_value,
            roi,
            win_rate,
            total_trades,
            sharpe_ratio,
            positions,
            history,
            tags,
            risk_score,
            max_drawdown,
        }
    }

    /// 0x-prefixed, 40 lowercase hex digits.
    fn generate_address(&mut self) -> String {
        let bytes: [u8; 20] = self.rng.gen();
        format!("0x{}", hex::encode(bytes))
    }

    /// Between one and five open positions sized off the account value.
    fn generate_positions(&mut self, account_value: f64) -> Vec<Position> {
        let count = self.rng.gen_range(1..=5);

        (0..count)
            .map(|_| {
                let coin = Instrument::ALL[self.rng.gen_range(0..Instrument::ALL.len())];
                let side = if self.rng.gen_bool(LONG_BIAS) {
                    PositionSide::Long
                } else {
                    PositionSide::Short
                };
                let leverage = self.rng.gen_range(1..=24);
                let margin_used = account_value * self.rng.gen_range(0.05..0.3);

                let base_price = coin.price_basis().sample(&mut self.rng);
                let entry_price = base_price * self.rng.gen_range(0.95..1.05);
                let mark_price = base_price * self.rng.gen_range(0.98..1.02);

                Position::open(coin, side, leverage, margin_used, entry_price, mark_price)
            })
            .collect()
    }

    /// Daily equity curve ending on `end_equity`.
    ///
    /// Each day moves equity by -5% to +8% of the prior day's close. Returns
    /// are drawn first, then the curve is unwound backward from the current
    /// account value so every step stays inside that band.
    fn generate_history(&mut self, end_equity: f64) -> Vec<EquitySample> {
        let returns: Vec<f64> = (0..HISTORY_DAYS)
            .map(|_| self.rng.gen_range(-0.05..0.08))
            .collect();

        let mut closes = vec![0.0; HISTORY_DAYS];
        let mut equity = end_equity;
        for day in (0..HISTORY_DAYS).rev() {
            closes[day] = equity;
            equity /= 1.0 + returns[day];
        }

        // `equity` is now the open before the first day
        let mut prev = equity;
        closes
            .into_iter()
            .enumerate()
            .map(|(day, close)| {
                let pnl = close - prev;
                prev = close;

                let date = self.anchor_date - Duration::days((HISTORY_DAYS - 1 - day) as i64);
                EquitySample {
                    date: date.format("%b %-d").to_string(),
                    pnl,
                    equity: close,
                }
            })
            .collect()
    }
}

impl Default for LeaderboardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TraderTag;

    fn board(count: usize, range: TimeRange) -> Vec<Trader> {
        LeaderboardGenerator::from_seed(42).generate(count, range)
    }

    #[test]
    fn test_count_and_ranks() {
        for count in [0, 1, 17, 100] {
            let traders = board(count, TimeRange::Month);
            assert_eq!(traders.len(), count);
            for (i, t) in traders.iter().enumerate() {
                assert_eq!(t.rank, i + 1);
            }
        }

        assert_eq!(board(1, TimeRange::Day)[0].rank, 1);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let a = LeaderboardGenerator::from_seed(9)
            .with_anchor_date(date)
            .generate(10, TimeRange::Week);
        let b = LeaderboardGenerator::from_seed(9)
            .with_anchor_date(date)
            .generate(10, TimeRange::Week);

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.address, y.address);
            assert_eq!(x.roi, y.roi);
            assert_eq!(x.positions.len(), y.positions.len());
            assert_eq!(x.history.last().unwrap().date, y.history.last().unwrap().date);
        }
    }

    #[test]
    fn test_trader_invariants() {
        for range in TimeRange::ALL {
            for t in board(150, range) {
                assert!((t.pnl - t.total_account_value * t.roi / 100.0).abs() < 1e-6);
                assert!((10_000.0..5_000_000.0).contains(&t.total_account_value));
                assert!((40.0..90.0).contains(&t.win_rate));
                assert!((5.0..35.0).contains(&t.max_drawdown));
                assert!((1..=10).contains(&t.risk_score));
                assert!(!t.tags.is_empty() && t.tags.len() <= 2);
                assert!(t.total_trades >= 50);
            }
        }
    }

    #[test]
    fn test_roi_bounds_follow_range() {
        for t in board(50, TimeRange::Day) {
            assert!(t.roi >= -2.0 && t.roi <= 30.0);
        }
        for t in board(50, TimeRange::AllTime) {
            assert!(t.roi >= -160.0 && t.roi <= 2_400.0);
        }
    }

    #[test]
    fn test_deep_ranks_are_clamped() {
        let traders = board(260, TimeRange::Month);
        for t in &traders[200..] {
            assert_eq!(t.roi, 0.0);
            assert_eq!(t.pnl, 0.0);
        }
    }

    #[test]
    fn test_address_format() {
        for t in board(20, TimeRange::Month) {
            assert_eq!(t.address.len(), 42);
            assert!(t.address.starts_with("0x"));
            assert!(t.address[2..]
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_positions() {
        for t in board(100, TimeRange::Month) {
            assert!((1..=5).contains(&t.positions.len()));
            for p in &t.positions {
                assert!((1..=24).contains(&p.leverage));
                let margin_pct = p.margin_used / t.total_account_value;
                assert!((0.05..0.3).contains(&margin_pct));

                let expected = p.size_usd() * p.side.sign() * (p.mark_price - p.entry_price)
                    / p.entry_price;
                assert!((p.pnl - expected).abs() < 1e-6 * p.size_usd().max(1.0));

                if p.coin == Instrument::Btc {
                    assert!(p.entry_price >= 65_000.0 * 0.95 && p.entry_price <= 65_000.0 * 1.05);
                    assert!(p.mark_price >= 65_000.0 * 0.98 && p.mark_price <= 65_000.0 * 1.02);
                }
            }
        }
    }

    #[test]
    fn test_history() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let traders = LeaderboardGenerator::from_seed(3)
            .with_anchor_date(date)
            .generate(100, TimeRange::Month);

        for t in &traders {
            assert_eq!(t.history.len(), HISTORY_DAYS);

            let mut prev = t.history[0].equity - t.history[0].pnl;
            for s in &t.history {
                assert!((s.equity - (prev + s.pnl)).abs() < 1e-6);

                // Every day, including the last, stays within -5%..+8%
                let daily = s.pnl / prev;
                assert!(
                    (-0.05 - 1e-9..0.08 + 1e-9).contains(&daily),
                    "rank {} day {} moved {}",
                    t.rank,
                    s.date,
                    daily
                );
                prev = s.equity;
            }

            let last = t.history.last().unwrap();
            assert!((last.equity - t.total_account_value).abs() < 1e-6);
            assert!(t.history.iter().all(|s| s.equity > 0.0));
            assert_eq!(last.date, "Mar 15");
            assert_eq!(t.history[0].date, "Feb 15");
        }
    }

    #[test]
    fn test_tags_match_rules() {
        for t in board(100, TimeRange::Month) {
            let lev = t.average_leverage();
            if lev > 15.0 {
                assert_eq!(t.tags[0], TraderTag::Degen);
            } else if lev < 3.0 {
                assert_eq!(t.tags[0], TraderTag::Safe);
            }
            if t.has_tag(TraderTag::Trader) {
                assert_eq!(t.tags.len(), 1);
            }
        }
    }
}
