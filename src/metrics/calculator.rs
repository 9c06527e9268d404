//! Calculator for leaderboard-wide metrics: volume, average ROI, long/short
//! bias, and the most traded instruments.

use statrs::statistics::Statistics;

use crate::models::{CoinVolume, GlobalMetrics, Instrument, Trader};

/// Number of instruments reported in the top traded list.
const TOP_COINS: usize = 5;

/// Calculator for computing global leaderboard metrics.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Reduce a leaderboard snapshot into global metrics.
    ///
    /// An empty board yields all-zero metrics.
    pub fn calculate(traders: &[Trader]) -> GlobalMetrics {
        let mut metrics = GlobalMetrics::default();

        if traders.is_empty() {
            return metrics;
        }

        metrics.average_roi = traders.iter().map(|t| t.roi).mean();

        Self::calculate_position_metrics(&mut metrics, traders);

        metrics
    }

    /// Volume, long/short split, and per-instrument notional.
    fn calculate_position_metrics(metrics: &mut GlobalMetrics, traders: &[Trader]) {
        let mut longs = 0usize;
        let mut shorts = 0usize;
        // Insertion-ordered so equal notionals keep first-seen order
        let mut by_coin: Vec<(Instrument, f64)> = Vec::new();

        for position in traders.iter().flat_map(|t| &t.positions) {
            let notional = position.notional();
            metrics.total_volume += notional;

            if position.is_long() {
                longs += 1;
            } else {
                shorts += 1;
            }

            match by_coin.iter_mut().find(|(coin, _)| *coin == position.coin) {
                Some((_, value)) => *value += notional,
                None => by_coin.push((position.coin, notional)),
            }
        }

        let total_positions = longs + shorts;
        if total_positions > 0 {
            metrics.long_percentage = longs as f64 / total_positions as f64 * 100.0;
            metrics.short_percentage = shorts as f64 / total_positions as f64 * 100.0;
        }

        // Stable sort
        by_coin.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        metrics.top_traded_coins = by_coin
            .into_iter()
            .take(TOP_COINS)
            .map(|(name, value)| CoinVolume { name, value })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::LeaderboardGenerator;
    use crate::models::{Position, PositionSide, TimeRange, TraderTag};

    fn trader(roi: f64, positions: Vec<Position>) -> Trader {
        Trader {
            rank: 1,
            address: "0x0000000000000000000000000000000000000001".to_string(),
            pnl: 0.0,
            total_account_value: 100_000.0,
            roi,
            win_rate: 60.0,
            total_trades: 100,
            sharpe_ratio: 2.0,
            positions,
            history: Vec::new(),
            tags: vec![TraderTag::Trader],
            risk_score: 5,
            max_drawdown: 10.0,
        }
    }

    /// Flat position with the given mark notional.
    fn flat(coin: Instrument, side: PositionSide, notional: f64) -> Position {
        Position::open(coin, side, 1, notional, 100.0, 100.0)
    }

    #[test]
    fn test_empty_board() {
        let metrics = MetricsCalculator::calculate(&[]);

        assert_eq!(metrics.total_volume, 0.0);
        assert_eq!(metrics.average_roi, 0.0);
        assert_eq!(metrics.long_percentage, 0.0);
        assert_eq!(metrics.short_percentage, 0.0);
        assert!(metrics.top_traded_coins.is_empty());
    }

    #[test]
    fn test_no_positions() {
        let traders = vec![trader(10.0, vec![]), trader(30.0, vec![])];
        let metrics = MetricsCalculator::calculate(&traders);

        assert_eq!(metrics.long_percentage, 0.0);
        assert_eq!(metrics.short_percentage, 0.0);
        assert!((metrics.average_roi - 20.0).abs() < 1e-9);
        assert!(metrics.top_asset().is_none());
    }

    #[test]
    fn test_volume_and_bias() {
        let traders = vec![
            trader(
                50.0,
                vec![
                    flat(Instrument::Btc, PositionSide::Long, 1_000.0),
                    flat(Instrument::Eth, PositionSide::Short, 500.0),
                ],
            ),
            trader(
                -10.0,
                vec![
                    flat(Instrument::Btc, PositionSide::Long, 2_000.0),
                    flat(Instrument::Sol, PositionSide::Long, 250.0),
                ],
            ),
        ];

        let metrics = MetricsCalculator::calculate(&traders);

        assert!((metrics.total_volume - 3_750.0).abs() < 1e-9);
        assert!((metrics.average_roi - 20.0).abs() < 1e-9);
        assert_eq!(metrics.long_percentage, 75.0);
        assert_eq!(metrics.short_percentage, 25.0);

        let names: Vec<_> = metrics.top_traded_coins.iter().map(|c| c.name).collect();
        assert_eq!(names, vec![Instrument::Btc, Instrument::Eth, Instrument::Sol]);
        assert!((metrics.top_traded_coins[0].value - 3_000.0).abs() < 1e-9);
        assert_eq!(metrics.top_asset(), Some(Instrument::Btc));
    }

    #[test]
    fn test_top_coins_ties_keep_first_seen() {
        let traders = vec![trader(
            0.0,
            vec![
                flat(Instrument::Wif, PositionSide::Long, 100.0),
                flat(Instrument::Arb, PositionSide::Long, 100.0),
                flat(Instrument::Tia, PositionSide::Short, 300.0),
            ],
        )];

        let metrics = MetricsCalculator::calculate(&traders);
        let names: Vec<_> = metrics.top_traded_coins.iter().map(|c| c.name).collect();
        assert_eq!(names, vec![Instrument::Tia, Instrument::Wif, Instrument::Arb]);
    }

    #[test]
    fn test_top_coins_capped_and_sorted() {
        let traders = LeaderboardGenerator::from_seed(5).generate(100, TimeRange::Month);
        let metrics = MetricsCalculator::calculate(&traders);

        let mut distinct: Vec<Instrument> = Vec::new();
        for p in traders.iter().flat_map(|t| &t.positions) {
            if !distinct.contains(&p.coin) {
                distinct.push(p.coin);
            }
        }

        assert_eq!(metrics.top_traded_coins.len(), distinct.len().min(5));
        for pair in metrics.top_traded_coins.windows(2) {
            assert!(pair[0].value >= pair[1].value);
        }
        assert!((metrics.long_percentage + metrics.short_percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_input_untouched() {
        let traders = LeaderboardGenerator::from_seed(8).generate(10, TimeRange::Week);
        let before = serde_json::to_string(&traders).unwrap();
        let _ = MetricsCalculator::calculate(&traders);
        assert_eq!(serde_json::to_string(&traders).unwrap(), before);
    }
}
