//! Tagging and risk scoring rules for generated traders.

use crate::models::{TimeRange, TraderTag};

/// Maximum number of tags carried by a trader.
pub const MAX_TAGS: usize = 2;

const WHALE_ACCOUNT_VALUE: f64 = 1_000_000.0;
const DEGEN_LEVERAGE: f64 = 15.0;
const SAFE_LEVERAGE: f64 = 3.0;

/// Rank-based decay applied to the baseline ROI of trader `index`.
///
/// Earlier indexes skew toward larger returns. The linear factor reaches zero
/// at index 200 and is clamped there so deep ranks never flip the sign of the
/// baseline.
pub fn rank_decay(index: usize) -> f64 {
    (1.0 - 0.005 * index as f64).max(0.0)
}

/// Classify a trader. Evaluation order is leverage bucket, Alpha, Whale; the
/// first two labels win and "Trader" is the fallback.
pub fn classify(
    average_leverage: f64,
    roi: f64,
    account_value: f64,
    range: TimeRange,
) -> Vec<TraderTag> {
    let mut tags = Vec::with_capacity(3);

    if average_leverage > DEGEN_LEVERAGE {
        tags.push(TraderTag::Degen);
    } else if average_leverage < SAFE_LEVERAGE {
        tags.push(TraderTag::Safe);
    }

    if roi > range.alpha_threshold() {
        tags.push(TraderTag::Alpha);
    }
    if account_value > WHALE_ACCOUNT_VALUE {
        tags.push(TraderTag::Whale);
    }
    if tags.is_empty() {
        tags.push(TraderTag::Trader);
    }

    tags.truncate(MAX_TAGS);
    tags
}

/// Additive 1-10 risk score from leverage, win rate (%), and drawdown (%).
pub fn risk_score(average_leverage: f64, win_rate: f64, max_drawdown: f64) -> u8 {
    let mut score: i32 = 5;

    if average_leverage > 15.0 {
        score += 3;
    } else if average_leverage > 5.0 {
        score += 1;
    }

    if win_rate < 45.0 {
        score += 2;
    }
    if max_drawdown > 20.0 {
        score += 2;
    }

    score.clamp(1, 10) as u8
}
