//! Equity curve samples.

use serde::{Deserialize, Serialize};

/// Number of daily samples in a trader's equity curve.
pub const HISTORY_DAYS: usize = 30;

/// One day on an account's equity curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquitySample {
    /// Display label, e.g. "Oct 17"
    pub date: String,

    /// P&L booked that day
    pub pnl: f64,

    /// Equity after that day's P&L
    pub equity: f64,
}

/// Largest peak-to-trough decline along a curve, in percent.
pub fn curve_drawdown(history: &[EquitySample]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd_pct = 0.0f64;

    for sample in history {
        if sample.equity > peak {
            peak = sample.equity;
        }

        if peak > 0.0 {
            let dd_pct = (peak - sample.equity) / peak * 100.0;
            if dd_pct > max_dd_pct {
                max_dd_pct = dd_pct;
            }
        }
    }

    max_dd_pct
}
