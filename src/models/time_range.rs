//! Reporting windows for the leaderboard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reporting window. Returns are synthesized against a monthly baseline and
/// scaled by the window's multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "24H")]
    Day,
    #[serde(rename = "7D")]
    Week,
    #[default]
    #[serde(rename = "30D")]
    Month,
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "ALL")]
    AllTime,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        TimeRange::Day,
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::YearToDate,
        TimeRange::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Day => "24H",
            TimeRange::Week => "7D",
            TimeRange::Month => "30D",
            TimeRange::YearToDate => "YTD",
            TimeRange::AllTime => "ALL",
        }
    }

    /// Scaling factor applied to the monthly baseline.
    pub fn multiplier(&self) -> f64 {
        match self {
            TimeRange::Day => 0.1,
            TimeRange::Week => 0.3,
            TimeRange::Month => 1.0,
            TimeRange::YearToDate => 4.5,
            TimeRange::AllTime => 8.0,
        }
    }

    /// Scale a monthly baseline ROI into this window.
    pub fn scale_roi(&self, baseline_roi: f64) -> f64 {
        baseline_roi * self.multiplier()
    }

    /// ROI above which a trader counts as "Alpha" for this window.
    pub fn alpha_threshold(&self) -> f64 {
        100.0 * self.multiplier()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "24H" | "DAY" => Ok(TimeRange::Day),
            "7D" | "WEEK" => Ok(TimeRange::Week),
            "30D" | "MONTH" => Ok(TimeRange::Month),
            "YTD" => Ok(TimeRange::YearToDate),
            "ALL" => Ok(TimeRange::AllTime),
            other => anyhow::bail!("Unknown time range: {} (expected 24H, 7D, 30D, YTD, ALL)", other),
        }
    }
}
