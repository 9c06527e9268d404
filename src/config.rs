//! Runtime configuration.

use serde::{Deserialize, Serialize};

use crate::models::TimeRange;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Configuration for the dashboard data pipeline and refresh cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Number of traders on the leaderboard
    pub trader_count: usize,

    /// Reporting window
    pub time_range: TimeRange,

    /// Seconds between leaderboard refreshes
    pub leaderboard_refresh_secs: u64,

    /// Seconds between ticker refreshes
    pub ticker_refresh_secs: u64,

    /// Fixed RNG seed for reproducible boards
    pub seed: Option<u64>,

    /// Strategy analysis settings
    pub analysis: AnalysisConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            trader_count: 100,
            time_range: TimeRange::Month,
            leaderboard_refresh_secs: 30,
            ticker_refresh_secs: 5,
            seed: None,
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Configuration for the text-generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// API key; analysis degrades to a fallback message without one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    pub model: String,

    pub base_url: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl AnalysisConfig {
    /// Read the API key from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());

        Self {
            api_key,
            ..Default::default()
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_secs: 30,
        }
    }
}
