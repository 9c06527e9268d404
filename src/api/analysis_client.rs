//! Strategy analysis via a hosted text-generation model.
//!
//! Builds an analyst prompt from a trader snapshot and returns the model's
//! markdown verdict. Failures never reach the caller: they are logged and
//! replaced by a fixed message for display.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::models::Trader;

use super::types::{GenerateContentRequest, GenerateContentResponse};

pub const MISSING_KEY_MESSAGE: &str = "API Key missing. Cannot generate analysis.";
pub const REQUEST_FAILED_MESSAGE: &str = "AI Analysis failed due to network or rate limit issues.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Analysis unavailable.";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl AnalysisError {
    /// Message shown in place of the analysis.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            AnalysisError::MissingApiKey => MISSING_KEY_MESSAGE,
            AnalysisError::Request(_)
            | AnalysisError::Status { .. }
            | AnalysisError::Decode(_) => REQUEST_FAILED_MESSAGE,
        }
    }
}

/// Client that asks the model for a trader's strategy profile.
pub struct StrategyAnalyst {
    client: Client,
    config: AnalysisConfig,
}

impl StrategyAnalyst {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Analyze a trader. Always returns displayable text.
    pub async fn analyze(&self, trader: &Trader) -> String {
        match self.request_analysis(trader).await {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(e) => {
                warn!(address = %trader.address, error = %e, "Strategy analysis failed");
                e.fallback_message().to_string()
            }
        }
    }

    async fn request_analysis(&self, trader: &Trader) -> Result<Option<String>, AnalysisError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AnalysisError::MissingApiKey)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        debug!(url = %url, address = %trader.address, "Requesting strategy analysis");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest::from_prompt(build_prompt(trader)))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status { status, body });
        }

        let body: GenerateContentResponse =
            response.json().await.map_err(AnalysisError::Decode)?;
        let text = body.text();

        if text.is_none() {
            let reason = body.candidates.first().and_then(|c| c.finish_reason.as_deref());
            debug!(finish_reason = ?reason, "Model returned no text");
        }

        Ok(text)
    }
}

/// Comma-separated position summary, or a placeholder when flat.
pub fn position_summary(trader: &Trader) -> String {
    if trader.positions.is_empty() {
        return "No active positions.".to_string();
    }

    trader
        .positions
        .iter()
        .map(|p| p.summary())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Analyst prompt for a trader snapshot.
pub fn build_prompt(trader: &Trader) -> String {
    format!(
        "Act as a senior crypto derivatives analyst. Analyze this trader's portfolio on Hyperliquid.

Stats:
- ROI: {roi:.2}%
- Win Rate: {win_rate:.2}%
- Max Drawdown: {drawdown:.2}%
- Risk Score: {risk}/10
- Total Equity: ${equity}

Current Positions:
{positions}

Task:
Provide a specific, actionable analysis in markdown format.
Structure the response exactly like this:

**Archetype:** [e.g. Aggressive Scalper, Institutional Whale, Swing Trader]
**Strengths:** [1-2 short sentences on what they do well]
**Weaknesses:** [1-2 short sentences on risks/drawbacks]
**Verdict:** [1 sentence conclusion]
",
        roi = trader.roi,
        win_rate = trader.win_rate,
        drawdown = trader.max_drawdown,
        risk = trader.risk_score,
        equity = group_thousands(trader.total_account_value),
        positions = position_summary(trader),
    )
}

/// Whole dollars with comma grouping, e.g. `1,234,567`.
fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
