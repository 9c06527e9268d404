//! Client for the hosted text-generation model used for strategy analysis.

mod analysis_client;
mod types;

pub use analysis_client::StrategyAnalyst;
