//! HyperPulse leaderboard analytics
//!
//! Synthetic leaderboard of perpetual-futures traders with per-account
//! position detail, global market metrics, a live ticker, and AI-generated
//! strategy audits.

mod api;
mod config;
mod dashboard;
mod generator;
mod metrics;
mod models;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::api::StrategyAnalyst;
use crate::config::{AnalysisConfig, DashboardConfig};
use crate::dashboard::{DashboardEvent, LeaderboardSnapshot, RefreshScheduler};
use crate::generator::{LeaderboardGenerator, TickerGenerator};
use crate::metrics::{top_gainers, LeaderboardFilter, TagFilter};
use crate::models::{curve_drawdown, CoinPrice, GlobalMetrics, TimeRange, Trader};

/// HyperPulse CLI.
#[derive(Parser)]
#[command(name = "hyperpulse")]
#[command(about = "Leaderboard analytics for perpetual-futures traders", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Seed for reproducible leaderboards
    #[arg(long, env = "HYPERPULSE_SEED")]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the trader leaderboard
    Leaderboard {
        /// Number of traders to generate
        #[arg(short, long, default_value = "100")]
        count: usize,

        /// Reporting window (24H, 7D, 30D, YTD, ALL)
        #[arg(short, long, default_value = "30D")]
        range: TimeRange,

        /// Tag filter (ALL, WHALE, DEGEN, SAFE, ALPHA)
        #[arg(short, long, default_value = "ALL")]
        tag: TagFilter,

        /// Address substring to search for
        #[arg(short, long, default_value = "")]
        search: String,

        /// Maximum rows to print
        #[arg(long, default_value = "25")]
        limit: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show global metrics for a leaderboard
    Metrics {
        #[arg(short, long, default_value = "100")]
        count: usize,

        #[arg(short, long, default_value = "30D")]
        range: TimeRange,
    },

    /// Show one ticker snapshot
    Ticker,

    /// Show detailed stats for a trader
    Trader {
        /// Leaderboard rank of the trader
        rank: usize,

        #[arg(short, long, default_value = "100")]
        count: usize,

        #[arg(short, long, default_value = "30D")]
        range: TimeRange,

        /// Request an AI strategy audit
        #[arg(long)]
        analyze: bool,

        /// Text-generation model for the audit
        #[arg(long)]
        model: Option<String>,
    },

    /// Show the top gainers by P&L
    Spotlight {
        #[arg(short, long, default_value = "100")]
        count: usize,

        #[arg(short, long, default_value = "30D")]
        range: TimeRange,

        /// Number of traders to show
        #[arg(short, long, default_value = "3")]
        top: usize,
    },

    /// Refresh the leaderboard and ticker until Ctrl+C
    Watch {
        #[arg(short, long, default_value = "100")]
        count: usize,

        #[arg(short, long, default_value = "30D")]
        range: TimeRange,

        /// Leaderboard refresh interval in seconds
        #[arg(long, default_value = "30")]
        board_interval: u64,

        /// Ticker refresh interval in seconds
        #[arg(long, default_value = "5")]
        ticker_interval: u64,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = DashboardConfig {
        seed: cli.seed,
        analysis: AnalysisConfig::from_env(),
        ..Default::default()
    };

    let mut board_generator = match cli.seed {
        Some(seed) => LeaderboardGenerator::from_seed(seed),
        None => LeaderboardGenerator::new(),
    };

    match cli.command {
        Commands::Leaderboard {
            count,
            range,
            tag,
            search,
            limit,
            json,
        } => {
            info!(count = count, range = %range, filter = %tag, "Building leaderboard");

            let traders = board_generator.generate(count, range);
            let filter = LeaderboardFilter::new(search, tag);
            let rows: Vec<&Trader> = filter.apply(&traders).into_iter().take(limit).collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            if rows.is_empty() {
                println!("No traders match the current filter.");
                return Ok(());
            }

            if let TagFilter::Only(tag) = tag {
                println!("\n{}: {}", tag, tag.description());
            }

            println!(
                "\n{:>5} {:<15} {:>14} {:>10} {:>8} {:>5} {:>5}  {}",
                "RANK", "TRADER", format!("PNL ({})", range), "ROI", "WIN%", "POS", "RISK", "TAGS"
            );
            println!("{}", "-".repeat(86));

            for trader in rows {
                println!(
                    "{:>5} {:<15} {:>14} {:>9.1}% {:>7.1}% {:>5} {:>5}  {}",
                    trader.rank,
                    trader.display_name(),
                    format_usd_compact(trader.pnl),
                    trader.roi,
                    trader.win_rate,
                    trader.positions.len(),
                    trader.risk_score,
                    join_tags(trader)
                );
            }
        }

        Commands::Metrics { count, range } => {
            let snapshot = LeaderboardSnapshot::build(&mut board_generator, count, range);
            print_metrics(&snapshot.metrics, range, snapshot.traders.len());
        }

        Commands::Ticker => {
            let mut ticker = match cli.seed {
                Some(seed) => TickerGenerator::from_seed(seed),
                None => TickerGenerator::new(),
            };
            println!("{}", format_ticker(&ticker.snapshot()));
        }

        Commands::Trader {
            rank,
            count,
            range,
            analyze,
            model,
        } => {
            let traders = board_generator.generate(count, range);
            let trader = rank
                .checked_sub(1)
                .and_then(|i| traders.get(i))
                .ok_or_else(|| anyhow::anyhow!("No trader at rank {} (board has {})", rank, count))?;

            print_trader(trader, range);

            if analyze {
                if let Some(model) = model {
                    config.analysis.model = model;
                }

                info!(address = %trader.address, model = %config.analysis.model, "Requesting AI audit");
                let analyst = StrategyAnalyst::new(config.analysis.clone())?;
                let analysis = analyst.analyze(trader).await;

                println!("\n--- AI Strategy Audit ---");
                println!("{}", analysis);
            }
        }

        Commands::Spotlight { count, range, top } => {
            let traders = board_generator.generate(count, range);

            println!("\n=== Spotlight ({}) ===", range);
            for trader in top_gainers(&traders, top) {
                println!(
                    "Rank #{:<4} {}  ROI {:+.0}%  Profit {}",
                    trader.rank,
                    trader.address,
                    trader.roi,
                    format_usd_compact(trader.pnl)
                );
            }
        }

        Commands::Watch {
            count,
            range,
            board_interval,
            ticker_interval,
        } => {
            config.trader_count = count;
            config.time_range = range;
            config.leaderboard_refresh_secs = board_interval;
            config.ticker_refresh_secs = ticker_interval;

            let (tx, mut rx) = mpsc::channel(16);
            let handle = RefreshScheduler::new(config).start(tx);

            println!("\n=== HyperPulse Live ({}) ===", range);
            println!("Press Ctrl+C to stop.\n");

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        println!("\n\nStopping...");
                        break;
                    }
                    event = rx.recv() => {
                        match event {
                            Some(DashboardEvent::Leaderboard(snapshot)) => {
                                println!(
                                    "[{}] Board: {} traders | Vol {} | Avg ROI {:+.1}% | L/S {:.0}/{:.0} | Top {}",
                                    snapshot.generated_at.format("%H:%M:%S"),
                                    snapshot.traders.len(),
                                    format_usd_compact(snapshot.metrics.total_volume),
                                    snapshot.metrics.average_roi,
                                    snapshot.metrics.long_percentage,
                                    snapshot.metrics.short_percentage,
                                    snapshot
                                        .metrics
                                        .top_asset()
                                        .map(|c| c.to_string())
                                        .unwrap_or_else(|| "N/A".to_string())
                                );
                            }
                            Some(DashboardEvent::Ticker(quotes)) => {
                                println!("{}", format_ticker(&quotes));
                            }
                            None => break,
                        }
                    }
                }
            }

            handle.stop().await?;
        }

        Commands::Config => {
            println!("\n=== Dashboard Configuration ===\n");
            println!("  Traders:              {}", config.trader_count);
            println!("  Time Range:           {}", config.time_range);
            println!("  Board Refresh:        {}s", config.leaderboard_refresh_secs);
            println!("  Ticker Refresh:       {}s", config.ticker_refresh_secs);
            println!(
                "  Seed:                 {}",
                config.seed.map(|s| s.to_string()).unwrap_or_else(|| "random".to_string())
            );

            println!("\n=== Strategy Analysis ===\n");
            println!("  Model:                {}", config.analysis.model);
            println!("  Endpoint:             {}", config.analysis.base_url);
            println!("  Timeout:              {}s", config.analysis.timeout_secs);
            println!(
                "  API Key:              {}",
                if config.analysis.has_api_key() { "set" } else { "missing" }
            );

            println!("\n=== Time Multipliers ===\n");
            for range in TimeRange::ALL {
                println!("  {:<4}                  x{}", range, range.multiplier());
            }
        }
    }

    Ok(())
}

fn print_metrics(metrics: &GlobalMetrics, range: TimeRange, traders: usize) {
    println!("\n=== Global Metrics ({}, {} traders) ===", range, traders);
    println!("Total Volume:   {}", format_usd_compact(metrics.total_volume));
    println!("Average ROI:    {:+.1}%", metrics.average_roi);
    println!(
        "Market Bias:    {:.0}% long / {:.0}% short",
        metrics.long_percentage, metrics.short_percentage
    );

    println!("\n--- Top Traded Assets ---");
    if metrics.top_traded_coins.is_empty() {
        println!("  N/A");
    }
    for coin in &metrics.top_traded_coins {
        println!("  {:<6} {:>12}", coin.name, format_usd_compact(coin.value));
    }
}

fn print_trader(trader: &Trader, range: TimeRange) {
    println!("\n=== Trader #{}: {} ===", trader.rank, trader.display_name());
    println!("Address: {}", trader.address);
    println!("Tags:    {}", join_tags(trader));

    println!("\n--- Performance ({}) ---", range);
    println!("P&L:            {}", format_usd_compact(trader.pnl));
    println!("ROI:            {:+.2}%", trader.roi);
    println!("Account Value:  {}", format_usd_compact(trader.total_account_value));
    println!("Unrealized:     {}", format_usd_compact(trader.unrealized_pnl()));
    println!("Win Rate:       {:.1}%", trader.win_rate);
    println!("Total Trades:   {}", trader.total_trades);
    println!("Sharpe Ratio:   {:.2}", trader.sharpe_ratio);

    println!("\n--- Risk ---");
    println!("Risk Score:     {}/10 ({})", trader.risk_score, trader.risk_band());
    println!("Max Drawdown:   {:.1}%", trader.max_drawdown);
    println!("Curve Drawdown: {:.1}%", curve_drawdown(&trader.history));
    println!("Avg Leverage:   {:.1}x", trader.average_leverage());

    let (longs, shorts) = trader.position_split();
    println!(
        "\n--- Open Positions ({}: {} long / {} short) ---",
        trader.positions.len(),
        longs,
        shorts
    );
    for pos in &trader.positions {
        let pnl_sign = if pos.pnl >= 0.0 { "+" } else { "" };
        println!(
            "  {:<5} {:<5} {:>3}x  size {:>14.4} ({:>10}) @ {:.4} -> {:.4} ({}${:.2}, {:+.1}% on margin)",
            pos.side.as_str(),
            pos.coin,
            pos.leverage,
            pos.size,
            format_usd_compact(pos.size_usd()),
            pos.entry_price,
            pos.mark_price,
            pnl_sign,
            pos.pnl,
            pos.return_on_margin()
        );
    }

    println!(
        "\n--- Equity ({} days, now {}) ---",
        trader.history.len(),
        trader
            .latest_equity()
            .map(format_usd_compact)
            .unwrap_or_else(|| "N/A".to_string())
    );
    for sample in trader.history.iter().rev().take(7).rev() {
        println!(
            "  {:<7} {:>14}  ({:+.2})",
            sample.date,
            format_usd_compact(sample.equity),
            sample.pnl
        );
    }
}

fn format_ticker(quotes: &[CoinPrice]) -> String {
    quotes
        .iter()
        .map(|q| {
            let arrow = if q.is_up() { "▲" } else { "▼" };
            format!("{} ${:.2} {}{:.2}%", q.symbol, q.price, arrow, q.change_24h.abs())
        })
        .collect::<Vec<_>>()
        .join("  |  ")
}

fn join_tags(trader: &Trader) -> String {
    trader
        .tags
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format dollars as `$1.2M`, `$45.3k`, or `$812.00`.
fn format_usd_compact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    if abs >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.1}k", sign, abs / 1_000.0)
    } else {
        format!("{}${:.2}", sign, abs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_compact() {
        assert_eq!(format_usd_compact(2_500_000.0), "$2.5M");
        assert_eq!(format_usd_compact(-45_300.0), "-$45.3k");
        assert_eq!(format_usd_compact(812.0), "$812.00");
    }

    #[test]
    fn test_cli_parses_ranges_and_filters() {
        let cli = Cli::try_parse_from([
            "hyperpulse", "leaderboard", "--range", "ytd", "--tag", "whale",
        ])
        .unwrap();

        match cli.command {
            Commands::Leaderboard { range, tag, .. } => {
                assert_eq!(range, TimeRange::YearToDate);
                assert_eq!(tag, TagFilter::Only(crate::models::TraderTag::Whale));
            }
            _ => panic!("wrong subcommand"),
        }

        assert!(Cli::try_parse_from(["hyperpulse", "metrics", "--range", "1Y"]).is_err());
    }
}
