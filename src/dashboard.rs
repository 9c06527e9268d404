//! Refresh scheduler: periodic leaderboard and ticker snapshots.
//!
//! The leaderboard and the ticker refresh on independent timers. Each task
//! owns its generator, so the two share no mutable state; snapshots are
//! published to the presentation layer over a channel.

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::generator::{LeaderboardGenerator, TickerGenerator};
use crate::metrics::MetricsCalculator;
use crate::models::{CoinPrice, GlobalMetrics, TimeRange, Trader};

/// Leaderboard with its derived metrics.
#[derive(Debug, Clone)]
pub struct LeaderboardSnapshot {
    pub time_range: TimeRange,
    pub traders: Vec<Trader>,
    pub metrics: GlobalMetrics,
    pub generated_at: DateTime<Utc>,
}

impl LeaderboardSnapshot {
    /// Generate a board and aggregate it.
    pub fn build(generator: &mut LeaderboardGenerator, count: usize, range: TimeRange) -> Self {
        let traders = generator.generate(count, range);
        let metrics = MetricsCalculator::calculate(&traders);

        Self {
            time_range: range,
            traders,
            metrics,
            generated_at: Utc::now(),
        }
    }
}

/// Update published by the scheduler.
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    Leaderboard(LeaderboardSnapshot),
    Ticker(Vec<CoinPrice>),
}

/// Spawns the refresh tasks.
pub struct RefreshScheduler {
    config: DashboardConfig,
}

/// Running scheduler. Tasks exit when the handle is stopped or dropped, or
/// when the event receiver goes away.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    /// Start both refresh tasks. Each fires immediately, then on its cadence.
    pub fn start(self, events: mpsc::Sender<DashboardEvent>) -> SchedulerHandle {
        let (shutdown, shutdown_rx) = watch::channel(false);

        info!(
            traders = self.config.trader_count,
            range = %self.config.time_range,
            leaderboard_secs = self.config.leaderboard_refresh_secs,
            ticker_secs = self.config.ticker_refresh_secs,
            "Starting refresh scheduler"
        );

        let (board_gen, ticker_gen) = match self.config.seed {
            Some(seed) => (
                LeaderboardGenerator::from_seed(seed),
                TickerGenerator::from_seed(seed.wrapping_add(1)),
            ),
            None => (LeaderboardGenerator::new(), TickerGenerator::new()),
        };

        let tasks = vec![
            tokio::spawn(Self::leaderboard_task(
                board_gen,
                self.config.trader_count,
                self.config.time_range,
                period(self.config.leaderboard_refresh_secs),
                events.clone(),
                shutdown_rx.clone(),
            )),
            tokio::spawn(Self::ticker_task(
                ticker_gen,
                period(self.config.ticker_refresh_secs),
                events,
                shutdown_rx,
            )),
        ];

        SchedulerHandle { shutdown, tasks }
    }

    async fn leaderboard_task(
        mut generator: LeaderboardGenerator,
        count: usize,
        range: TimeRange,
        every: Duration,
        events: mpsc::Sender<DashboardEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticks = interval(every);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticks.tick() => {}
                _ = shutdown.changed() => break,
            }

            let snapshot = LeaderboardSnapshot::build(&mut generator, count, range);
            debug!(
                traders = snapshot.traders.len(),
                avg_roi = snapshot.metrics.average_roi,
                "Leaderboard refreshed"
            );

            if events.send(DashboardEvent::Leaderboard(snapshot)).await.is_err() {
                warn!("Leaderboard receiver dropped, stopping refresh");
                break;
            }
        }
    }

    async fn ticker_task(
        mut generator: TickerGenerator,
        every: Duration,
        events: mpsc::Sender<DashboardEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticks = interval(every);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticks.tick() => {}
                _ = shutdown.changed() => break,
            }

            if events.send(DashboardEvent::Ticker(generator.snapshot())).await.is_err() {
                warn!("Ticker receiver dropped, stopping refresh");
                break;
            }
        }
    }
}

impl SchedulerHandle {
    /// Signal both tasks and wait for them to exit.
    pub async fn stop(self) -> Result<()> {
        // Receivers live inside the tasks; a send error means they already exited
        let _ = self.shutdown.send(true);

        for task in self.tasks {
            task.await?;
        }

        info!("Refresh scheduler stopped");
        Ok(())
    }
}

fn period(secs: u64) -> Duration {
    Duration::from_secs(secs.max(1))
}
