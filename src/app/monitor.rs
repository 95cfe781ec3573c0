//! Cycle timer: idle detection and periodic stats reports.
//!
//! Runs on its own task. Each tick takes a snapshot of the shared counters
//! under a short lock, compares it with the previous tick and advances the
//! idle detector. The detector itself is owned by this task alone.

use std::sync::Arc;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::pipeline::SharedStats;
use crate::config::MonitorConfig;
use crate::domain::{CycleOutcome, IdleDetector, Stats};
use crate::port::{Alert, NotifierRegistry, StatsReport};

pub struct CycleMonitor {
    stats: SharedStats,
    notifiers: Arc<NotifierRegistry>,
    detector: IdleDetector,
    config: MonitorConfig,
    last: Stats,
}

impl CycleMonitor {
    /// Start observing from the counters' current values.
    pub fn new(stats: SharedStats, notifiers: Arc<NotifierRegistry>, config: MonitorConfig) -> Self {
        let last = stats.lock().snapshot();
        Self {
            stats,
            notifiers,
            detector: IdleDetector::new(config.interval.as_secs(), config.idle_report_every),
            config,
            last,
        }
    }

    /// Close one observation cycle.
    pub fn tick(&mut self) -> CycleOutcome {
        let current = self.stats.lock().snapshot();
        let delta = current.delta_since(&self.last);
        self.last = current;

        let outcome = self.detector.observe(delta.has_activity());
        match outcome {
            CycleOutcome::Active => {
                debug!(
                    auctions = delta.auctions,
                    orders = delta.orders,
                    errors = delta.errors,
                    "Active cycle"
                );
                if self.config.stats_reports {
                    self.notifiers.broadcast(&Alert::Stats(StatsReport {
                        cycle: delta,
                        totals: current,
                        interval_secs: self.config.interval.as_secs(),
                    }));
                }
            }
            CycleOutcome::Idle { cycles } => {
                debug!(cycles, "Idle cycle");
            }
            CycleOutcome::IdleReport { cycles, minutes } => {
                info!(cycles, minutes, "Solver idle");
                self.notifiers.broadcast(&Alert::Idle { cycles, minutes });
            }
        }
        outcome
    }

    /// Tick forever at the configured interval.
    pub async fn run(mut self) {
        let period = self.config.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = period.as_secs(), "Cycle monitor started");
        loop {
            ticker.tick().await;
            self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Event;
    use crate::testkit::RecordingNotifier;
    use parking_lot::Mutex;
    use std::num::NonZeroU64;
    use std::time::Duration;

    fn setup(stats_reports: bool) -> (SharedStats, RecordingNotifier, CycleMonitor) {
        let stats: SharedStats = Arc::new(Mutex::new(Stats::new()));
        let recorder = RecordingNotifier::new();
        let mut registry = NotifierRegistry::new();
        registry.register(Box::new(recorder.clone()));
        let config = MonitorConfig {
            interval: Duration::from_secs(300),
            idle_report_every: NonZeroU64::new(6).unwrap(),
            stats_reports,
        };
        let monitor = CycleMonitor::new(Arc::clone(&stats), Arc::new(registry), config);
        (stats, recorder, monitor)
    }

    #[test]
    fn test_idle_alerts_at_cycles_6_12_18() {
        let (_stats, recorder, mut monitor) = setup(true);
        let mut fired = Vec::new();

        for cycle in 1..=19u64 {
            if let CycleOutcome::IdleReport { .. } = monitor.tick() {
                fired.push(cycle);
            }
        }

        assert_eq!(fired, vec![6, 12, 18]);
        assert_eq!(
            recorder.alerts(),
            vec![
                Alert::Idle { cycles: 6, minutes: 30 },
                Alert::Idle { cycles: 12, minutes: 60 },
                Alert::Idle { cycles: 18, minutes: 90 },
            ]
        );
    }

    #[test]
    fn test_active_cycle_sends_stats_report_not_idle() {
        let (stats, recorder, mut monitor) = setup(true);
        stats.lock().apply(&Event::AuctionCompleted { solution_count: 2 });

        assert_eq!(monitor.tick(), CycleOutcome::Active);

        let alerts = recorder.alerts();
        assert_eq!(alerts.len(), 1);
        let Alert::Stats(report) = &alerts[0] else {
            panic!("expected stats report");
        };
        assert_eq!(report.cycle.auctions, 1);
        assert_eq!(report.cycle.solutions, 2);
        assert_eq!(report.totals.auctions, 1);
    }

    #[test]
    fn test_stats_reports_can_be_disabled() {
        let (stats, recorder, mut monitor) = setup(false);
        stats.lock().apply(&Event::OrderProcessed);
        monitor.tick();
        assert!(recorder.alerts().is_empty());
    }

    #[test]
    fn test_solved_orders_alone_are_not_activity() {
        let (stats, _recorder, mut monitor) = setup(false);
        stats
            .lock()
            .apply(&Event::OrderSolved(crate::domain::SolvedOrder::default()));
        assert_eq!(monitor.tick(), CycleOutcome::Idle { cycles: 1 });
    }

    #[test]
    fn test_counts_before_start_are_not_activity() {
        let stats: SharedStats = Arc::new(Mutex::new(Stats::new()));
        stats.lock().apply(&Event::OrderFailed);
        let mut monitor = CycleMonitor::new(
            Arc::clone(&stats),
            Arc::new(NotifierRegistry::new()),
            MonitorConfig::default(),
        );
        assert_eq!(monitor.tick(), CycleOutcome::Idle { cycles: 1 });
    }
}
