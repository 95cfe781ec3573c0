//! Idle detection over fixed observation cycles.
//!
//! The detector is a two-state machine (`Active`, `Idle`) advanced once per
//! cycle. It decides when an idle report is due; delivering it is the
//! caller's job.

use std::num::NonZeroU64;

/// Current state of the detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdleState {
    #[default]
    Active,
    Idle,
}

/// Result of advancing the detector by one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Activity was observed; idle count reset.
    Active,
    /// No activity, no report due.
    Idle { cycles: u64 },
    /// No activity and this cycle lands on the report cadence.
    IdleReport { cycles: u64, minutes: u64 },
}

/// Tracks consecutive silent cycles.
#[derive(Debug, Clone)]
pub struct IdleDetector {
    interval_secs: u64,
    report_every: NonZeroU64,
    consecutive_idle_cycles: u64,
    state: IdleState,
}

impl IdleDetector {
    #[must_use]
    pub const fn new(interval_secs: u64, report_every: NonZeroU64) -> Self {
        Self {
            interval_secs,
            report_every,
            consecutive_idle_cycles: 0,
            state: IdleState::Active,
        }
    }

    /// Advance one cycle.
    ///
    /// At most one `IdleReport` is returned per call, and never while active.
    pub fn observe(&mut self, active: bool) -> CycleOutcome {
        if active {
            self.state = IdleState::Active;
            self.consecutive_idle_cycles = 0;
            return CycleOutcome::Active;
        }

        self.state = IdleState::Idle;
        self.consecutive_idle_cycles = self.consecutive_idle_cycles.saturating_add(1);
        let cycles = self.consecutive_idle_cycles;

        if cycles % self.report_every.get() == 0 {
            CycleOutcome::IdleReport {
                cycles,
                minutes: self.idle_minutes(),
            }
        } else {
            CycleOutcome::Idle { cycles }
        }
    }

    /// Total idle time in whole minutes.
    #[must_use]
    pub const fn idle_minutes(&self) -> u64 {
        self.consecutive_idle_cycles.saturating_mul(self.interval_secs) / 60
    }

    #[must_use]
    pub const fn state(&self) -> IdleState {
        self.state
    }

    #[must_use]
    pub const fn consecutive_idle_cycles(&self) -> u64 {
        self.consecutive_idle_cycles
    }
}
