//! Running counters for classified events.
//!
//! Counters start at zero when the process starts and only ever grow.

use super::event::Event;

/// Process-lifetime event counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Completed auctions.
    pub auctions: u64,
    /// LP orders the solver started processing.
    pub orders: u64,
    /// Sum of `num_solutions` across completed auctions.
    pub solutions: u64,
    /// Orders the solver failed to solve.
    pub errors: u64,
    /// Solved orders seen. Not part of activity detection.
    pub trades: u64,
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the counters for one event.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::AuctionCompleted { solution_count } => {
                self.auctions = self.auctions.saturating_add(1);
                self.solutions = self.solutions.saturating_add(*solution_count);
            }
            Event::OrderProcessed => self.orders = self.orders.saturating_add(1),
            Event::OrderFailed => self.errors = self.errors.saturating_add(1),
            Event::OrderSolved(_) => self.trades = self.trades.saturating_add(1),
            Event::Unrecognized => {}
        }
    }

    /// Copy of the current values.
    #[must_use]
    pub const fn snapshot(&self) -> Self {
        *self
    }

    /// Per-counter growth since an earlier snapshot.
    #[must_use]
    pub const fn delta_since(&self, earlier: &Self) -> Self {
        Self {
            auctions: self.auctions.saturating_sub(earlier.auctions),
            orders: self.orders.saturating_sub(earlier.orders),
            solutions: self.solutions.saturating_sub(earlier.solutions),
            errors: self.errors.saturating_sub(earlier.errors),
            trades: self.trades.saturating_sub(earlier.trades),
        }
    }

    /// Whether any counter that signals solver activity is non-zero.
    ///
    /// Used on deltas: solved orders alone never count as activity because
    /// every solution is preceded by an order being processed.
    #[must_use]
    pub const fn has_activity(&self) -> bool {
        self.auctions > 0 || self.orders > 0 || self.errors > 0
    }
}
