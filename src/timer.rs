//! Caller-driven timing.
//!
//! Nothing here reads a clock. The front end feeds [`FixedStep`] with
//! elapsed wall time; the engine feeds [`Countdown`] with simulated time,
//! one tick period per playing tick.

use std::time::Duration;

/// Upper bound on ticks released by a single [`FixedStep::advance`].
pub const MAX_CATCH_UP_TICKS: u32 = 5;

/// Fixed-rate tick accumulator.
#[derive(Debug, Clone)]
pub struct FixedStep {
    period: Duration,
    backlog: Duration,
}

impl FixedStep {
    /// # Panics
    ///
    /// Panics on a zero period.
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "tick period must be non-zero");
        Self {
            period,
            backlog: Duration::ZERO,
        }
    }

    /// Add elapsed time and return how many ticks are now due.
    ///
    /// After a long stall only [`MAX_CATCH_UP_TICKS`] are released and the
    /// rest of the backlog is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.backlog += elapsed;
        let mut due = 0;
        while self.backlog >= self.period {
            if due == MAX_CATCH_UP_TICKS {
                self.backlog = Duration::ZERO;
                break;
            }
            self.backlog -= self.period;
            due += 1;
        }
        due
    }

    pub fn reset(&mut self) {
        self.backlog = Duration::ZERO;
    }
}

/// One-shot countdown. Re-arming replaces the pending deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: Option<Duration>,
}

impl Countdown {
    pub fn arm(&mut self, duration: Duration) {
        self.remaining = Some(duration);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Time left, zero when idle.
    pub fn remaining(&self) -> Duration {
        self.remaining.unwrap_or(Duration::ZERO)
    }

    /// Run the countdown forward. Returns `true` exactly once, on the
    /// advance that exhausts it.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let Some(left) = self.remaining else {
            return false;
        };
        match left.checked_sub(elapsed) {
            Some(left) if !left.is_zero() => {
                self.remaining = Some(left);
                false
            }
            _ => {
                self.remaining = None;
                true
            }
        }
    }
}
