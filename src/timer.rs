//! Per-turn time keeping.
//!
//! The search only ever asks one question, "has this turn run past its
//! budget?", and only between root moves. A root move that is already being
//! searched always runs to completion.

use std::time::Instant;

/// Milliseconds elapsed since the current turn began.
pub trait Clock {
    fn elapsed_ms(&self) -> u64;
}

/// Wall clock started when the turn starts.
#[derive(Debug, Clone, Copy)]
pub struct TurnClock {
    start: Instant,
}

impl TurnClock {
    pub fn start() -> Self {
        TurnClock {
            start: Instant::now(),
        }
    }
}

impl Default for TurnClock {
    fn default() -> Self {
        TurnClock::start()
    }
}

impl Clock for TurnClock {
    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGovernor {
    budget_ms: u64,
}

impl TimeGovernor {
    pub fn new(budget_ms: u64) -> Self {
        TimeGovernor { budget_ms }
    }

    pub fn budget_ms(&self) -> u64 {
        self.budget_ms
    }

    pub fn out_of_time<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        clock.elapsed_ms() > self.budget_ms
    }
}
