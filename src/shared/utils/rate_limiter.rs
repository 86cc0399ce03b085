use crate::shared::errors::{AppError, AppResult};
use std::time::{Duration, Instant};

/// Fixed-window call counter.
///
/// The counter resets the moment a check happens after the window has
/// elapsed; it never sleeps or retries, it only reports.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    uses_per_cycle: u32,
    cycle_length: Duration,
    cycle_start: Instant,
    uses_this_cycle: u32,
}

impl RateLimiter {
    /// The first window is anchored at construction time
    pub fn new(uses_per_cycle: u32, cycle_length: Duration) -> Self {
        Self::anchored_at(uses_per_cycle, cycle_length, Instant::now())
    }

    pub fn anchored_at(uses_per_cycle: u32, cycle_length: Duration, cycle_start: Instant) -> Self {
        Self {
            uses_per_cycle,
            cycle_length,
            cycle_start,
            uses_this_cycle: 0,
        }
    }

    /// Free-tier short window: 12 searches every 30 seconds
    pub fn short_term() -> Self {
        Self::new(12, Duration::from_secs(30))
    }

    /// Free-tier long window: 300 searches every 24 hours
    pub fn long_term() -> Self {
        Self::new(300, Duration::from_secs(24 * 60 * 60))
    }

    /// Record one use and report whether it exceeds the window's capacity
    pub fn check_and_record_use(&mut self) -> bool {
        self.check_and_record_use_at(Instant::now())
    }

    pub fn check_and_record_use_at(&mut self, now: Instant) -> bool {
        self.uses_this_cycle = self.uses_this_cycle.saturating_add(1);

        if now > self.cycle_start + self.cycle_length {
            self.uses_this_cycle = 1;
            self.cycle_start = now;
            return false;
        }

        self.uses_this_cycle > self.uses_per_cycle
    }

    /// Uses left in the current window, without recording a use
    pub fn remaining_at(&self, now: Instant) -> u32 {
        if now > self.cycle_start + self.cycle_length {
            return self.uses_per_cycle;
        }
        self.uses_per_cycle.saturating_sub(self.uses_this_cycle)
    }

    pub fn uses_per_cycle(&self) -> u32 {
        self.uses_per_cycle
    }

    pub fn cycle_length(&self) -> Duration {
        self.cycle_length
    }

    pub fn uses_this_cycle(&self) -> u32 {
        self.uses_this_cycle
    }
}

/// Short and long windows checked as one step.
///
/// The short window is checked first; when it reports limited the long
/// window is not touched.
#[derive(Debug, Clone)]
pub struct RateLimiterPair {
    pub short_term: RateLimiter,
    pub long_term: RateLimiter,
}

impl RateLimiterPair {
    pub fn new(short_term: RateLimiter, long_term: RateLimiter) -> Self {
        Self {
            short_term,
            long_term,
        }
    }

    pub fn check(&mut self) -> AppResult<()> {
        self.check_at(Instant::now())
    }

    pub fn check_at(&mut self, now: Instant) -> AppResult<()> {
        if self.short_term.check_and_record_use_at(now) {
            return Err(AppError::RateLimited {
                limiter: "short-term".to_string(),
                retry_after: self.short_term.cycle_length(),
            });
        }
        if self.long_term.check_and_record_use_at(now) {
            return Err(AppError::RateLimited {
                limiter: "long-term".to_string(),
                retry_after: self.long_term.cycle_length(),
            });
        }
        Ok(())
    }

    /// (short-term, long-term) uses left
    pub fn remaining_at(&self, now: Instant) -> (u32, u32) {
        (
            self.short_term.remaining_at(now),
            self.long_term.remaining_at(now),
        )
    }
}

impl Default for RateLimiterPair {
    fn default() -> Self {
        Self::new(RateLimiter::short_term(), RateLimiter::long_term())
    }
}
