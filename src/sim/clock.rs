//! Fixed-rate frame pacing
//!
//! The simulation advances on a fixed 60 Hz cadence regardless of how fast
//! the surrounding loop runs. [`FrameClock::tick`] blocks until the interval
//! has elapsed since the previous call.

use std::thread;
use std::time::{Duration, Instant};

/// Blocking fixed-interval pacer.
pub struct FrameClock {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(ticks_per_second: u32) -> Self {
        let tps = ticks_per_second.max(1);
        Self {
            interval: Duration::from_secs(1) / tps,
            last: None,
        }
    }

    /// Sleep out the remainder of the current interval, then return the
    /// actual time elapsed since the previous tick. The first call returns
    /// immediately with a zero duration.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let Some(last) = self.last else {
            self.last = Some(now);
            return Duration::ZERO;
        };

        let since = now.duration_since(last);
        if since < self.interval {
            thread::sleep(self.interval - since);
        }
        let after = Instant::now();
        self.last = Some(after);
        after.duration_since(last)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
