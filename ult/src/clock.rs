//! A logical clock for ordering scheduling events.
//!
//! A monotonic tick counter rather than wall-clock time: FCFS only ever
//! needs a total order over scheduling events, not real duration.

use core::sync::atomic::{AtomicU64, Ordering};

pub trait CpuClock {
    /// Return a value that increases on every call, used to timestamp
    /// `last_scheduled_time`.
    fn now(&self) -> u64;
}

/// The production clock: a per-scheduler tick counter.
pub struct MonotonicCounter {
    ticks: AtomicU64,
}

impl MonotonicCounter {
    pub const fn new() -> Self {
        Self { ticks: AtomicU64::new(0) }
    }
}

impl Default for MonotonicCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuClock for MonotonicCounter {
    fn now(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successive_reads_strictly_increase() {
        let clock = MonotonicCounter::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b > a);
    }
}
