//! The three scheduling policies, each a pure function over the thread
//! table so they can be unit tested without any context switching.
//!
//! [`select`] dispatches to round-robin, priority, and first-come-
//! first-served distinctly; a Rust `match` has no fallthrough between arms
//! to misplace a `break` against, so each algorithm always runs its own
//! logic rather than silently falling back to another.

use crate::clock::CpuClock;
use crate::thread::{ThreadRecord, ThreadState, MAX_THREADS, SCHEDULER_TID};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SchedulingAlgorithm {
    RoundRobin,
    Priority,
    Fcfs,
}

/// Starting at `current + 1`, walk the table modulo its capacity, skipping
/// slot 0, and return the first `RUNNABLE` thread found. Returns
/// `SCHEDULER_TID` if none is runnable.
pub fn round_robin(table: &[ThreadRecord; MAX_THREADS], current: usize) -> usize {
    let mut tid = (current + 1) % MAX_THREADS;
    for _ in 0..MAX_THREADS {
        if tid != SCHEDULER_TID && table[tid].state == ThreadState::Runnable {
            return tid;
        }
        tid = (tid + 1) % MAX_THREADS;
    }
    SCHEDULER_TID
}

/// The `RUNNABLE` thread with the highest priority; ties favor the lowest
/// id, since the scan runs in increasing id order and only replaces the
/// incumbent on a strict improvement.
pub fn priority(table: &[ThreadRecord; MAX_THREADS]) -> usize {
    let mut selected = SCHEDULER_TID;
    let mut best = i32::MIN;
    for (tid, rec) in table.iter().enumerate().skip(1) {
        if rec.state == ThreadState::Runnable && rec.priority > best {
            selected = tid;
            best = rec.priority;
        }
    }
    selected
}

/// The `RUNNABLE` thread with the smallest `last_scheduled_time`; ties
/// favor the lowest id, by the same strict-improvement scan as [`priority`].
pub fn fcfs(table: &[ThreadRecord; MAX_THREADS], now: u64) -> usize {
    let mut selected = SCHEDULER_TID;
    let mut earliest = now;
    for (tid, rec) in table.iter().enumerate().skip(1) {
        if rec.state == ThreadState::Runnable && rec.last_scheduled_time < earliest {
            selected = tid;
            earliest = rec.last_scheduled_time;
        }
    }
    selected
}

/// Pick the next thread to run under `algorithm`. Returns `SCHEDULER_TID`
/// when nothing is runnable.
pub fn select<C: CpuClock>(
    algorithm: SchedulingAlgorithm,
    table: &[ThreadRecord; MAX_THREADS],
    current: usize,
    clock: &C,
) -> usize {
    match algorithm {
        SchedulingAlgorithm::RoundRobin => round_robin(table, current),
        SchedulingAlgorithm::Priority => priority(table),
        SchedulingAlgorithm::Fcfs => fcfs(table, clock.now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::new_table;

    fn runnable(table: &mut [ThreadRecord; MAX_THREADS], tid: usize, priority: i32, last: u64) {
        table[tid].state = ThreadState::Runnable;
        table[tid].priority = priority;
        table[tid].last_scheduled_time = last;
    }

    #[test]
    fn round_robin_wraps_and_skips_scheduler_slot() {
        let mut table = new_table();
        runnable(&mut table, 2, 0, 0);
        runnable(&mut table, 98, 0, 0);

        assert_eq!(round_robin(&table, 98), 2, "must wrap past the end back to the lowest runnable id");
        assert_eq!(round_robin(&table, 1), 2);
        assert_eq!(round_robin(&table, 2), 98);
    }

    #[test]
    fn round_robin_with_nothing_runnable_returns_scheduler() {
        let table = new_table();
        assert_eq!(round_robin(&table, 0), SCHEDULER_TID);
    }

    #[test]
    fn priority_picks_highest_and_breaks_ties_by_lowest_id() {
        let mut table = new_table();
        runnable(&mut table, 3, 5, 0);
        runnable(&mut table, 7, 5, 0);
        runnable(&mut table, 9, 9, 0);
        assert_eq!(priority(&table), 9);

        table[9].state = ThreadState::Free;
        assert_eq!(priority(&table), 3, "tied priority must favor the lower id");
    }

    #[test]
    fn fcfs_picks_earliest_and_breaks_ties_by_lowest_id() {
        let mut table = new_table();
        runnable(&mut table, 4, 0, 100);
        runnable(&mut table, 6, 0, 50);
        runnable(&mut table, 8, 0, 50);
        assert_eq!(fcfs(&table, 1000), 6, "tied time must favor the lower id");
    }
}
