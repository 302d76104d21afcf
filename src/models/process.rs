//! Process model.
//!
//! A process is the unit of work a CPU scheduler dispatches. Its input
//! attributes are fixed at ingestion; the waiting and completion times are
//! written by exactly one scheduling pass over a working copy.
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// A process descriptor plus its computed timing results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// 0-based ingestion order within the owning queue.
    pub process_id: usize,
    /// Required CPU time (ticks).
    pub burst_time: i64,
    /// Scheduling priority (lower = dispatched first).
    pub priority: i64,
    /// Earliest time the process may be dispatched (ticks).
    pub arrival_time: i64,
    /// Owning queue.
    pub queue_id: i64,
    /// Time spent eligible but not running (ticks).
    pub waiting_time: i64,
    /// Absolute time at which the process finished (ticks).
    pub completion_time: i64,
}

impl Process {
    /// Creates a process with zeroed results.
    pub fn new(
        process_id: usize,
        queue_id: i64,
        burst_time: i64,
        priority: i64,
        arrival_time: i64,
    ) -> Self {
        Self {
            process_id,
            burst_time,
            priority,
            arrival_time,
            queue_id,
            waiting_time: 0,
            completion_time: 0,
        }
    }

    /// Copy with identical input attributes and results reset to zero.
    pub fn pristine_copy(&self) -> Self {
        Self::new(
            self.process_id,
            self.queue_id,
            self.burst_time,
            self.priority,
            self.arrival_time,
        )
    }

    /// Clears waiting and completion times.
    pub fn reset_results(&mut self) {
        self.waiting_time = 0;
        self.completion_time = 0;
    }

    /// Records the outcome of dispatching this process at `start`.
    ///
    /// Returns the completion time, which is the clock value after the run.
    #[inline]
    pub fn dispatch_at(&mut self, start: i64) -> i64 {
        self.waiting_time = start.saturating_sub(self.arrival_time);
        self.completion_time = start.saturating_add(self.burst_time);
        self.completion_time
    }

    /// Whether the process may be dispatched at `now`.
    #[inline]
    pub fn is_eligible_at(&self, now: i64) -> bool {
        self.arrival_time <= now
    }

    /// Time the process started running (completion - burst, saturating).
    #[inline]
    pub fn start_time(&self) -> i64 {
        self.completion_time.saturating_sub(self.burst_time)
    }

    /// Turnaround time: completion - arrival, saturating.
    #[inline]
    pub fn turnaround_time(&self) -> i64 {
        self.completion_time.saturating_sub(self.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroes_results() {
        let p = Process::new(3, 7, 5, 2, 1);
        assert_eq!(p.process_id, 3);
        assert_eq!(p.queue_id, 7);
        assert_eq!(p.burst_time, 5);
        assert_eq!(p.priority, 2);
        assert_eq!(p.arrival_time, 1);
        assert_eq!(p.waiting_time, 0);
        assert_eq!(p.completion_time, 0);
    }

    #[test]
    fn test_dispatch_at() {
        let mut p = Process::new(0, 1, 3, 0, 1);
        let now = p.dispatch_at(5);
        assert_eq!(now, 8);
        assert_eq!(p.waiting_time, 4);
        assert_eq!(p.completion_time, 8);
        assert_eq!(p.start_time(), 5);
        assert_eq!(p.turnaround_time(), 7);
    }

    #[test]
    fn test_pristine_copy_drops_results() {
        let mut p = Process::new(2, 1, 4, 9, 0);
        p.dispatch_at(10);
        let copy = p.pristine_copy();
        assert_eq!(copy.burst_time, 4);
        assert_eq!(copy.priority, 9);
        assert_eq!(copy.waiting_time, 0);
        assert_eq!(copy.completion_time, 0);
        assert_eq!(p.completion_time, 14);
    }

    #[test]
    fn test_derived_times_saturate() {
        let mut p = Process::new(0, 1, 1, 0, i64::MIN);
        p.dispatch_at(0);
        assert_eq!(p.waiting_time, i64::MAX);
        assert_eq!(p.turnaround_time(), i64::MAX);

        let mut q = Process::new(0, 1, i64::MIN, 0, 0);
        q.dispatch_at(0);
        assert_eq!(q.completion_time, i64::MIN);
        assert_eq!(q.start_time(), 0);
    }

    #[test]
    fn test_eligibility() {
        let p = Process::new(0, 0, 1, 0, 5);
        assert!(!p.is_eligible_at(4));
        assert!(p.is_eligible_at(5));
        assert!(p.is_eligible_at(6));
    }
}
