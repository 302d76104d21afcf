//! Scan-select-advance loop for non-preemptive dispatching.
//!
//! # Algorithm
//!
//! 1. Clock starts at 0; every process is marked pending.
//! 2. Scan pending processes in ingestion order; among those with
//!    `arrival_time <= now` keep the first one with the smallest key.
//! 3. If one was found: `waiting = now - arrival`, `now += burst`,
//!    `completion = now`, mark it done.
//! 4. Otherwise idle the clock forward (see [`IdleAdvance`]) and rescan.
//!
//! # Complexity
//! O(n²) scans for n processes, plus idle rescans under `IdleAdvance::Tick`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::SelectionKey;
use crate::error::SimError;
use crate::models::Process;

/// How the clock moves when no pending process has arrived yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdleAdvance {
    /// Advance by one tick and rescan.
    Tick,
    /// Jump to the earliest arrival among pending processes.
    ///
    /// No process can become eligible before that arrival, so the dispatch
    /// sequence and all computed times match `Tick`.
    #[default]
    NextArrival,
}

impl IdleAdvance {
    /// Canonical name, as accepted by `from_str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdleAdvance::Tick => "tick",
            IdleAdvance::NextArrival => "next-arrival",
        }
    }
}

impl fmt::Display for IdleAdvance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdleAdvance {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tick" => Ok(IdleAdvance::Tick),
            "next-arrival" | "next_arrival" | "jump" => Ok(IdleAdvance::NextArrival),
            other => Err(SimError::invalid_argument(format!(
                "unknown idle advance policy '{other}' (expected tick or next-arrival)"
            ))),
        }
    }
}

/// Non-preemptive dispatcher parameterized by a selection key.
#[derive(Debug, Clone)]
pub struct NonPreemptiveDispatcher<K> {
    key: K,
    idle: IdleAdvance,
}

impl<K: SelectionKey> NonPreemptiveDispatcher<K> {
    /// Creates a dispatcher with the default idle policy.
    pub fn new(key: K) -> Self {
        Self {
            key,
            idle: IdleAdvance::default(),
        }
    }

    /// Sets the idle advance policy.
    pub fn with_idle_advance(mut self, idle: IdleAdvance) -> Self {
        self.idle = idle;
        self
    }

    /// The selection key in use.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Index of the pending, eligible process with the smallest key.
    ///
    /// Scans in slice order and replaces the candidate only on a strictly
    /// smaller key, so ties resolve to the lowest index.
    pub fn select(&self, processes: &[Process], completed: &[bool], now: i64) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (idx, process) in processes.iter().enumerate() {
            if completed[idx] || !process.is_eligible_at(now) {
                continue;
            }
            let key = self.key.key(process);
            if best.map_or(true, |(_, best_key)| key < best_key) {
                best = Some((idx, key));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Fills in waiting and completion times for every process.
    ///
    /// Returns indices in dispatch order. An empty slice is a no-op.
    pub fn schedule(&self, processes: &mut [Process]) -> Vec<usize> {
        let count = processes.len();
        let mut order = Vec::with_capacity(count);
        if count == 0 {
            return order;
        }

        let mut completed = vec![false; count];
        let mut now: i64 = 0;

        while order.len() < count {
            match self.select(processes, &completed, now) {
                Some(idx) => {
                    now = processes[idx].dispatch_at(now);
                    completed[idx] = true;
                    order.push(idx);
                    trace!(
                        key = self.key.name(),
                        process_id = processes[idx].process_id,
                        completion = now,
                        "dispatched"
                    );
                }
                None => now = self.idle_advance(processes, &completed, now),
            }
        }

        order
    }

    fn idle_advance(&self, processes: &[Process], completed: &[bool], now: i64) -> i64 {
        match self.idle {
            IdleAdvance::Tick => now.saturating_add(1),
            IdleAdvance::NextArrival => processes
                .iter()
                .zip(completed)
                .filter(|&(_, &done)| !done)
                .map(|(p, _)| p.arrival_time)
                .min()
                .filter(|&arrival| arrival > now)
                .unwrap_or_else(|| now.saturating_add(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules::{HighestPriority, ShortestBurst};

    fn proc(pid: usize, burst: i64, priority: i64, arrival: i64) -> Process {
        Process::new(pid, 1, burst, priority, arrival)
    }

    #[test]
    fn test_sjf_all_arrive_together() {
        let mut procs = vec![proc(0, 6, 0, 0), proc(1, 2, 0, 0), proc(2, 8, 0, 0)];
        let order = NonPreemptiveDispatcher::new(ShortestBurst).schedule(&mut procs);

        assert_eq!(order, vec![1, 0, 2]);
        assert_eq!(procs[1].waiting_time, 0);
        assert_eq!(procs[1].completion_time, 2);
        assert_eq!(procs[0].waiting_time, 2);
        assert_eq!(procs[0].completion_time, 8);
        assert_eq!(procs[2].waiting_time, 8);
        assert_eq!(procs[2].completion_time, 16);
    }

    #[test]
    fn test_idle_gap_single_process() {
        for idle in [IdleAdvance::Tick, IdleAdvance::NextArrival] {
            let mut procs = vec![proc(0, 4, 0, 5)];
            NonPreemptiveDispatcher::new(ShortestBurst)
                .with_idle_advance(idle)
                .schedule(&mut procs);
            assert_eq!(procs[0].waiting_time, 0, "{idle}");
            assert_eq!(procs[0].completion_time, 9, "{idle}");
        }
    }

    #[test]
    fn test_tie_goes_to_earlier_index() {
        let mut procs = vec![proc(0, 9, 0, 0), proc(1, 3, 0, 1), proc(2, 3, 0, 1)];
        let order = NonPreemptiveDispatcher::new(ShortestBurst).schedule(&mut procs);
        // P0 alone at t=0, then P1 and P2 tie on burst
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_priority_key() {
        let mut procs = vec![proc(0, 4, 3, 0), proc(1, 2, 1, 0), proc(2, 1, 2, 0)];
        let order = NonPreemptiveDispatcher::new(HighestPriority).schedule(&mut procs);

        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(procs[1].completion_time, 2);
        assert_eq!(procs[2].waiting_time, 2);
        assert_eq!(procs[2].completion_time, 3);
        assert_eq!(procs[0].waiting_time, 3);
        assert_eq!(procs[0].completion_time, 7);
    }

    #[test]
    fn test_priority_tie_goes_to_earlier_index() {
        let mut procs = vec![proc(0, 5, 2, 0), proc(1, 1, 2, 0)];
        let order = NonPreemptiveDispatcher::new(HighestPriority).schedule(&mut procs);
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_late_short_job_does_not_preempt() {
        let mut procs = vec![proc(0, 10, 0, 0), proc(1, 1, 0, 2)];
        NonPreemptiveDispatcher::new(ShortestBurst).schedule(&mut procs);
        assert_eq!(procs[0].completion_time, 10);
        assert_eq!(procs[1].waiting_time, 8);
        assert_eq!(procs[1].completion_time, 11);
    }

    #[test]
    fn test_idle_between_batches() {
        let mut procs = vec![proc(0, 2, 0, 0), proc(1, 3, 0, 10)];
        for idle in [IdleAdvance::Tick, IdleAdvance::NextArrival] {
            let mut run = procs.clone();
            NonPreemptiveDispatcher::new(ShortestBurst)
                .with_idle_advance(idle)
                .schedule(&mut run);
            assert_eq!(run[0].completion_time, 2);
            assert_eq!(run[1].waiting_time, 0);
            assert_eq!(run[1].completion_time, 13);
        }
        procs.clear();
        assert!(NonPreemptiveDispatcher::new(ShortestBurst)
            .schedule(&mut procs)
            .is_empty());
    }

    #[test]
    fn test_select_skips_completed_and_future() {
        let procs = vec![proc(0, 1, 0, 0), proc(1, 5, 0, 0), proc(2, 0, 0, 9)];
        let d = NonPreemptiveDispatcher::new(ShortestBurst);
        assert_eq!(d.select(&procs, &[true, false, false], 0), Some(1));
        assert_eq!(d.select(&procs, &[true, true, false], 0), None);
        assert_eq!(d.select(&procs, &[true, true, false], 9), Some(2));
    }

    #[test]
    fn test_extreme_key_is_still_selected() {
        let mut procs = vec![proc(0, 1, i64::MAX, 0)];
        NonPreemptiveDispatcher::new(HighestPriority).schedule(&mut procs);
        assert_eq!(procs[0].completion_time, 1);
    }

    #[test]
    fn test_idle_advance_parse() {
        assert_eq!("tick".parse::<IdleAdvance>().unwrap(), IdleAdvance::Tick);
        assert_eq!(
            "Next-Arrival".parse::<IdleAdvance>().unwrap(),
            IdleAdvance::NextArrival
        );
        assert!("sometimes".parse::<IdleAdvance>().is_err());
    }
}
