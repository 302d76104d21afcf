//! Scheduling algorithms, simulation runs and KPI evaluation.
//!
//! # Algorithms
//!
//! | Algorithm | Order | Implementation |
//! |-----------|-------|----------------|
//! | FCFS | ingestion order | [`fcfs::schedule`] |
//! | SJF | shortest eligible burst | `NonPreemptiveDispatcher<ShortestBurst>` |
//! | Priority | lowest eligible priority number | `NonPreemptiveDispatcher<HighestPriority>` |
//!
//! All three are non-preemptive and only write `waiting_time` and
//! `completion_time`. Each queue is scheduled independently.
//!
//! # Simulation
//!
//! [`Simulation`] applies an algorithm to a working copy of every queue in a
//! registry, so several algorithms can be compared on identical input.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

pub mod fcfs;
mod kpi;
mod simulation;

pub use kpi::{QueueKpi, RunKpi};
pub use simulation::{ScheduledQueue, Simulation, SimulationRun};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dispatching::rules::{HighestPriority, ShortestBurst};
use crate::dispatching::{IdleAdvance, NonPreemptiveDispatcher};
use crate::error::SimError;
use crate::models::Process;

/// A CPU scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest-Job-First, non-preemptive.
    Sjf,
    /// Priority, non-preemptive (lower number first).
    Priority,
}

impl Algorithm {
    /// Every algorithm, in reporting order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Fcfs, Algorithm::Sjf, Algorithm::Priority];

    /// Lowercase identifier accepted by `from_str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "fcfs",
            Algorithm::Sjf => "sjf",
            Algorithm::Priority => "priority",
        }
    }

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First-Come-First-Served",
            Algorithm::Sjf => "Shortest-Job-First (non-preemptive)",
            Algorithm::Priority => "Priority (non-preemptive)",
        }
    }

    /// Schedules `processes` in place with the default idle policy.
    pub fn apply(&self, processes: &mut [Process]) {
        self.apply_with(processes, IdleAdvance::default());
    }

    /// Schedules `processes` in place.
    ///
    /// `idle` only matters for SJF and Priority; FCFS always jumps straight
    /// to the next arrival.
    pub fn apply_with(&self, processes: &mut [Process], idle: IdleAdvance) {
        match self {
            Algorithm::Fcfs => fcfs::schedule(processes),
            Algorithm::Sjf => {
                NonPreemptiveDispatcher::new(ShortestBurst)
                    .with_idle_advance(idle)
                    .schedule(processes);
            }
            Algorithm::Priority => {
                NonPreemptiveDispatcher::new(HighestPriority)
                    .with_idle_advance(idle)
                    .schedule(processes);
            }
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Priority => "Priority",
        };
        f.write_str(label)
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Algorithm::Fcfs),
            "sjf" | "spt" => Ok(Algorithm::Sjf),
            "priority" | "prio" => Ok(Algorithm::Priority),
            other => Err(SimError::invalid_argument(format!(
                "unknown algorithm '{other}' (expected fcfs, sjf or priority)"
            ))),
        }
    }
}

/// Parses a comma-separated algorithm list, e.g. `"fcfs,sjf"`.
///
/// Empty entries are ignored; duplicates are kept once, in first-seen order.
pub fn parse_algorithm_list(list: &str) -> Result<Vec<Algorithm>, SimError> {
    let mut algorithms = Vec::new();
    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let algorithm: Algorithm = part.parse()?;
        if !algorithms.contains(&algorithm) {
            algorithms.push(algorithm);
        }
    }
    if algorithms.is_empty() {
        return Err(SimError::invalid_argument("algorithm list is empty"));
    }
    Ok(algorithms)
}
