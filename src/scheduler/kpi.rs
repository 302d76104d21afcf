//! Simulation quality metrics (KPIs).
//!
//! Computes standard CPU scheduling indicators from scheduled processes.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting | mean(waiting_time) |
//! | Avg Turnaround | mean(completion - arrival) |
//! | Makespan | Latest completion time |
//! | Idle Time | makespan - sum(burst), floored at 0 |
//!
//! Sums and differences saturate at the `i64` bounds, so extreme inputs give
//! clamped figures rather than overflowing.
//! | Throughput | processes / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::Serialize;

use super::{Algorithm, SimulationRun};
use crate::models::Process;

/// Per-queue performance indicators. Times are in ticks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueKpi {
    /// Queue the metrics belong to.
    pub queue_id: i64,
    /// Number of processes.
    pub process_count: usize,
    /// Sum of waiting times.
    pub total_waiting_time: i64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Latest completion time.
    pub makespan: i64,
    /// Time the CPU sat idle before the makespan.
    pub idle_time: i64,
    /// Completed processes per tick.
    pub throughput: f64,
}

impl QueueKpi {
    /// Computes KPIs for one scheduled queue.
    pub fn calculate(queue_id: i64, processes: &[Process]) -> Self {
        let count = processes.len();
        let total_waiting = saturating_sum(processes.iter().map(|p| p.waiting_time));
        let total_turnaround = saturating_sum(processes.iter().map(Process::turnaround_time));
        let busy = saturating_sum(processes.iter().map(|p| p.burst_time));
        let makespan = processes
            .iter()
            .map(|p| p.completion_time)
            .max()
            .unwrap_or(0);

        let (avg_waiting, avg_turnaround) = if count == 0 {
            (0.0, 0.0)
        } else {
            (
                total_waiting as f64 / count as f64,
                total_turnaround as f64 / count as f64,
            )
        };

        let throughput = if makespan <= 0 {
            0.0
        } else {
            count as f64 / makespan as f64
        };

        Self {
            queue_id,
            process_count: count,
            total_waiting_time: total_waiting,
            avg_waiting_time: avg_waiting,
            avg_turnaround_time: avg_turnaround,
            makespan,
            idle_time: makespan.saturating_sub(busy).max(0),
            throughput,
        }
    }
}

/// Sums tick values, clamping at the `i64` bounds.
fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

/// Indicators for a whole simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunKpi {
    /// Algorithm the run used.
    pub algorithm: Algorithm,
    /// Per-queue indicators, in registration order.
    pub queues: Vec<QueueKpi>,
    /// Processes across all queues.
    pub process_count: usize,
    /// Mean waiting time across all processes.
    pub avg_waiting_time: f64,
    /// Mean turnaround time across all processes.
    pub avg_turnaround_time: f64,
    /// Largest makespan of any queue.
    pub makespan: i64,
}

impl RunKpi {
    /// Computes KPIs for every queue of a run.
    pub fn calculate(run: &SimulationRun) -> Self {
        let queues: Vec<QueueKpi> = run
            .queues
            .iter()
            .map(|q| QueueKpi::calculate(q.queue_id, &q.processes))
            .collect();

        let process_count: usize = queues.iter().map(|k| k.process_count).sum();
        let weighted = |f: fn(&QueueKpi) -> f64| -> f64 {
            if process_count == 0 {
                return 0.0;
            }
            let sum: f64 = queues.iter().map(|k| f(k) * k.process_count as f64).sum();
            sum / process_count as f64
        };
        let avg_waiting_time = weighted(|k| k.avg_waiting_time);
        let avg_turnaround_time = weighted(|k| k.avg_turnaround_time);
        let makespan = queues.iter().map(|k| k.makespan).max().unwrap_or(0);

        Self {
            algorithm: run.algorithm,
            queues,
            process_count,
            avg_waiting_time,
            avg_turnaround_time,
            makespan,
        }
    }

    /// Looks up one queue's indicators.
    pub fn queue(&self, queue_id: i64) -> Option<&QueueKpi> {
        self.queues.iter().find(|k| k.queue_id == queue_id)
    }
}
