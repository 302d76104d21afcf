//! Running algorithms over a queue registry.
//!
//! A run never touches the registry: each queue's process list is
//! duplicated, the duplicate is scheduled, and the scheduled copies are
//! returned. Running FCFS, SJF and Priority back to back therefore sees the
//! same pristine input every time.

use serde::Serialize;
use tracing::{debug, info};

use super::{Algorithm, RunKpi};
use crate::dispatching::IdleAdvance;
use crate::models::{Process, Queue, QueueRegistry};

/// One queue's processes after scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledQueue {
    /// Identifier of the source queue.
    pub queue_id: i64,
    /// Scheduled working copy, in ingestion order.
    pub processes: Vec<Process>,
}

impl ScheduledQueue {
    /// Duplicates `queue` and schedules the copy.
    pub fn schedule(queue: &Queue, algorithm: Algorithm, idle: IdleAdvance) -> Self {
        let mut processes = queue.duplicate_processes();
        algorithm.apply_with(&mut processes, idle);
        Self {
            queue_id: queue.queue_id,
            processes,
        }
    }

    /// Number of scheduled processes.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }
}

/// The result of applying one algorithm to every queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationRun {
    /// Algorithm applied.
    pub algorithm: Algorithm,
    /// Scheduled queues, in registration order.
    pub queues: Vec<ScheduledQueue>,
}

impl SimulationRun {
    /// Finds a scheduled queue by identifier.
    pub fn queue(&self, queue_id: i64) -> Option<&ScheduledQueue> {
        self.queues.iter().find(|q| q.queue_id == queue_id)
    }

    /// Total number of scheduled processes.
    pub fn process_count(&self) -> usize {
        self.queues.iter().map(ScheduledQueue::process_count).sum()
    }

    /// KPIs for this run.
    pub fn kpi(&self) -> RunKpi {
        RunKpi::calculate(self)
    }
}

/// Applies scheduling algorithms to working copies of a registry's queues.
///
/// # Example
///
/// ```
/// use mq_schedule::models::QueueRegistry;
/// use mq_schedule::scheduler::{Algorithm, Simulation};
///
/// let mut registry = QueueRegistry::new();
/// let queue = registry.find_or_create(1);
/// queue.push_descriptor(5, 0, 0);
/// queue.push_descriptor(3, 0, 1);
///
/// let run = Simulation::new(&registry).run(Algorithm::Fcfs);
/// assert_eq!(run.queues[0].processes[1].waiting_time, 4);
/// // The registry keeps its pristine values.
/// assert_eq!(registry.get(1).unwrap().processes()[1].waiting_time, 0);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    registry: &'a QueueRegistry,
    idle: IdleAdvance,
}

impl<'a> Simulation<'a> {
    /// Creates a simulation over `registry`.
    pub fn new(registry: &'a QueueRegistry) -> Self {
        Self {
            registry,
            idle: IdleAdvance::default(),
        }
    }

    /// Sets the idle advance policy for SJF and Priority.
    pub fn with_idle_advance(mut self, idle: IdleAdvance) -> Self {
        self.idle = idle;
        self
    }

    /// Applies `algorithm` to a fresh copy of every queue.
    pub fn run(&self, algorithm: Algorithm) -> SimulationRun {
        let queues: Vec<ScheduledQueue> = self
            .registry
            .iter()
            .map(|queue| {
                let scheduled = ScheduledQueue::schedule(queue, algorithm, self.idle);
                debug!(
                    %algorithm,
                    queue_id = queue.queue_id,
                    processes = scheduled.process_count(),
                    "scheduled queue"
                );
                scheduled
            })
            .collect();

        info!(%algorithm, queues = queues.len(), "simulation run complete");
        SimulationRun { algorithm, queues }
    }

    /// Runs each algorithm in turn, each on pristine copies.
    pub fn run_all(&self, algorithms: &[Algorithm]) -> Vec<SimulationRun> {
        algorithms.iter().map(|&a| self.run(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> QueueRegistry {
        let mut reg = QueueRegistry::new();
        let q1 = reg.find_or_create(1);
        q1.push_descriptor(6, 2, 0);
        q1.push_descriptor(2, 1, 0);
        q1.push_descriptor(8, 3, 0);
        let q2 = reg.find_or_create(2);
        q2.push_descriptor(4, 0, 5);
        reg
    }

    #[test]
    fn test_run_leaves_registry_untouched() {
        let reg = registry();
        let before = reg.clone();
        let runs = Simulation::new(&reg).run_all(&Algorithm::ALL);
        assert_eq!(runs.len(), 3);
        assert_eq!(reg, before);
    }

    #[test]
    fn test_runs_are_independent() {
        let reg = registry();
        let sim = Simulation::new(&reg);
        let sjf_first = sim.run(Algorithm::Sjf);
        let _fcfs = sim.run(Algorithm::Fcfs);
        let sjf_again = sim.run(Algorithm::Sjf);
        assert_eq!(sjf_first, sjf_again);
    }

    #[test]
    fn test_run_preserves_queue_order() {
        let reg = registry();
        let run = Simulation::new(&reg).run(Algorithm::Priority);
        let ids: Vec<i64> = run.queues.iter().map(|q| q.queue_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(run.process_count(), 4);

        let q1 = run.queue(1).unwrap();
        // Priority order: P1 (1), P0 (2), P2 (3)
        assert_eq!(q1.processes[1].completion_time, 2);
        assert_eq!(q1.processes[0].completion_time, 8);
        assert_eq!(q1.processes[2].completion_time, 16);

        let q2 = run.queue(2).unwrap();
        assert_eq!(q2.processes[0].completion_time, 9);
    }

    #[test]
    fn test_empty_registry() {
        let reg = QueueRegistry::new();
        let run = Simulation::new(&reg).run(Algorithm::Fcfs);
        assert!(run.queues.is_empty());
        assert_eq!(run.process_count(), 0);
    }

    #[test]
    fn test_idle_policy_does_not_change_results() {
        let reg = registry();
        let tick = Simulation::new(&reg)
            .with_idle_advance(IdleAdvance::Tick)
            .run(Algorithm::Sjf);
        let jump = Simulation::new(&reg)
            .with_idle_advance(IdleAdvance::NextArrival)
            .run(Algorithm::Sjf);
        assert_eq!(tick, jump);
    }
}
