//! Synthetic workload generation.
//!
//! Produces random process descriptors for exercising the simulator. A
//! given seed always yields the same workload.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::ingest::ProcessDescriptor;

/// Shape of a generated workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Number of distinct queues (ids `1..=queues`).
    pub queues: usize,
    /// Total number of processes across all queues.
    pub processes: usize,
    /// Largest burst time (inclusive, minimum 1).
    pub max_burst: i64,
    /// Largest priority value (inclusive, minimum 0).
    pub max_priority: i64,
    /// Latest arrival time (inclusive, minimum 0).
    pub max_arrival: i64,
    /// RNG seed.
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            queues: 3,
            processes: 20,
            max_burst: 10,
            max_priority: 5,
            max_arrival: 20,
            seed: 42,
        }
    }
}

impl WorkloadSpec {
    /// Checks that every range is non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.queues == 0 && self.processes > 0 {
            return Err(SimError::invalid_argument(
                "cannot place processes into zero queues",
            ));
        }
        if self.max_burst < 1 {
            return Err(SimError::invalid_argument("max_burst must be at least 1"));
        }
        if self.max_priority < 0 || self.max_arrival < 0 {
            return Err(SimError::invalid_argument(
                "max_priority and max_arrival must be non-negative",
            ));
        }
        Ok(())
    }

    /// Generates descriptors in file order.
    pub fn generate(&self) -> Result<Vec<ProcessDescriptor>> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let descriptors = (0..self.processes)
            .map(|_| ProcessDescriptor {
                burst_time: rng.random_range(1..=self.max_burst),
                priority: rng.random_range(0..=self.max_priority),
                arrival_time: rng.random_range(0..=self.max_arrival),
                queue_id: rng.random_range(1..=self.queues as i64),
            })
            .collect();
        Ok(descriptors)
    }

    /// Generates the workload as descriptor-file text, one line per process.
    pub fn render(&self) -> Result<String> {
        let mut text = String::new();
        for desc in self.generate()? {
            text.push_str(&desc.to_line());
            text.push('\n');
        }
        Ok(text)
    }
}
