//! Multi-queue CPU scheduling simulator.
//!
//! Takes a fixed set of process descriptors grouped into independent
//! queues and computes each process's waiting and completion time under
//! non-preemptive FCFS, SJF and Priority scheduling.
//!
//! # Modules
//!
//! - **`models`**: `Process`, `Queue`, `QueueRegistry`
//! - **`dispatching`**: the shared select-minimal-key loop behind SJF and Priority
//! - **`scheduler`**: `Algorithm`, FCFS, `Simulation` runs and KPIs
//! - **`ingest`**: `burst:priority:arrival:queue_id` descriptor parsing
//! - **`report`**: metrics aggregation and text/JSON sinks
//! - **`validation`**: optional input-range checks
//! - **`workload`**: seeded random workloads
//! - **`config`**: TOML + environment configuration for the binary
//!
//! # Example
//!
//! ```
//! use mq_schedule::ingest::ingest_str;
//! use mq_schedule::models::QueueRegistry;
//! use mq_schedule::report::{aggregate, CollectingSink};
//! use mq_schedule::scheduler::{Algorithm, Simulation};
//!
//! let mut registry = QueueRegistry::new();
//! ingest_str("6:0:0:1\n2:0:0:1\n8:0:0:1\n", &mut registry).unwrap();
//!
//! let run = Simulation::new(&registry).run(Algorithm::Sjf);
//! let mut sink = CollectingSink::new();
//! aggregate(&run, &mut sink).unwrap();
//!
//! let waiting: Vec<i64> = sink.metrics_for(Algorithm::Sjf).unwrap()
//!     .iter().map(|m| m.waiting_time).collect();
//! assert_eq!(waiting, vec![2, 0, 8]);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::{Result, SimError, SimErrorKind};
