//! Simulation domain models.
//!
//! Provides the process and queue types the scheduling algorithms operate
//! on, plus the registry that owns every queue.
//!
//! # Ownership
//!
//! | Owner | Owns |
//! |-------|------|
//! | `QueueRegistry` | every `Queue`, in first-seen order |
//! | `Queue` | its `Process` records, in ingestion order |
//! | a simulation run | its working copy of each queue's processes |

mod process;
mod queue;

pub use process::Process;
pub use queue::{duplicate_processes, Queue, QueueRegistry};
