//! Built-in selection keys.
//!
//! | Key | Algorithm | Value |
//! |-----|-----------|-------|
//! | `ShortestBurst` | SJF | `burst_time` |
//! | `HighestPriority` | Priority | `priority` (lower number = higher priority) |
//!
//! Both return lower values for processes that should run first.

use super::{KeyValue, SelectionKey};
use crate::models::Process;

/// Shortest burst time first.
///
/// Minimizes average waiting time among the processes available at each
/// decision point.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestBurst;

impl SelectionKey for ShortestBurst {
    fn name(&self) -> &'static str {
        "BURST"
    }

    fn key(&self, process: &Process) -> KeyValue {
        process.burst_time
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Smallest priority number first.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestPriority;

impl SelectionKey for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn key(&self, process: &Process) -> KeyValue {
        process.priority
    }

    fn description(&self) -> &'static str {
        "Highest Priority (lowest number) First"
    }
}
