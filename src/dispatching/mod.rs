//! Non-preemptive dispatching by selection key.
//!
//! SJF and Priority scheduling share one loop: among the processes that have
//! arrived and not yet run, dispatch the one with the smallest key, run it to
//! completion, repeat. When nothing is eligible the clock idles forward.
//! Only the key differs, so the loop lives in [`NonPreemptiveDispatcher`]
//! and the keys live in [`rules`].
//!
//! # Usage
//!
//! ```
//! use mq_schedule::dispatching::{rules, NonPreemptiveDispatcher};
//! use mq_schedule::models::Process;
//!
//! let mut procs = vec![
//!     Process::new(0, 1, 6, 0, 0),
//!     Process::new(1, 1, 2, 0, 0),
//! ];
//! let order = NonPreemptiveDispatcher::new(rules::ShortestBurst).schedule(&mut procs);
//! assert_eq!(order, vec![1, 0]);
//! assert_eq!(procs[0].waiting_time, 2);
//! ```
//!
//! # Key Convention
//! **Lower key = dispatched first.** Ties go to the process that appears
//! earlier in ingestion order.

mod engine;
pub mod rules;

pub use engine::{IdleAdvance, NonPreemptiveDispatcher};

use crate::models::Process;
use std::fmt::Debug;

/// Value a selection key assigns to a process.
pub type KeyValue = i64;

/// Orders eligible processes for dispatch.
pub trait SelectionKey: Send + Sync + Debug {
    /// Key name (e.g., "BURST", "PRIORITY").
    fn name(&self) -> &'static str;

    /// Key of a process. Lower = dispatched first.
    fn key(&self, process: &Process) -> KeyValue;

    /// Key description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
