//! Queue and queue registry models.
//!
//! A queue groups processes in ingestion order and is the unit of
//! independent scheduling. The registry owns every queue and hands them out
//! by identifier, creating them on first reference.

use serde::{Deserialize, Serialize};

use super::Process;
use crate::error::Result;

/// An ordered group of processes sharing a queue identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    /// Unique queue identifier (registry lookup key).
    pub queue_id: i64,
    processes: Vec<Process>,
}

impl Queue {
    /// Creates an empty queue.
    pub fn new(queue_id: i64) -> Self {
        Self {
            queue_id,
            processes: Vec::new(),
        }
    }

    /// Processes in ingestion order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Number of processes in the queue.
    #[inline]
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Whether the queue holds no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Appends a process built from the given attributes.
    ///
    /// The process id is the queue's count before insertion, so ids stay a
    /// contiguous range starting at 0.
    pub fn push_descriptor(
        &mut self,
        burst_time: i64,
        priority: i64,
        arrival_time: i64,
    ) -> &Process {
        let pid = self.process_count();
        self.processes.push(Process::new(
            pid,
            self.queue_id,
            burst_time,
            priority,
            arrival_time,
        ));
        &self.processes[pid]
    }

    /// Fallible variant of [`push_descriptor`](Self::push_descriptor).
    ///
    /// Fails with `ResourceExhausted` when the process list cannot grow.
    pub fn try_push_descriptor(
        &mut self,
        burst_time: i64,
        priority: i64,
        arrival_time: i64,
    ) -> Result<&Process> {
        self.processes.try_reserve(1)?;
        Ok(self.push_descriptor(burst_time, priority, arrival_time))
    }

    /// Working copy of this queue's processes with results reset.
    pub fn duplicate_processes(&self) -> Vec<Process> {
        duplicate_processes(&self.processes)
    }
}

/// Copies a process list, preserving order and input attributes.
///
/// Waiting and completion times in the copy are zero. The count of the copy
/// is its `len()`.
pub fn duplicate_processes(processes: &[Process]) -> Vec<Process> {
    processes.iter().map(Process::pristine_copy).collect()
}

/// Owner of all queues, in first-seen order of their identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRegistry {
    queues: Vec<Queue>,
}

impl QueueRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the queue with `queue_id`, creating and appending it if absent.
    ///
    /// This is the only operation that adds queues, so identifiers never
    /// repeat.
    pub fn find_or_create(&mut self, queue_id: i64) -> &mut Queue {
        let idx = match self.position(queue_id) {
            Some(idx) => idx,
            None => {
                self.queues.push(Queue::new(queue_id));
                self.queues.len() - 1
            }
        };
        &mut self.queues[idx]
    }

    /// Fallible variant of [`find_or_create`](Self::find_or_create).
    pub fn try_find_or_create(&mut self, queue_id: i64) -> Result<&mut Queue> {
        if self.position(queue_id).is_none() {
            self.queues.try_reserve(1)?;
        }
        Ok(self.find_or_create(queue_id))
    }

    /// Looks up a queue without creating it.
    pub fn get(&self, queue_id: i64) -> Option<&Queue> {
        self.queues.iter().find(|q| q.queue_id == queue_id)
    }

    /// Queues in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Queue> {
        self.queues.iter()
    }

    /// Number of queues.
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    /// Whether no queue has been registered.
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Sum of process counts over all queues.
    pub fn total_processes(&self) -> usize {
        self.queues.iter().map(Queue::process_count).sum()
    }

    fn position(&self, queue_id: i64) -> Option<usize> {
        self.queues.iter().position(|q| q.queue_id == queue_id)
    }
}

impl<'a> IntoIterator for &'a QueueRegistry {
    type Item = &'a Queue;
    type IntoIter = std::slice::Iter<'a, Queue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_contiguous_ids() {
        let mut q = Queue::new(4);
        q.push_descriptor(5, 1, 0);
        q.push_descriptor(3, 2, 1);
        q.push_descriptor(8, 0, 2);

        assert_eq!(q.process_count(), 3);
        let ids: Vec<usize> = q.processes().iter().map(|p| p.process_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(q.processes().iter().all(|p| p.queue_id == 4));
    }

    #[test]
    fn test_try_push() {
        let mut q = Queue::new(1);
        let p = q.try_push_descriptor(2, 0, 0).unwrap();
        assert_eq!(p.process_id, 0);
        assert_eq!(q.process_count(), 1);
    }

    #[test]
    fn test_find_or_create_reuses_existing() {
        let mut reg = QueueRegistry::new();
        reg.find_or_create(2).push_descriptor(1, 0, 0);
        reg.find_or_create(1).push_descriptor(1, 0, 0);
        reg.find_or_create(2).push_descriptor(1, 0, 0);

        assert_eq!(reg.len(), 2);
        let order: Vec<i64> = reg.iter().map(|q| q.queue_id).collect();
        assert_eq!(order, vec![2, 1]);
        assert_eq!(reg.get(2).unwrap().process_count(), 2);
        assert_eq!(reg.get(1).unwrap().process_count(), 1);
        assert_eq!(reg.total_processes(), 3);
    }

    #[test]
    fn test_get_does_not_create() {
        let reg = QueueRegistry::new();
        assert!(reg.get(9).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_try_find_or_create() {
        let mut reg = QueueRegistry::new();
        reg.try_find_or_create(7).unwrap();
        reg.try_find_or_create(7).unwrap();
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_duplicate_resets_results_and_keeps_order() {
        let mut q = Queue::new(1);
        q.push_descriptor(5, 3, 0);
        q.push_descriptor(2, 1, 4);

        let mut copy = q.duplicate_processes();
        copy[0].dispatch_at(0);
        copy[1].dispatch_at(5);

        let again = duplicate_processes(&copy);
        assert_eq!(again.len(), 2);
        assert_eq!(again[1].process_id, 1);
        assert_eq!(again[1].arrival_time, 4);
        assert_eq!(again[1].priority, 1);
        assert!(again.iter().all(|p| p.waiting_time == 0 && p.completion_time == 0));
        // Source queue untouched by work on the copy.
        assert!(q.processes().iter().all(|p| p.completion_time == 0));
    }

    #[test]
    fn test_duplicate_empty() {
        assert!(duplicate_processes(&[]).is_empty());
    }
}
