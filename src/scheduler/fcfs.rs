//! First-Come-First-Served scheduling.
//!
//! List order is the schedule. The clock only ever jumps forward to a
//! process's arrival when it would otherwise start early; it never reorders,
//! even when arrival times are not sorted.
//!
//! # Complexity
//! O(n).

use crate::models::Process;

/// Fills in waiting and completion times in list order.
///
/// An empty slice is a no-op.
pub fn schedule(processes: &mut [Process]) {
    let mut now: i64 = 0;
    for process in processes.iter_mut() {
        if now < process.arrival_time {
            now = process.arrival_time;
        }
        now = process.dispatch_at(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(pid: usize, burst: i64, arrival: i64) -> Process {
        Process::new(pid, 1, burst, 0, arrival)
    }

    #[test]
    fn test_fcfs_basic() {
        let mut procs = vec![proc(0, 5, 0), proc(1, 3, 1), proc(2, 8, 2)];
        schedule(&mut procs);

        let waiting: Vec<i64> = procs.iter().map(|p| p.waiting_time).collect();
        let completion: Vec<i64> = procs.iter().map(|p| p.completion_time).collect();
        assert_eq!(waiting, vec![0, 4, 6]);
        assert_eq!(completion, vec![5, 8, 16]);
    }

    #[test]
    fn test_fcfs_idle_gap() {
        let mut procs = vec![proc(0, 2, 0), proc(1, 3, 10)];
        schedule(&mut procs);
        assert_eq!(procs[1].waiting_time, 0);
        assert_eq!(procs[1].completion_time, 13);
    }

    #[test]
    fn test_fcfs_keeps_list_order_for_unsorted_arrivals() {
        // P0 arrives later than P1 but still runs first.
        let mut procs = vec![proc(0, 4, 6), proc(1, 2, 0)];
        schedule(&mut procs);
        assert_eq!(procs[0].waiting_time, 0);
        assert_eq!(procs[0].completion_time, 10);
        assert_eq!(procs[1].waiting_time, 10);
        assert_eq!(procs[1].completion_time, 12);
    }

    #[test]
    fn test_fcfs_empty() {
        let mut procs: Vec<Process> = Vec::new();
        schedule(&mut procs);
        assert!(procs.is_empty());
    }

    #[test]
    fn test_fcfs_waiting_matches_previous_completion() {
        let mut procs = vec![proc(0, 3, 0), proc(1, 1, 1), proc(2, 4, 2), proc(3, 2, 20)];
        schedule(&mut procs);
        for i in 1..procs.len() {
            let expected = (procs[i - 1].completion_time - procs[i].arrival_time).max(0);
            assert_eq!(procs[i].waiting_time, expected);
        }
    }
}
