//! Plain-text report.

use std::io::Write;

use super::{io_error, MetricsSink, ProcessMetrics};
use crate::error::Result;
use crate::scheduler::{Algorithm, RunKpi};

/// Writes a human-readable report.
///
/// ```text
/// === FCFS: First-Come-First-Served ===
/// Queue 1
///   P0  waiting=0  completion=5
///   P1  waiting=4  completion=8
///   queue 1 average waiting time: 2.00  average turnaround: 6.00  makespan: 8
/// Overall average waiting time: 2.00
/// ```
#[derive(Debug)]
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    /// Creates a sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MetricsSink for TextSink<W> {
    fn begin_run(&mut self, algorithm: Algorithm) -> Result<()> {
        writeln!(self.out, "=== {algorithm}: {} ===", algorithm.title()).map_err(io_error)
    }

    fn begin_queue(&mut self, queue_id: i64) -> Result<()> {
        writeln!(self.out, "Queue {queue_id}").map_err(io_error)
    }

    fn record(&mut self, m: &ProcessMetrics) -> Result<()> {
        writeln!(
            self.out,
            "  P{}  waiting={}  completion={}",
            m.process_id, m.waiting_time, m.completion_time
        )
        .map_err(io_error)
    }

    fn end_run(&mut self, kpi: &RunKpi) -> Result<()> {
        for q in &kpi.queues {
            writeln!(
                self.out,
                "  queue {} average waiting time: {:.2}  average turnaround: {:.2}  makespan: {}",
                q.queue_id, q.avg_waiting_time, q.avg_turnaround_time, q.makespan
            )
            .map_err(io_error)?;
        }
        writeln!(
            self.out,
            "Overall average waiting time: {:.2}\n",
            kpi.avg_waiting_time
        )
        .map_err(io_error)
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().map_err(io_error)
    }
}
