//! Metrics aggregation and output sinks.
//!
//! [`aggregate`] walks a simulation run in queue-registration order and,
//! within each queue, in ingestion order, handing one [`ProcessMetrics`]
//! per process to a [`MetricsSink`]. It does no scheduling itself.
//!
//! # Sinks
//!
//! | Sink | Output |
//! |------|--------|
//! | [`TextSink`] | human-readable sections per algorithm and queue |
//! | [`JsonSink`] | one JSON document written on `finish` |
//! | [`CollectingSink`] | in-memory, for tests and library callers |

mod json;
mod text;

pub use json::JsonSink;
pub use text::TextSink;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::scheduler::{Algorithm, RunKpi, SimulationRun};

/// Result tuple reported for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Owning queue.
    pub queue_id: i64,
    /// Ingestion order within the queue.
    pub process_id: usize,
    /// Time spent eligible but not running.
    pub waiting_time: i64,
    /// Absolute completion time.
    pub completion_time: i64,
}

/// Receives aggregated results.
///
/// Calls arrive as `begin_run`, then per queue `begin_queue` followed by
/// that queue's `record`s, then `end_run`. `finish` is called once after
/// the last run.
pub trait MetricsSink {
    /// A new algorithm's results follow.
    fn begin_run(&mut self, _algorithm: Algorithm) -> Result<()> {
        Ok(())
    }

    /// Records for `queue_id` follow.
    fn begin_queue(&mut self, _queue_id: i64) -> Result<()> {
        Ok(())
    }

    /// One process's results.
    fn record(&mut self, metrics: &ProcessMetrics) -> Result<()>;

    /// All records of the current run have been delivered.
    fn end_run(&mut self, _kpi: &RunKpi) -> Result<()> {
        Ok(())
    }

    /// No more runs follow. Buffered sinks write their output here.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: MetricsSink + ?Sized> MetricsSink for Box<S> {
    fn begin_run(&mut self, algorithm: Algorithm) -> Result<()> {
        (**self).begin_run(algorithm)
    }

    fn begin_queue(&mut self, queue_id: i64) -> Result<()> {
        (**self).begin_queue(queue_id)
    }

    fn record(&mut self, metrics: &ProcessMetrics) -> Result<()> {
        (**self).record(metrics)
    }

    fn end_run(&mut self, kpi: &RunKpi) -> Result<()> {
        (**self).end_run(kpi)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Reports every process of one run to `sink`.
pub fn aggregate<S: MetricsSink + ?Sized>(run: &SimulationRun, sink: &mut S) -> Result<()> {
    sink.begin_run(run.algorithm)?;
    for queue in &run.queues {
        sink.begin_queue(queue.queue_id)?;
        for process in &queue.processes {
            sink.record(&ProcessMetrics {
                queue_id: queue.queue_id,
                process_id: process.process_id,
                waiting_time: process.waiting_time,
                completion_time: process.completion_time,
            })?;
        }
    }
    sink.end_run(&run.kpi())
}

/// Reports several runs, then finishes the sink.
pub fn aggregate_all<S: MetricsSink + ?Sized>(runs: &[SimulationRun], sink: &mut S) -> Result<()> {
    for run in runs {
        aggregate(run, sink)?;
    }
    sink.finish()
}

/// Collects metrics in memory, grouped by run.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    runs: Vec<(Algorithm, Vec<ProcessMetrics>)>,
    finished: bool,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs in the order they were reported.
    pub fn runs(&self) -> &[(Algorithm, Vec<ProcessMetrics>)] {
        &self.runs
    }

    /// Metrics of the first run that used `algorithm`.
    pub fn metrics_for(&self, algorithm: Algorithm) -> Option<&[ProcessMetrics]> {
        self.runs
            .iter()
            .find(|(a, _)| *a == algorithm)
            .map(|(_, m)| m.as_slice())
    }

    /// Whether `finish` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl MetricsSink for CollectingSink {
    fn begin_run(&mut self, algorithm: Algorithm) -> Result<()> {
        self.runs.push((algorithm, Vec::new()));
        Ok(())
    }

    fn record(&mut self, metrics: &ProcessMetrics) -> Result<()> {
        match self.runs.last_mut() {
            Some((_, records)) => {
                records.push(*metrics);
                Ok(())
            }
            None => Err(SimError::output_failed("record received before begin_run")),
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Rendering format for the binary's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Builds a sink writing this format to `writer`.
    pub fn sink<W: Write + 'static>(&self, writer: W) -> Box<dyn MetricsSink> {
        match self {
            OutputFormat::Text => Box::new(TextSink::new(writer)),
            OutputFormat::Json => Box::new(JsonSink::new(writer)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SimError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(SimError::invalid_argument(format!(
                "unknown output format '{other}' (expected text or json)"
            ))),
        }
    }
}

pub(crate) fn io_error(err: std::io::Error) -> SimError {
    SimError::output_failed(err.to_string())
}
