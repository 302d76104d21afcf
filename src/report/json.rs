//! JSON report.

use std::io::Write;

use serde::Serialize;

use super::{io_error, MetricsSink, ProcessMetrics};
use crate::error::{Result, SimError};
use crate::scheduler::{Algorithm, RunKpi};

#[derive(Debug, Serialize)]
struct JsonRun {
    algorithm: Algorithm,
    results: Vec<ProcessMetrics>,
    kpi: Option<RunKpi>,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    runs: &'a [JsonRun],
}

/// Buffers all runs and writes one pretty-printed document on `finish`.
///
/// Shape: `{"runs": [{"algorithm": "fcfs", "results": [...], "kpi": {...}}]}`.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    out: W,
    runs: Vec<JsonRun>,
}

impl<W: Write> JsonSink<W> {
    /// Creates a sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            runs: Vec::new(),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn current(&mut self) -> Result<&mut JsonRun> {
        self.runs
            .last_mut()
            .ok_or_else(|| SimError::output_failed("record received before begin_run"))
    }
}

impl<W: Write> MetricsSink for JsonSink<W> {
    fn begin_run(&mut self, algorithm: Algorithm) -> Result<()> {
        self.runs.push(JsonRun {
            algorithm,
            results: Vec::new(),
            kpi: None,
        });
        Ok(())
    }

    fn record(&mut self, metrics: &ProcessMetrics) -> Result<()> {
        self.current()?.results.push(*metrics);
        Ok(())
    }

    fn end_run(&mut self, kpi: &RunKpi) -> Result<()> {
        self.current()?.kpi = Some(kpi.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let report = JsonReport { runs: &self.runs };
        serde_json::to_writer_pretty(&mut self.out, &report)
            .map_err(|e| SimError::output_failed(e.to_string()))?;
        writeln!(self.out).map_err(io_error)?;
        self.out.flush().map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QueueRegistry;
    use crate::report::aggregate_all;
    use crate::scheduler::Simulation;

    #[test]
    fn test_json_report() {
        let mut reg = QueueRegistry::new();
        let q = reg.find_or_create(2);
        q.push_descriptor(6, 0, 0);
        q.push_descriptor(2, 0, 0);

        let runs = Simulation::new(&reg).run_all(&[Algorithm::Fcfs, Algorithm::Sjf]);
        let mut sink = JsonSink::new(Vec::new());
        aggregate_all(&runs, &mut sink).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();
        let runs = value["runs"].as_array().unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0]["algorithm"], "fcfs");
        assert_eq!(runs[1]["algorithm"], "sjf");
        assert_eq!(runs[1]["results"][0]["queue_id"], 2);
        assert_eq!(runs[1]["results"][0]["waiting_time"], 2);
        assert_eq!(runs[1]["results"][1]["completion_time"], 2);
        assert_eq!(runs[1]["kpi"]["makespan"], 8);
    }

    #[test]
    fn test_json_empty_document() {
        let mut sink = JsonSink::new(Vec::new());
        sink.finish().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();
        assert!(value["runs"].as_array().unwrap().is_empty());
    }
}
