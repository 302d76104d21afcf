//! Descriptor ingestion.
//!
//! Reads line-oriented process descriptors of the form
//! `burst:priority:arrival:queue_id` and files each one into the queue
//! registry. Blank lines are skipped; lines that are not exactly four
//! colon-separated integers are skipped and counted, never reported.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SimError};
use crate::models::QueueRegistry;

/// One parsed descriptor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// Required CPU time.
    pub burst_time: i64,
    /// Scheduling priority (lower = first).
    pub priority: i64,
    /// Arrival time.
    pub arrival_time: i64,
    /// Target queue.
    pub queue_id: i64,
}

impl ProcessDescriptor {
    /// Renders the descriptor in input-file form.
    pub fn to_line(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.burst_time, self.priority, self.arrival_time, self.queue_id
        )
    }
}

/// Counters collected while ingesting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Valid records filed into queues.
    pub records: usize,
    /// Non-blank lines that failed to parse.
    pub skipped: usize,
    /// Queues in the registry after ingestion.
    pub queues: usize,
}

/// Parses one descriptor line, or `None` if it is not four integers.
pub fn parse_record(line: &str) -> Option<ProcessDescriptor> {
    parse_record_strict(line).ok()
}

/// Parses one descriptor line, explaining why it was rejected.
pub fn parse_record_strict(line: &str) -> Result<ProcessDescriptor> {
    let trimmed = line.trim();
    let fields: Vec<&str> = trimmed.split(':').collect();
    if fields.len() != 4 {
        return Err(SimError::malformed_record(format!(
            "expected 4 fields, found {} in '{trimmed}'",
            fields.len()
        )));
    }

    let mut values = [0i64; 4];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field.trim().parse().map_err(|_| {
            SimError::malformed_record(format!("'{}' is not an integer in '{trimmed}'", field.trim()))
        })?;
    }

    let [burst_time, priority, arrival_time, queue_id] = values;
    Ok(ProcessDescriptor {
        burst_time,
        priority,
        arrival_time,
        queue_id,
    })
}

/// Files a descriptor into its queue, creating the queue if needed.
///
/// The new process id is the queue's count before insertion.
pub fn file_descriptor(registry: &mut QueueRegistry, desc: &ProcessDescriptor) -> Result<usize> {
    let queue = registry.try_find_or_create(desc.queue_id)?;
    let process = queue.try_push_descriptor(desc.burst_time, desc.priority, desc.arrival_time)?;
    Ok(process.process_id)
}

/// Ingests every line of `reader` into `registry`.
///
/// Read failures are fatal (`InputUnavailable`); so is allocation failure
/// (`ResourceExhausted`). Malformed lines are skipped.
pub fn ingest_reader<R: BufRead>(reader: R, registry: &mut QueueRegistry) -> Result<IngestSummary> {
    let mut summary = IngestSummary::default();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| {
            SimError::input_unavailable(format!("read failed at line {}: {e}", lineno + 1))
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_record_strict(&line) {
            Ok(desc) => {
                file_descriptor(registry, &desc)?;
                summary.records += 1;
            }
            Err(err) => {
                debug!(line = lineno + 1, %err, "skipping malformed record");
                summary.skipped += 1;
            }
        }
    }

    summary.queues = registry.len();
    Ok(summary)
}

/// Ingests descriptor text held in memory.
pub fn ingest_str(text: &str, registry: &mut QueueRegistry) -> Result<IngestSummary> {
    ingest_reader(text.as_bytes(), registry)
}

/// Opens `path` and ingests it into a fresh registry.
///
/// Failing to open the file is fatal (`InputUnavailable`).
pub fn ingest_file(path: impl AsRef<Path>) -> Result<(QueueRegistry, IngestSummary)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SimError::input_unavailable(format!("cannot open {}: {e}", path.display()))
    })?;

    let mut registry = QueueRegistry::new();
    let summary = ingest_reader(BufReader::new(file), &mut registry)?;
    info!(
        path = %path.display(),
        records = summary.records,
        skipped = summary.skipped,
        queues = summary.queues,
        "ingested descriptors"
    );
    Ok((registry, summary))
}
