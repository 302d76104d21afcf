//! Input validation for simulation runs.
//!
//! Scheduling never rejects input: negative bursts or arrivals just produce
//! degenerate times. Callers that want to refuse such data run these checks
//! first. Detects:
//! - Negative burst or arrival times
//! - Processes whose `queue_id` differs from their owning queue
//! - Process ids that are not `0..count` in ingestion order
//! - Queue identifiers registered twice

use std::collections::HashSet;

use crate::models::{Process, QueueRegistry};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A process needs a negative amount of CPU time.
    NegativeBurst,
    /// A process arrives before the simulation epoch.
    NegativeArrival,
    /// A process is stored under a queue with a different identifier.
    QueueMismatch,
    /// Process ids are not a contiguous range starting at 0.
    NonContiguousProcessIds,
    /// Two queues share an identifier.
    DuplicateQueueId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates every queue in a registry.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_registry(registry: &QueueRegistry) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for queue in registry {
        if !seen.insert(queue.queue_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateQueueId,
                format!("Duplicate queue ID: {}", queue.queue_id),
            ));
        }
        check_processes(queue.queue_id, queue.processes(), &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a single queue's process list.
pub fn validate_processes(queue_id: i64, processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    check_processes(queue_id, processes, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_processes(queue_id: i64, processes: &[Process], errors: &mut Vec<ValidationError>) {
    for (idx, p) in processes.iter().enumerate() {
        if p.process_id != idx {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonContiguousProcessIds,
                format!(
                    "Queue {queue_id}: position {idx} holds process id {}",
                    p.process_id
                ),
            ));
        }
        if p.queue_id != queue_id {
            errors.push(ValidationError::new(
                ValidationErrorKind::QueueMismatch,
                format!(
                    "Queue {queue_id}: process {} claims queue {}",
                    p.process_id, p.queue_id
                ),
            ));
        }
        if p.burst_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeBurst,
                format!(
                    "Queue {queue_id}: process {} has burst time {}",
                    p.process_id, p.burst_time
                ),
            ));
        }
        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Queue {queue_id}: process {} has arrival time {}",
                    p.process_id, p.arrival_time
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> QueueRegistry {
        let mut reg = QueueRegistry::new();
        reg.find_or_create(1).push_descriptor(5, 0, 0);
        reg.find_or_create(1).push_descriptor(3, 1, 2);
        reg.find_or_create(2).push_descriptor(4, 0, 5);
        reg
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_registry(&sample_registry()).is_ok());
        assert!(validate_registry(&QueueRegistry::new()).is_ok());
    }

    #[test]
    fn test_negative_burst() {
        let mut reg = sample_registry();
        reg.find_or_create(2).push_descriptor(-1, 0, 0);

        let errors = validate_registry(&reg).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeBurst);
        assert!(errors[0].message.contains("Queue 2"));
    }

    #[test]
    fn test_negative_arrival() {
        let mut reg = QueueRegistry::new();
        reg.find_or_create(1).push_descriptor(1, 0, -3);

        let errors = validate_registry(&reg).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeArrival));
    }

    #[test]
    fn test_non_contiguous_ids() {
        let procs = vec![Process::new(0, 1, 1, 0, 0), Process::new(2, 1, 1, 0, 0)];
        let errors = validate_processes(1, &procs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonContiguousProcessIds));
    }

    #[test]
    fn test_queue_mismatch() {
        let procs = vec![Process::new(0, 9, 1, 0, 0)];
        let errors = validate_processes(1, &procs).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::QueueMismatch);
    }

    #[test]
    fn test_duplicate_queue_id_from_deserialized_registry() {
        let json = r#"{"queues":[
            {"queue_id":1,"processes":[]},
            {"queue_id":1,"processes":[]}
        ]}"#;
        let reg: QueueRegistry = serde_json::from_str(json).unwrap();
        let errors = validate_registry(&reg).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateQueueId);
    }

    #[test]
    fn test_multiple_errors() {
        let procs = vec![Process::new(1, 7, -2, 0, -1)];
        let errors = validate_processes(1, &procs).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
