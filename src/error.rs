//! Error types for the simulator.
//!
//! Errors carry a kind and a human-readable message. The kind decides how a
//! caller should react:
//!
//! | Kind | Recoverable | Raised by |
//! |------|-------------|-----------|
//! | `ResourceExhausted` | no | growing a queue or the registry |
//! | `InputUnavailable` | no | opening or reading the input source |
//! | `MalformedRecord` | yes | strict record parsing |
//! | `OutputFailed` | no | metrics sinks |
//! | `InvalidArgument` | no | algorithm/format names, configuration |
//!
//! Scheduling algorithms themselves never fail.

use std::fmt;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, SimError>;

/// A simulator error.
#[derive(Debug, Clone, PartialEq)]
pub struct SimError {
    /// Error category.
    pub kind: SimErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of simulator errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimErrorKind {
    /// A process or queue could not be allocated.
    ResourceExhausted,
    /// The ingestion source could not be opened or read.
    InputUnavailable,
    /// A descriptor line is not four colon-separated integers.
    MalformedRecord,
    /// A metrics sink failed to render or persist results.
    OutputFailed,
    /// An unknown name or an out-of-range setting was supplied.
    InvalidArgument,
}

impl SimError {
    /// Creates an error of the given kind.
    pub fn new(kind: SimErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Allocation failure while growing a data structure.
    pub fn resource_exhausted(message: impl Into<String>) -> Self {
        Self::new(SimErrorKind::ResourceExhausted, message)
    }

    /// Input source could not be opened or read.
    pub fn input_unavailable(message: impl Into<String>) -> Self {
        Self::new(SimErrorKind::InputUnavailable, message)
    }

    /// Descriptor line could not be parsed.
    pub fn malformed_record(message: impl Into<String>) -> Self {
        Self::new(SimErrorKind::MalformedRecord, message)
    }

    /// Output sink failure.
    pub fn output_failed(message: impl Into<String>) -> Self {
        Self::new(SimErrorKind::OutputFailed, message)
    }

    /// Unknown name or bad setting.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(SimErrorKind::InvalidArgument, message)
    }

    /// Whether the run must stop when this error is raised.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind, SimErrorKind::MalformedRecord)
    }
}

impl fmt::Display for SimErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimErrorKind::ResourceExhausted => "resource exhausted",
            SimErrorKind::InputUnavailable => "input unavailable",
            SimErrorKind::MalformedRecord => "malformed record",
            SimErrorKind::OutputFailed => "output failed",
            SimErrorKind::InvalidArgument => "invalid argument",
        };
        f.write_str(name)
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for SimError {}

impl From<std::collections::TryReserveError> for SimError {
    fn from(err: std::collections::TryReserveError) -> Self {
        SimError::resource_exhausted(err.to_string())
    }
}
