//! Run configuration.
//!
//! Settings come from, in increasing precedence: built-in defaults, an
//! optional TOML file, `MQ_SCHEDULE_*` environment variables, and finally
//! command-line flags (applied by the binary).

use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dispatching::IdleAdvance;
use crate::report::OutputFormat;
use crate::scheduler::{parse_algorithm_list, Algorithm};

/// Overrides `input`.
pub const ENV_INPUT: &str = "MQ_SCHEDULE_INPUT";
/// Overrides `output`.
pub const ENV_OUTPUT: &str = "MQ_SCHEDULE_OUTPUT";
/// Overrides `algorithms` with a comma-separated list.
pub const ENV_ALGORITHMS: &str = "MQ_SCHEDULE_ALGORITHMS";
/// Overrides `format` (`text` or `json`).
pub const ENV_FORMAT: &str = "MQ_SCHEDULE_FORMAT";
/// Overrides `idle_advance` (`tick` or `next-arrival`).
pub const ENV_IDLE_ADVANCE: &str = "MQ_SCHEDULE_IDLE_ADVANCE";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Descriptor file to ingest.
    pub input: Option<PathBuf>,
    /// Report destination; `None` writes to stdout.
    pub output: Option<PathBuf>,
    /// Algorithms to run, in reporting order.
    pub algorithms: Vec<Algorithm>,
    /// Report rendering.
    pub format: OutputFormat,
    /// Idle clock policy for SJF and Priority.
    pub idle_advance: IdleAdvance,
    /// Refuse input that fails validation instead of only warning.
    pub strict: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    #[serde(default)]
    algorithms: Vec<Algorithm>,
    format: Option<OutputFormat>,
    idle_advance: Option<IdleAdvance>,
    #[serde(default)]
    strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            algorithms: Algorithm::ALL.to_vec(),
            format: OutputFormat::default(),
            idle_advance: IdleAdvance::default(),
            strict: false,
        }
    }
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let defaults = Config::default();
        let algorithms = if raw.algorithms.is_empty() {
            defaults.algorithms
        } else {
            dedup(raw.algorithms)
        };
        Self {
            input: raw.input,
            output: raw.output,
            algorithms,
            format: raw.format.unwrap_or(defaults.format),
            idle_advance: raw.idle_advance.unwrap_or(defaults.idle_advance),
            strict: raw.strict,
        }
    }
}

impl Config {
    /// Loads the file at `path` (if any), then applies environment overrides.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let mut cfg = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        cfg.apply_env(|key| env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn from_file(path: PathBuf) -> Result<Self> {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(Config::from(toml::from_str::<RawConfig>(text)?))
    }

    /// Applies `MQ_SCHEDULE_*` overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_INPUT) {
            self.input = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup(ENV_OUTPUT) {
            self.output = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup(ENV_ALGORITHMS) {
            self.algorithms = parse_algorithm_list(&v).context(ENV_ALGORITHMS)?;
        }
        if let Some(v) = lookup(ENV_FORMAT) {
            self.format = v.parse::<OutputFormat>().context(ENV_FORMAT)?;
        }
        if let Some(v) = lookup(ENV_IDLE_ADVANCE) {
            self.idle_advance = v.parse::<IdleAdvance>().context(ENV_IDLE_ADVANCE)?;
        }
        Ok(())
    }
}

fn dedup(algorithms: Vec<Algorithm>) -> Vec<Algorithm> {
    let mut out = Vec::with_capacity(algorithms.len());
    for a in algorithms {
        if !out.contains(&a) {
            out.push(a);
        }
    }
    out
}
