//! Execution options: worker pool size and the optional loop iteration cap.

use std::env;
use std::num::NonZeroUsize;

use tracing::{info, instrument};

use crate::error::{GraphError, Result};

/// Environment variable overriding [ExecutionOptions::workers].
pub const WORKERS_ENV: &str = "STREAMWEAVE_CHAIN_WORKERS";
/// Environment variable setting [ExecutionOptions::max_loop_iterations].
pub const MAX_LOOP_ITERATIONS_ENV: &str = "STREAMWEAVE_CHAIN_MAX_LOOP_ITERATIONS";

/// Options for one invocation of a composed graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
  /// Upper bound on members of one layer running at once. Each layer
  /// invocation gets its own bound, so a layer nested inside a layer member
  /// may add up to `workers` more running members.
  pub workers: usize,
  /// Global cap on loop iterations; `None` leaves loops unbounded.
  /// A cap set on the loop node itself takes precedence.
  pub max_loop_iterations: Option<u64>,
}

impl Default for ExecutionOptions {
  fn default() -> Self {
    Self {
      workers: available_cores(),
      max_loop_iterations: None,
    }
  }
}

impl ExecutionOptions {
  pub fn with_workers(mut self, workers: usize) -> Self {
    self.workers = workers.max(1);
    self
  }

  pub fn with_max_loop_iterations(mut self, limit: u64) -> Self {
    self.max_loop_iterations = Some(limit);
    self
  }

  /// Defaults overlaid with `STREAMWEAVE_CHAIN_WORKERS` and
  /// `STREAMWEAVE_CHAIN_MAX_LOOP_ITERATIONS` when set.
  #[instrument(level = "trace")]
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Like [ExecutionOptions::from_env] with a custom variable source.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let mut options = Self::default();
    if let Some(raw) = lookup(WORKERS_ENV) {
      let workers: NonZeroUsize = raw
        .trim()
        .parse()
        .map_err(|e| GraphError::Config(format!("{}='{}': {}", WORKERS_ENV, raw, e)))?;
      options.workers = workers.get();
    }
    if let Some(raw) = lookup(MAX_LOOP_ITERATIONS_ENV) {
      let limit: u64 = raw.trim().parse().map_err(|e| {
        GraphError::Config(format!("{}='{}': {}", MAX_LOOP_ITERATIONS_ENV, raw, e))
      })?;
      options.max_loop_iterations = Some(limit);
    }
    info!(
      workers = options.workers,
      max_loop_iterations = ?options.max_loop_iterations,
      "execution options"
    );
    Ok(options)
  }
}

fn available_cores() -> usize {
  std::thread::available_parallelism()
    .map(NonZeroUsize::get)
    .unwrap_or(1)
}
