//! Errors raised while building or running a graph.

use thiserror::Error;

use crate::types::NodeId;

/// Boxed error returned by computation units.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Every failure the composition algebra or the execution engine can report.
#[derive(Debug, Error)]
pub enum GraphError {
  /// The parameter list of a computation unit could not be determined.
  #[error("cannot inspect unit '{unit}': {reason}")]
  UninspectableUnit { unit: String, reason: String },

  /// A producer's output cannot be mapped onto a consumer's parameters.
  #[error(
    "cannot bind {producer} -> {consumer}: expected {expected} argument(s), got {actual} ({reason})"
  )]
  Binding {
    producer: String,
    consumer: String,
    expected: usize,
    actual: usize,
    reason: String,
  },

  /// A wrapped computation failed.
  #[error("node '{name}' ({node}) failed: {source}")]
  NodeExecution {
    node: NodeId,
    name: String,
    #[source]
    source: BoxError,
  },

  /// A conditional or loop predicate did not produce a boolean.
  #[error("predicate of '{name}' ({node}) returned a non-boolean value: {found}")]
  Predicate {
    node: NodeId,
    name: String,
    found: String,
  },

  /// A loop ran past its configured iteration cap.
  #[error("loop '{name}' ({node}) exceeded {limit} iteration(s)")]
  IterationLimit {
    node: NodeId,
    name: String,
    limit: u64,
  },

  /// A chain or layer was built from an unusable set of members.
  #[error("invalid composition: {0}")]
  InvalidComposition(String),

  /// Execution options could not be read.
  #[error("config error: {0}")]
  Config(String),

  /// A layer worker was lost before reporting a result.
  #[error("worker pool error: {0}")]
  WorkerPool(String),
}

impl GraphError {
  /// Identity of the node the error originates from, when it has one.
  pub fn node(&self) -> Option<NodeId> {
    match self {
      GraphError::NodeExecution { node, .. }
      | GraphError::Predicate { node, .. }
      | GraphError::IterationLimit { node, .. } => Some(*node),
      _ => None,
    }
  }

  pub fn is_binding(&self) -> bool {
    matches!(self, GraphError::Binding { .. })
  }
}
