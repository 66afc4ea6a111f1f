//! Node and edge kind tags exposed to structural consumers.

use std::fmt;

use serde::Serialize;

/// The closed set of node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
  Function,
  Conditional,
  Loop,
  Chain,
  Layer,
}

impl fmt::Display for NodeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NodeKind::Function => write!(f, "function"),
      NodeKind::Conditional => write!(f, "conditional"),
      NodeKind::Loop => write!(f, "loop"),
      NodeKind::Chain => write!(f, "chain"),
      NodeKind::Layer => write!(f, "layer"),
    }
  }
}

/// Kind of a structural edge between a producer and a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
  Sequential,
  ParallelMember,
  ConditionalTrue,
  ConditionalFalse,
  LoopEnter,
  LoopIterate,
}

impl fmt::Display for EdgeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EdgeKind::Sequential => write!(f, "sequential"),
      EdgeKind::ParallelMember => write!(f, "parallel-member"),
      EdgeKind::ConditionalTrue => write!(f, "conditional-true"),
      EdgeKind::ConditionalFalse => write!(f, "conditional-false"),
      EdgeKind::LoopEnter => write!(f, "loop-enter"),
      EdgeKind::LoopIterate => write!(f, "loop-iterate"),
    }
  }
}
