//! Occurrence identity of a node inside a composed graph.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Identity of one node occurrence. Two positions wrapping the same computation
/// always carry different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
  /// Generates a fresh random identity.
  pub fn fresh() -> Self {
    Self(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> &Uuid {
    &self.0
  }
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
