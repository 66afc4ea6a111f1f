//! Sequence chain: stage i's output feeds stage i+1.

use std::fmt;

use crate::binder::check_edge;
use crate::error::{GraphError, Result};
use crate::types::NodeId;

use super::Node;

/// An ordered, non-empty sequence of stages. Nested chains are flattened on
/// construction; layers stay single stages.
#[derive(Clone)]
pub struct Chain {
  pub(crate) id: NodeId,
  pub(crate) name: String,
  pub(crate) description: Option<String>,
  pub(crate) stages: Vec<Node>,
}

impl Chain {
  /// Builds a chain, validating every edge between consecutive stages and
  /// giving each stage a fresh identity.
  pub fn new<I, N>(stages: I) -> Result<Self>
  where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
  {
    let mut flat = Vec::new();
    for stage in stages {
      match stage.into() {
        Node::Chain(inner) => flat.extend(inner.stages),
        other => flat.push(other),
      }
    }
    if flat.is_empty() {
      return Err(GraphError::InvalidComposition(
        "a chain needs at least one stage".to_string(),
      ));
    }
    for pair in flat.windows(2) {
      check_edge(&pair[0], &pair[1])?;
    }
    Ok(Self {
      id: NodeId::fresh(),
      name: "Chain".to_string(),
      description: None,
      stages: flat.into_iter().map(Node::reidentified).collect(),
    })
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn id(&self) -> NodeId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn stages(&self) -> &[Node] {
    &self.stages
  }

  pub fn len(&self) -> usize {
    self.stages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }
}

impl fmt::Debug for Chain {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Chain")
      .field("id", &self.id)
      .field("name", &self.name)
      .field("stages", &self.stages)
      .finish_non_exhaustive()
  }
}
