//! Loop node: a pre-test loop over a body node.

use std::fmt;

use crate::computation::Unit;
use crate::error::Result;
use crate::inspector::inspect;
use crate::types::{NodeId, ParameterDescriptor};

use super::Node;

/// Repeats `body` until the predicate holds for the current value.
#[derive(Clone)]
pub struct LoopNode {
  pub(crate) id: NodeId,
  pub(crate) name: String,
  pub(crate) description: Option<String>,
  pub(crate) predicate: Unit,
  pub(crate) params: ParameterDescriptor,
  pub(crate) body: Box<Node>,
  pub(crate) max_iterations: Option<u64>,
}

impl LoopNode {
  pub fn new(predicate: Unit, body: impl Into<Node>) -> Result<Self> {
    let params = inspect(predicate.as_ref())?;
    Ok(Self {
      id: NodeId::fresh(),
      name: predicate.name().to_string(),
      description: predicate.description().map(str::to_string),
      predicate,
      params,
      body: Box::new(body.into().reidentified()),
      max_iterations: None,
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

  /// Caps the number of body invocations. Unbounded by default.
  pub fn with_max_iterations(mut self, limit: u64) -> Self {
    self.max_iterations = Some(limit);
    self
  }

  pub fn id(&self) -> NodeId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn body(&self) -> &Node {
    &self.body
  }

  pub fn max_iterations(&self) -> Option<u64> {
    self.max_iterations
  }
}

impl fmt::Debug for LoopNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LoopNode")
      .field("id", &self.id)
      .field("name", &self.name)
      .field("params", &self.params)
      .field("body", &self.body)
      .field("max_iterations", &self.max_iterations)
      .finish_non_exhaustive()
  }
}
