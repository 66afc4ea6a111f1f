//! Conditional node: evaluates a predicate, then exactly one of two branches.

use std::fmt;

use crate::computation::{FnUnit, Unit};
use crate::error::{BoxError, Result};
use crate::inspector::inspect;
use crate::types::{Bundle, CallArgs, NodeId, ParameterDescriptor, Signature};

use super::Node;

#[derive(Clone)]
pub struct ConditionalNode {
  pub(crate) id: NodeId,
  pub(crate) name: String,
  pub(crate) description: Option<String>,
  pub(crate) predicate: Unit,
  pub(crate) params: ParameterDescriptor,
  pub(crate) true_node: Box<Node>,
  pub(crate) false_node: Box<Node>,
}

impl ConditionalNode {
  /// Branches may be any node, chain or layer.
  pub fn new(
    predicate: Unit,
    true_node: impl Into<Node>,
    false_node: impl Into<Node>,
  ) -> Result<Self> {
    let params = inspect(predicate.as_ref())?;
    Ok(Self {
      id: NodeId::fresh(),
      name: predicate.name().to_string(),
      description: predicate.description().map(str::to_string),
      predicate,
      params,
      true_node: Box::new(true_node.into().reidentified()),
      false_node: Box::new(false_node.into().reidentified()),
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

  pub fn true_node(&self) -> &Node {
    &self.true_node
  }

  pub fn false_node(&self) -> &Node {
    &self.false_node
  }
}

/// Builds a conditional node from a predicate closure.
pub fn conditional<F>(
  name: impl Into<String>,
  signature: Signature,
  predicate: F,
  true_node: impl Into<Node>,
  false_node: impl Into<Node>,
) -> Result<ConditionalNode>
where
  F: Fn(CallArgs) -> std::result::Result<Bundle, BoxError> + Send + Sync + 'static,
{
  ConditionalNode::new(
    FnUnit::new(name, signature, predicate).into_unit(),
    true_node,
    false_node,
  )
}

impl fmt::Debug for ConditionalNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConditionalNode")
      .field("id", &self.id)
      .field("name", &self.name)
      .field("params", &self.params)
      .field("true_node", &self.true_node)
      .field("false_node", &self.false_node)
      .finish_non_exhaustive()
  }
}
