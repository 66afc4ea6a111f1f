//! Function node: one occurrence of a user computation.

use std::fmt;
use std::sync::Arc;

use crate::computation::{FnUnit, Unit};
use crate::error::{BoxError, Result};
use crate::inspector::inspect;
use crate::types::{Bundle, CallArgs, NodeId, OutputShape, ParameterDescriptor, Signature};

/// Wraps one computation unit. Cloning keeps the same identity; composition
/// assigns fresh ones.
#[derive(Clone)]
pub struct FunctionNode {
  pub(crate) id: NodeId,
  pub(crate) name: String,
  pub(crate) description: Option<String>,
  pub(crate) unit: Unit,
  pub(crate) params: ParameterDescriptor,
  pub(crate) returns: OutputShape,
}

impl FunctionNode {
  /// Creates a node for `unit`, inspecting its parameters.
  pub fn new(unit: Unit) -> Result<Self> {
    let params = inspect(unit.as_ref())?;
    Ok(Self {
      id: NodeId::fresh(),
      name: unit.name().to_string(),
      description: unit.description().map(str::to_string),
      unit,
      params,
      returns: OutputShape::Single,
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

  /// Declares the shape of the value(s) the unit returns. Defaults to a single value.
  pub fn returning(mut self, shape: OutputShape) -> Self {
    self.returns = shape;
    self
  }

  pub fn id(&self) -> NodeId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  pub fn parameters(&self) -> &ParameterDescriptor {
    &self.params
  }

  pub fn unit(&self) -> &Unit {
    &self.unit
  }

  /// True when both nodes wrap the very same computation.
  pub fn shares_unit_with(&self, other: &FunctionNode) -> bool {
    Arc::ptr_eq(&self.unit, &other.unit)
  }
}

/// Builds a function node from a closure.
///
/// ```
/// use streamweave_chain::{Bundle, Signature, node};
///
/// let add = node("add", Signature::positional(["a", "b"]), |args| {
///   Ok(Bundle::single(args.f64("a")? + args.f64("b")?))
/// })
/// .unwrap();
/// assert_eq!(add.name(), "add");
/// ```
pub fn node<F>(name: impl Into<String>, signature: Signature, func: F) -> Result<FunctionNode>
where
  F: Fn(CallArgs) -> std::result::Result<Bundle, BoxError> + Send + Sync + 'static,
{
  FunctionNode::new(FnUnit::new(name, signature, func).into_unit())
}

impl fmt::Debug for FunctionNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FunctionNode")
      .field("id", &self.id)
      .field("name", &self.name)
      .field("params", &self.params)
      .field("returns", &self.returns)
      .finish_non_exhaustive()
  }
}
