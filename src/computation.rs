//! Computation units: the user logic wrapped by function, conditional and loop nodes.

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::types::{Bundle, CallArgs, Signature};

/// A unit of user logic with an inspectable parameter list.
pub trait Computation: Send + Sync {
  fn name(&self) -> &str;

  fn description(&self) -> Option<&str> {
    None
  }

  /// Declared parameters; `None` when the unit cannot describe them.
  fn signature(&self) -> Option<&Signature>;

  fn call(&self, args: CallArgs) -> Result<Bundle, BoxError>;
}

/// Shared handle to a computation. Several node occurrences may hold the same unit.
pub type Unit = Arc<dyn Computation>;

type UnitFn = dyn Fn(CallArgs) -> Result<Bundle, BoxError> + Send + Sync;

/// Closure-backed computation with an explicit signature.
pub struct FnUnit {
  name: String,
  description: Option<String>,
  signature: Signature,
  func: Box<UnitFn>,
}

impl FnUnit {
  pub fn new<F>(name: impl Into<String>, signature: Signature, func: F) -> Self
  where
    F: Fn(CallArgs) -> Result<Bundle, BoxError> + Send + Sync + 'static,
  {
    Self {
      name: name.into(),
      description: None,
      signature,
      func: Box::new(func),
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn into_unit(self) -> Unit {
    Arc::new(self)
  }
}

impl Computation for FnUnit {
  fn name(&self) -> &str {
    &self.name
  }

  fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  fn signature(&self) -> Option<&Signature> {
    Some(&self.signature)
  }

  fn call(&self, args: CallArgs) -> Result<Bundle, BoxError> {
    (self.func)(args)
  }
}

impl fmt::Debug for FnUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FnUnit")
      .field("name", &self.name)
      .field("signature", &self.signature)
      .finish_non_exhaustive()
  }
}

/// Wraps a closure into a shared [Unit].
pub fn unit<F>(name: impl Into<String>, signature: Signature, func: F) -> Unit
where
  F: Fn(CallArgs) -> Result<Bundle, BoxError> + Send + Sync + 'static,
{
  FnUnit::new(name, signature, func).into_unit()
}
