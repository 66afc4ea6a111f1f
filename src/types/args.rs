//! Arguments flowing along an edge, before and after binding.

use serde_json::{Map, Value};

use crate::error::BoxError;

/// Positional and named values handed to a consumer before binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
  pub positional: Vec<Value>,
  pub named: Map<String, Value>,
}

impl Args {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn positional<I, V>(values: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
  {
    Self {
      positional: values.into_iter().map(Into::into).collect(),
      named: Map::new(),
    }
  }

  pub fn named<I, K, V>(entries: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
  {
    Self {
      positional: Vec::new(),
      named: entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    }
  }

  /// Appends a positional value.
  pub fn arg(mut self, value: impl Into<Value>) -> Self {
    self.positional.push(value.into());
    self
  }

  /// Adds a named value.
  pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self.named.insert(name.into(), value.into());
    self
  }

  pub fn len(&self) -> usize {
    self.positional.len() + self.named.len()
  }

  pub fn is_empty(&self) -> bool {
    self.positional.is_empty() && self.named.is_empty()
  }
}

/// Inputs of one computation call after binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
  /// Declared parameters, in declaration order. Optional parameters that were
  /// not supplied are absent.
  pub params: Map<String, Value>,
  /// Values routed to the variadic positional collector.
  pub rest: Vec<Value>,
  /// Values routed to the variadic named collector.
  pub extra: Map<String, Value>,
}

impl CallArgs {
  pub fn get(&self, name: &str) -> Option<&Value> {
    self.params.get(name)
  }

  /// Returns the named parameter or an error naming it.
  pub fn require(&self, name: &str) -> Result<&Value, BoxError> {
    self
      .params
      .get(name)
      .ok_or_else(|| format!("missing argument '{}'", name).into())
  }

  /// Numeric parameter as `f64`.
  pub fn f64(&self, name: &str) -> Result<f64, BoxError> {
    self
      .require(name)?
      .as_f64()
      .ok_or_else(|| format!("argument '{}' is not a number", name).into())
  }

  /// Integer parameter as `i64`.
  pub fn i64(&self, name: &str) -> Result<i64, BoxError> {
    self
      .require(name)?
      .as_i64()
      .ok_or_else(|| format!("argument '{}' is not an integer", name).into())
  }

  pub fn rest(&self) -> &[Value] {
    &self.rest
  }

  pub fn extra(&self) -> &Map<String, Value> {
    &self.extra
  }
}
