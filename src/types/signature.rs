//! Declared parameter lists of computation units.

use serde::Serialize;

/// One named parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
  pub name: String,
  pub required: bool,
}

/// Parameter list as declared by a computation unit.
///
/// Built fluently:
///
/// ```
/// use streamweave_chain::Signature;
///
/// let sig = Signature::new().param("a").optional("scale").variadic_named("options");
/// assert_eq!(sig.params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Signature {
  pub params: Vec<Param>,
  pub variadic_positional: Option<String>,
  pub variadic_named: Option<String>,
  /// Set when a collector was declared more than once; rejected by inspection.
  #[serde(skip)]
  pub(crate) duplicate_collector: bool,
}

impl Signature {
  pub fn new() -> Self {
    Self::default()
  }

  /// Signature with the given required parameters, in order.
  pub fn positional<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    names.into_iter().fold(Self::new(), |sig, n| sig.param(n))
  }

  /// Adds a required parameter.
  pub fn param(mut self, name: impl Into<String>) -> Self {
    self.params.push(Param {
      name: name.into(),
      required: true,
    });
    self
  }

  /// Adds a parameter that may be left unbound.
  pub fn optional(mut self, name: impl Into<String>) -> Self {
    self.params.push(Param {
      name: name.into(),
      required: false,
    });
    self
  }

  /// Declares a collector for surplus positional values.
  pub fn variadic_positional(mut self, name: impl Into<String>) -> Self {
    self.duplicate_collector |= self.variadic_positional.is_some();
    self.variadic_positional = Some(name.into());
    self
  }

  /// Declares a collector for surplus named values.
  pub fn variadic_named(mut self, name: impl Into<String>) -> Self {
    self.duplicate_collector |= self.variadic_named.is_some();
    self.variadic_named = Some(name.into());
    self
  }
}

/// Structured result of inspecting a unit: every node kind funnels into this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
  /// All declared names, in order.
  pub names: Vec<String>,
  /// Required names, in order.
  pub required: Vec<String>,
  pub has_variadic_positional: bool,
  pub has_variadic_named: bool,
}

impl ParameterDescriptor {
  /// Descriptor that accepts any input.
  pub fn open() -> Self {
    Self {
      has_variadic_positional: true,
      has_variadic_named: true,
      ..Self::default()
    }
  }

  /// True when the unit takes no input at all.
  pub fn is_nullary(&self) -> bool {
    self.names.is_empty() && !self.has_variadic_positional && !self.has_variadic_named
  }
}
