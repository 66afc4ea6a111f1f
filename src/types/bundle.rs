//! Output bundles: the value(s) produced by evaluating a node.

use serde::Serialize;
use serde_json::{Map, Value};

use super::Args;

/// Result of evaluating any node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Bundle {
  /// One value.
  Single(Value),
  /// Ordered values from a list-shaped layer or a multi-return computation.
  Ordered(Vec<Value>),
  /// Name-keyed values from a mapping-shaped layer, in declaration order.
  Keyed(Map<String, Value>),
}

impl Bundle {
  pub fn single(value: impl Into<Value>) -> Self {
    Bundle::Single(value.into())
  }

  pub fn ordered<I, V>(values: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
  {
    Bundle::Ordered(values.into_iter().map(Into::into).collect())
  }

  pub fn keyed<I, K, V>(entries: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
  {
    Bundle::Keyed(
      entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    )
  }

  /// Shape of this concrete bundle.
  pub fn shape(&self) -> OutputShape {
    match self {
      Bundle::Single(_) => OutputShape::Single,
      Bundle::Ordered(values) => OutputShape::Ordered(values.len()),
      Bundle::Keyed(map) => OutputShape::Keyed(map.keys().cloned().collect()),
    }
  }

  /// Folds the bundle into one value, used when it is nested inside a layer result.
  pub fn into_value(self) -> Value {
    match self {
      Bundle::Single(v) => v,
      Bundle::Ordered(values) => Value::Array(values),
      Bundle::Keyed(map) => Value::Object(map),
    }
  }

  /// Spreads the bundle over the next consumer's call: single and ordered
  /// values bind positionally, keyed values bind by name.
  pub fn into_args(self) -> Args {
    match self {
      Bundle::Single(v) => Args::positional([v]),
      Bundle::Ordered(values) => Args::positional(values),
      Bundle::Keyed(map) => Args {
        positional: Vec::new(),
        named: map,
      },
    }
  }

  /// True when this bundle matches the declared `shape`. Keyed bundles
  /// match on the key set; a dynamic shape admits anything.
  pub fn conforms_to(&self, shape: &OutputShape) -> bool {
    match (self, shape) {
      (_, OutputShape::Dynamic) => true,
      (Bundle::Single(_), OutputShape::Single) => true,
      (Bundle::Ordered(values), OutputShape::Ordered(k)) => values.len() == *k,
      (Bundle::Keyed(map), OutputShape::Keyed(keys)) => {
        map.len() == keys.len() && keys.iter().all(|k| map.contains_key(k))
      }
      _ => false,
    }
  }

  pub fn as_single(&self) -> Option<&Value> {
    match self {
      Bundle::Single(v) => Some(v),
      _ => None,
    }
  }
}

impl From<Value> for Bundle {
  fn from(value: Value) -> Self {
    Bundle::Single(value)
  }
}

/// Statically known shape of a node's output, used to validate edges at
/// composition time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "shape", content = "detail")]
pub enum OutputShape {
  Single,
  Ordered(usize),
  Keyed(Vec<String>),
  /// Only known once the node runs.
  Dynamic,
}

impl OutputShape {
  pub fn is_static(&self) -> bool {
    !matches!(self, OutputShape::Dynamic)
  }

  /// Number of values the shape delivers to a consumer.
  pub fn arity(&self) -> Option<usize> {
    match self {
      OutputShape::Single => Some(1),
      OutputShape::Ordered(k) => Some(*k),
      OutputShape::Keyed(keys) => Some(keys.len()),
      OutputShape::Dynamic => None,
    }
  }
}
