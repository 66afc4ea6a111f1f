//! Argument binding: maps a producer's output onto a consumer's declared parameters.
//!
//! Named values are matched by name first; positional values then fill the
//! remaining declared names in order. Anything left over goes to the matching
//! variadic collector, or the binding fails.

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::nodes::Node;
use crate::types::{Args, CallArgs, OutputShape, ParameterDescriptor};

/// Why a producer's values do not fit a consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
  pub expected: usize,
  pub actual: usize,
  pub reason: String,
}

impl Mismatch {
  /// Attaches producer and consumer identities.
  pub fn into_error(self, producer: impl Into<String>, consumer: impl Into<String>) -> GraphError {
    GraphError::Binding {
      producer: producer.into(),
      consumer: consumer.into(),
      expected: self.expected,
      actual: self.actual,
      reason: self.reason,
    }
  }
}

/// Binds concrete arguments to `consumer`.
pub fn bind(args: Args, consumer: &ParameterDescriptor) -> std::result::Result<CallArgs, Mismatch> {
  let actual = args.len();
  let mismatch = |reason: String| Mismatch {
    expected: consumer.required.len(),
    actual,
    reason,
  };

  let Args { positional, mut named } = args;
  let mut positional = positional.into_iter();
  let mut call = CallArgs::default();

  for name in &consumer.names {
    if let Some(v) = named.remove(name) {
      call.params.insert(name.clone(), v);
    } else if let Some(v) = positional.next() {
      call.params.insert(name.clone(), v);
    }
  }

  let surplus: Vec<Value> = positional.collect();
  if !surplus.is_empty() {
    if !consumer.has_variadic_positional {
      return Err(mismatch(format!(
        "{} surplus positional value(s)",
        surplus.len()
      )));
    }
    call.rest = surplus;
  }

  if !named.is_empty() {
    if !consumer.has_variadic_named {
      let keys: Vec<&str> = named.keys().map(String::as_str).collect();
      return Err(mismatch(format!(
        "unexpected named argument(s) {}",
        keys.join(", ")
      )));
    }
    call.extra = named;
  }

  let missing: Vec<&str> = consumer
    .required
    .iter()
    .filter(|n| !call.params.contains_key(n.as_str()))
    .map(String::as_str)
    .collect();
  if !missing.is_empty() {
    return Err(mismatch(format!(
      "missing required argument(s) {}",
      missing.join(", ")
    )));
  }

  Ok(call)
}

/// Checks statically that an output of `shape` can be bound to `consumer`.
/// Dynamic shapes always pass; they are bound when the edge is traversed.
pub fn resolve(shape: &OutputShape, consumer: &ParameterDescriptor) -> std::result::Result<(), Mismatch> {
  let template = match shape {
    OutputShape::Single => Args::positional([Value::Null]),
    OutputShape::Ordered(k) => Args::positional(std::iter::repeat_n(Value::Null, *k)),
    OutputShape::Keyed(keys) => Args {
      positional: Vec::new(),
      named: keys
        .iter()
        .map(|k| (k.clone(), Value::Null))
        .collect::<Map<String, Value>>(),
    },
    OutputShape::Dynamic => return Ok(()),
  };
  bind(template, consumer).map(|_| ())
}

/// Validates the edge `producer -> consumer` at composition time.
///
/// Chains are checked at their first stage and layers at every member.
/// Conditional and loop nodes are checked at their predicate; their branches
/// and bodies are bound when the selected path runs.
#[instrument(level = "trace", skip_all, fields(producer = %producer.id(), consumer = %consumer.id()))]
pub fn check_edge(producer: &Node, consumer: &Node) -> Result<()> {
  let shape = producer.output_shape();
  if !shape.is_static() {
    debug!("producer shape is dynamic; binding deferred to run time");
    return Ok(());
  }
  check_shape(&shape, &producer.label(), consumer)
}

fn check_shape(shape: &OutputShape, producer: &str, consumer: &Node) -> Result<()> {
  match consumer {
    Node::Chain(chain) => match chain.stages.first() {
      Some(first) => check_shape(shape, producer, first),
      None => Ok(()),
    },
    Node::Layer(layer) => layer
      .members
      .iter()
      .try_for_each(|member| check_shape(shape, producer, member)),
    Node::Function(_) | Node::Conditional(_) | Node::Loop(_) => {
      resolve(shape, &consumer.parameters()).map_err(|m| m.into_error(producer, consumer.label()))
    }
  }
}
