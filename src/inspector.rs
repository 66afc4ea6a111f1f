//! Signature inspection: turns a unit's declared parameters into a [ParameterDescriptor].

use std::collections::HashSet;

use tracing::instrument;

use crate::computation::Computation;
use crate::error::{GraphError, Result};
use crate::types::ParameterDescriptor;

/// Extracts the ordered parameter names, the required subset and the collector
/// flags of `unit`.
///
/// Fails with [GraphError::UninspectableUnit] when the unit exposes no
/// signature or the signature is malformed (empty or duplicate names, a
/// required parameter after an optional one, a collector declared twice).
#[instrument(level = "trace", skip(unit), fields(unit = unit.name()))]
pub fn inspect(unit: &dyn Computation) -> Result<ParameterDescriptor> {
  let fail = |reason: String| GraphError::UninspectableUnit {
    unit: unit.name().to_string(),
    reason,
  };

  let sig = unit
    .signature()
    .ok_or_else(|| fail("parameter list is not available".to_string()))?;

  if sig.duplicate_collector {
    return Err(fail("a variadic collector is declared twice".to_string()));
  }

  let mut seen = HashSet::new();
  let mut optional_seen = false;
  let mut names = Vec::with_capacity(sig.params.len());
  let mut required = Vec::new();

  let collectors = sig
    .variadic_positional
    .iter()
    .chain(sig.variadic_named.iter());
  for name in sig.params.iter().map(|p| &p.name).chain(collectors) {
    if name.trim().is_empty() {
      return Err(fail("parameter name is empty".to_string()));
    }
    if !seen.insert(name.as_str()) {
      return Err(fail(format!("parameter '{}' is declared twice", name)));
    }
  }

  for p in &sig.params {
    if p.required {
      if optional_seen {
        return Err(fail(format!(
          "required parameter '{}' follows an optional one",
          p.name
        )));
      }
      required.push(p.name.clone());
    } else {
      optional_seen = true;
    }
    names.push(p.name.clone());
  }

  Ok(ParameterDescriptor {
    names,
    required,
    has_variadic_positional: sig.variadic_positional.is_some(),
    has_variadic_named: sig.variadic_named.is_some(),
  })
}
