//! Tests for `inspect`.

use crate::computation::{Computation, FnUnit};
use crate::error::{BoxError, GraphError};
use crate::inspector::inspect;
use crate::types::{Bundle, CallArgs, Signature};

fn noop(sig: Signature) -> FnUnit {
  FnUnit::new("u", sig, |_| Ok(Bundle::single(0)))
}

struct Opaque;

impl Computation for Opaque {
  fn name(&self) -> &str {
    "opaque"
  }

  fn signature(&self) -> Option<&Signature> {
    None
  }

  fn call(&self, _args: CallArgs) -> Result<Bundle, BoxError> {
    Ok(Bundle::single(0))
  }
}

#[test]
fn ordered_required_names_and_flags() {
  let d = inspect(&noop(
    Signature::new()
      .param("a")
      .param("b")
      .optional("c")
      .variadic_positional("xs")
      .variadic_named("kw"),
  ))
  .unwrap();
  assert_eq!(d.names, vec!["a", "b", "c"]);
  assert_eq!(d.required, vec!["a", "b"]);
  assert!(d.has_variadic_positional);
  assert!(d.has_variadic_named);
}

#[test]
fn empty_signature_is_nullary() {
  let d = inspect(&noop(Signature::new())).unwrap();
  assert!(d.is_nullary());
}

#[test]
fn deterministic_for_same_unit() {
  let u = noop(Signature::positional(["x", "y"]));
  assert_eq!(inspect(&u).unwrap(), inspect(&u).unwrap());
}

#[test]
fn missing_signature_is_uninspectable() {
  let err = inspect(&Opaque).unwrap_err();
  assert!(matches!(err, GraphError::UninspectableUnit { ref unit, .. } if unit == "opaque"));
}

#[test]
fn duplicate_name_is_uninspectable() {
  let err = inspect(&noop(Signature::positional(["a", "a"]))).unwrap_err();
  assert!(matches!(err, GraphError::UninspectableUnit { .. }));
}

#[test]
fn collector_clashing_with_param_is_uninspectable() {
  let err = inspect(&noop(Signature::new().param("a").variadic_named("a"))).unwrap_err();
  assert!(matches!(err, GraphError::UninspectableUnit { .. }));
}

#[test]
fn empty_name_is_uninspectable() {
  assert!(inspect(&noop(Signature::new().param(" "))).is_err());
}

#[test]
fn required_after_optional_is_uninspectable() {
  assert!(inspect(&noop(Signature::new().optional("a").param("b"))).is_err());
}

#[test]
fn twice_declared_collector_is_uninspectable() {
  let sig = Signature::new()
    .variadic_named("kw")
    .variadic_named("more");
  assert!(inspect(&noop(sig)).is_err());
}
