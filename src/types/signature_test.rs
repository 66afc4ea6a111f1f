//! Tests for `Signature` and `ParameterDescriptor`.

use super::{ParameterDescriptor, Signature};

#[test]
fn positional_builds_required_params_in_order() {
  let sig = Signature::positional(["a", "b"]);
  let names: Vec<_> = sig.params.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["a", "b"]);
  assert!(sig.params.iter().all(|p| p.required));
}

#[test]
fn optional_and_collectors() {
  let sig = Signature::new()
    .param("x")
    .optional("y")
    .variadic_positional("rest")
    .variadic_named("kw");
  assert!(!sig.params[1].required);
  assert_eq!(sig.variadic_positional.as_deref(), Some("rest"));
  assert_eq!(sig.variadic_named.as_deref(), Some("kw"));
  assert!(!sig.duplicate_collector);
}

#[test]
fn second_collector_is_flagged() {
  let sig = Signature::new()
    .variadic_positional("a")
    .variadic_positional("b");
  assert!(sig.duplicate_collector);
}

#[test]
fn descriptor_nullary_and_open() {
  assert!(ParameterDescriptor::default().is_nullary());
  let open = ParameterDescriptor::open();
  assert!(!open.is_nullary());
  assert!(open.has_variadic_positional && open.has_variadic_named);
}
