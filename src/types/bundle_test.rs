//! Tests for `Bundle` and `OutputShape`.

use serde_json::json;

use super::{Args, Bundle, OutputShape};

#[test]
fn shape_of_each_variant() {
  assert_eq!(Bundle::single(1).shape(), OutputShape::Single);
  assert_eq!(Bundle::ordered([1, 2, 3]).shape(), OutputShape::Ordered(3));
  assert_eq!(
    Bundle::keyed([("p", 1), ("q", 2)]).shape(),
    OutputShape::Keyed(vec!["p".to_string(), "q".to_string()])
  );
}

#[test]
fn keyed_bundle_keeps_declaration_order() {
  let b = Bundle::keyed([("zeta", 1), ("alpha", 2), ("mid", 3)]);
  let keys: Vec<_> = match &b {
    Bundle::Keyed(m) => m.keys().cloned().collect(),
    _ => unreachable!(),
  };
  assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn into_value_folds_nested_bundles() {
  assert_eq!(Bundle::single("x").into_value(), json!("x"));
  assert_eq!(Bundle::ordered([1, 2]).into_value(), json!([1, 2]));
  assert_eq!(
    Bundle::keyed([("a", 1)]).into_value(),
    json!({ "a": 1 })
  );
}

#[test]
fn into_args_spreads_by_shape() {
  assert_eq!(Bundle::single(5).into_args(), Args::positional([5]));
  assert_eq!(Bundle::ordered([1, 2]).into_args(), Args::positional([1, 2]));
  assert_eq!(
    Bundle::keyed([("a", 1)]).into_args(),
    Args::named([("a", 1)])
  );
}

#[test]
fn single_array_stays_one_positional() {
  let args = Bundle::single(json!([1, 2, 3])).into_args();
  assert_eq!(args.positional.len(), 1);
}

#[test]
fn shape_arity() {
  assert_eq!(OutputShape::Single.arity(), Some(1));
  assert_eq!(OutputShape::Ordered(4).arity(), Some(4));
  assert_eq!(OutputShape::Dynamic.arity(), None);
  assert!(!OutputShape::Dynamic.is_static());
}

#[test]
fn bundle_serializes_untagged() {
  assert_eq!(serde_json::to_value(Bundle::ordered([9.0, 2.0])).unwrap(), json!([9.0, 2.0]));
}

#[test]
fn conformance_to_declared_shape() {
  assert!(Bundle::single(1).conforms_to(&OutputShape::Single));
  assert!(!Bundle::ordered([1, 1]).conforms_to(&OutputShape::Single));
  assert!(Bundle::ordered([1, 2]).conforms_to(&OutputShape::Ordered(2)));
  assert!(!Bundle::ordered([1, 2, 3]).conforms_to(&OutputShape::Ordered(2)));
  let keys = OutputShape::Keyed(vec!["p".to_string(), "q".to_string()]);
  assert!(Bundle::keyed([("q", 1), ("p", 2)]).conforms_to(&keys));
  assert!(!Bundle::keyed([("p", 1), ("r", 2)]).conforms_to(&keys));
  assert!(Bundle::ordered([1, 2, 3]).conforms_to(&OutputShape::Dynamic));
}

#[test]
fn as_single_only_for_single() {
  assert_eq!(Bundle::single(true).as_single(), Some(&json!(true)));
  assert_eq!(Bundle::ordered([true]).as_single(), None);
}
