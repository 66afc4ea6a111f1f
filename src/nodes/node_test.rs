//! Tests for the `Node` operations shared by every variant.

use std::collections::HashSet;

use crate::compose::Compose;
use crate::computation::unit;
use crate::nodes::{ConditionalNode, Layer, Node};
use crate::test_nodes::{add, plus};
use crate::types::{Bundle, NodeKind, OutputShape, Signature};

fn always() -> crate::computation::Unit {
  unit("always", Signature::positional(["x"]), |_| Ok(Bundle::single(true)))
}

#[test]
fn display_shows_metadata() {
  let n: Node = add().with_description("sum").into();
  let shown = n.to_string();
  assert!(shown.starts_with("Node({"));
  assert!(shown.contains("\"name\":\"add\""));
  assert!(shown.contains("\"description\":\"sum\""));
  assert!(shown.contains("\"args\":[\"a\",\"b\"]"));

  let l: Node = Layer::list([plus(1)]).unwrap().into();
  let shown = l.to_string();
  assert!(shown.starts_with("Layer({"));
  assert!(!shown.contains("args"));
}

#[test]
fn label_names_node_and_id() {
  let n: Node = plus(4).into();
  assert_eq!(n.label(), format!("'plus_4' ({})", n.id()));
}

#[test]
fn conditional_shape_follows_branches() {
  let same: Node = ConditionalNode::new(always(), plus(1), plus(2)).unwrap().into();
  assert_eq!(same.output_shape(), OutputShape::Single);
  let mixed: Node = ConditionalNode::new(
    always(),
    Node::from(plus(1)),
    Node::from(Layer::list([plus(1), plus(2)]).unwrap()),
  )
  .unwrap()
  .into();
  assert_eq!(mixed.output_shape(), OutputShape::Dynamic);
  assert_eq!(mixed.kind(), NodeKind::Conditional);
}

#[test]
fn reidentified_replaces_every_id() {
  let g = plus(0)
    .then(vec![plus(1), plus(2)])
    .unwrap()
    .then(add())
    .unwrap();
  let mut before = HashSet::new();
  g.walk(&mut |n| {
    before.insert(n.id());
  });
  let copy = g.clone().reidentified();
  let mut after = HashSet::new();
  copy.walk(&mut |n| {
    after.insert(n.id());
  });
  assert_eq!(before.len(), 6);
  assert_eq!(after.len(), 6);
  assert!(before.is_disjoint(&after));
}

#[test]
fn nullary_detection() {
  let nullary: Node = crate::nodes::node("k", Signature::new(), |_| Ok(Bundle::single(1)))
    .unwrap()
    .into();
  assert!(nullary.accepts_nothing());
  assert!(!Node::from(plus(1)).accepts_nothing());
}
