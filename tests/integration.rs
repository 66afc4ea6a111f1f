//! End-to-end scenarios through the public API only.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use streamweave_chain::{
  Args, Bundle, Compose, ConditionalNode, EdgeKind, ExecutionOptions, FunctionNode, GraphError,
  Layer, LoopNode, Node, NodeKind, Signature, conditional, export, node, unit,
};

fn binary(name: &str, op: fn(f64, f64) -> f64) -> FunctionNode {
  node(name, Signature::positional(["a", "b"]), move |a| {
    Ok(Bundle::single(op(a.f64("a")?, a.f64("b")?)))
  })
  .unwrap()
}

fn inc(by: i64) -> FunctionNode {
  node(format!("inc_{}", by), Signature::positional(["x"]), move |a| {
    Ok(Bundle::single(a.i64("x")? + by))
  })
  .unwrap()
}

#[tokio::test]
async fn layer_feeds_multiply() {
  let add = binary("add", |a, b| a + b);
  let divide = binary("divide", |a, b| a / b);
  let multiply = binary("multiply", |a, b| a * b);

  let forward = vec![add.clone(), divide.clone()].then(multiply.clone()).unwrap();
  let backward = multiply.preceded_by(vec![add, divide]).unwrap();

  for g in [&forward, &backward] {
    let out = g.invoke(Args::named([("a", 6), ("b", 3)])).await.unwrap();
    assert_eq!(out, Bundle::single(18.0));
  }
}

#[tokio::test]
async fn mismatched_edge_fails_before_anything_runs() {
  let calls = Arc::new(AtomicUsize::new(0));
  let c = calls.clone();
  let pair = node("pair", Signature::new(), move |_| {
    c.fetch_add(1, Ordering::SeqCst);
    Ok(Bundle::ordered([1, 2]))
  })
  .unwrap()
  .returning(streamweave_chain::OutputShape::Ordered(2));
  let err = pair.then(inc(1)).unwrap_err();
  match err {
    GraphError::Binding {
      expected, actual, ..
    } => {
      assert_eq!(expected, 1);
      assert_eq!(actual, 2);
    }
    other => panic!("unexpected error: {}", other),
  }
  assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn collatz_steps_with_branch_inside_loop() {
  // Counts Collatz steps for n, carrying (n, steps) as a mapping.
  let step = conditional(
    "even",
    Signature::positional(["n", "steps"]),
    |a| Ok(Bundle::single(a.i64("n")? % 2 == 0)),
    node("half", Signature::positional(["n", "steps"]), |a| {
      Ok(Bundle::keyed([
        ("n", a.i64("n")? / 2),
        ("steps", a.i64("steps")? + 1),
      ]))
    })
    .unwrap()
    .returning(streamweave_chain::OutputShape::Keyed(vec![
      "n".to_string(),
      "steps".to_string(),
    ])),
    node("triple", Signature::positional(["n", "steps"]), |a| {
      Ok(Bundle::keyed([
        ("n", 3 * a.i64("n")? + 1),
        ("steps", a.i64("steps")? + 1),
      ]))
    })
    .unwrap()
    .returning(streamweave_chain::OutputShape::Keyed(vec![
      "n".to_string(),
      "steps".to_string(),
    ])),
  )
  .unwrap();
  let reached_one = unit("reached_one", Signature::positional(["n", "steps"]), |a| {
    Ok(Bundle::single(a.i64("n")? == 1))
  });
  let collatz: Node = LoopNode::new(reached_one, step).unwrap().into();

  let out = collatz
    .invoke(Args::named([("n", 6), ("steps", 0)]))
    .await
    .unwrap();
  assert_eq!(out, Bundle::keyed([("n", 1), ("steps", 8)]));
}

#[tokio::test]
async fn branches_can_be_chains_and_layers() {
  let is_small = unit("is_small", Signature::positional(["x"]), |a| {
    Ok(Bundle::single(a.i64("x")? < 10))
  });
  let small_path = inc(1).then(inc(2)).unwrap();
  let big_path: Node = Layer::list([inc(0), inc(-10)]).unwrap().into();
  let g: Node = ConditionalNode::new(is_small, small_path, big_path)
    .unwrap()
    .into();

  assert_eq!(
    g.invoke(Args::positional([1])).await.unwrap(),
    Bundle::single(4)
  );
  assert_eq!(
    g.invoke(Args::positional([50])).await.unwrap(),
    Bundle::ordered([50, 40])
  );
}

#[tokio::test]
async fn options_from_lookup_drive_execution() {
  let opts = ExecutionOptions::from_lookup(|key| match key {
    "STREAMWEAVE_CHAIN_WORKERS" => Some("2".to_string()),
    "STREAMWEAVE_CHAIN_MAX_LOOP_ITERATIONS" => Some("3".to_string()),
    _ => None,
  })
  .unwrap();
  assert_eq!(opts.workers, 2);

  let never = unit("never", Signature::positional(["x"]), |_| {
    Ok(Bundle::single(false))
  });
  let l: Node = LoopNode::new(never, inc(1)).unwrap().into();
  let err = l
    .invoke_with(Args::positional([0]), &opts)
    .await
    .unwrap_err();
  assert!(matches!(err, GraphError::IterationLimit { limit: 3, .. }));
}

#[test]
fn export_describes_nested_structure() {
  let g = inc(0)
    .then(vec![("p", Node::from(inc(1))), ("q", Node::from(inc(2)))])
    .unwrap()
    .then(node("sum", Signature::positional(["p", "q"]), |a| {
      Ok(Bundle::single(a.i64("p")? + a.i64("q")?))
    })
    .unwrap())
    .unwrap();
  let ex = export(&g);
  let kinds: Vec<NodeKind> = ex.nodes.iter().map(|n| n.kind).collect();
  assert_eq!(
    kinds,
    vec![
      NodeKind::Chain,
      NodeKind::Function,
      NodeKind::Layer,
      NodeKind::Function,
      NodeKind::Function,
      NodeKind::Function,
    ]
  );
  assert_eq!(
    ex.edges
      .iter()
      .filter(|e| e.kind == EdgeKind::ParallelMember)
      .count(),
    2
  );
  let json: serde_json::Value = serde_json::from_str(&ex.to_json().unwrap()).unwrap();
  assert_eq!(json["nodes"][3]["key"], json!("p"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn graph_is_reusable_across_tasks() {
  let g = Arc::new(inc(1).then(vec![inc(1), inc(2)]).unwrap());
  let tasks: Vec<_> = (0..8i64)
    .map(|i| {
      let g = Arc::clone(&g);
      tokio::spawn(async move { (i, g.invoke(Args::positional([i])).await) })
    })
    .collect();
  for t in tasks {
    let (i, out) = t.await.unwrap();
    assert_eq!(out.unwrap(), Bundle::ordered([i + 2, i + 3]));
  }
}
