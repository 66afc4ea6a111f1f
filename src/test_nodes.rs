//! Small arithmetic nodes shared by unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::nodes::{FunctionNode, node};
use crate::types::{Bundle, Signature};

pub(crate) fn add() -> FunctionNode {
  node("add", Signature::positional(["a", "b"]), |args| {
    Ok(Bundle::single(args.f64("a")? + args.f64("b")?))
  })
  .unwrap()
}

pub(crate) fn divide() -> FunctionNode {
  node("divide", Signature::positional(["a", "b"]), |args| {
    Ok(Bundle::single(args.f64("a")? / args.f64("b")?))
  })
  .unwrap()
}

pub(crate) fn multiply() -> FunctionNode {
  node("multiply", Signature::positional(["a", "b"]), |args| {
    Ok(Bundle::single(args.f64("a")? * args.f64("b")?))
  })
  .unwrap()
}

pub(crate) fn plus(n: i64) -> FunctionNode {
  node(format!("plus_{}", n), Signature::positional(["x"]), move |args| {
    Ok(Bundle::single(args.i64("x")? + n))
  })
  .unwrap()
}

/// Node returning `value` and counting its calls.
pub(crate) fn counted(name: &str, value: i64, calls: Arc<AtomicUsize>) -> FunctionNode {
  node(name, Signature::new(), move |_| {
    calls.fetch_add(1, Ordering::SeqCst);
    Ok(Bundle::single(value))
  })
  .unwrap()
}
