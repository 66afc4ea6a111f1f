//! Builds a small arithmetic graph, runs it and prints its structure.
//!
//! ```text
//! RUST_LOG=debug cargo run --example arithmetic
//! ```
//!
//! Worker count and the loop cap can be set with `STREAMWEAVE_CHAIN_WORKERS`
//! and `STREAMWEAVE_CHAIN_MAX_LOOP_ITERATIONS`.

use streamweave_chain::{
  Args, Bundle, Compose, ExecutionOptions, LoopNode, Signature, export, node, unit,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::CLOSE)
    .init();

  let options = ExecutionOptions::from_env()?;
  info!(workers = options.workers, "arithmetic demo starting");

  let add = node("add", Signature::positional(["a", "b"]), |a| {
    Ok(Bundle::single(a.f64("a")? + a.f64("b")?))
  })?
  .with_description("a + b");
  let divide = node("divide", Signature::positional(["a", "b"]), |a| {
    Ok(Bundle::single(a.f64("a")? / a.f64("b")?))
  })?;
  let multiply = node("multiply", Signature::positional(["a", "b"]), |a| {
    Ok(Bundle::single(a.f64("a")? * a.f64("b")?))
  })?;

  // (a + b) * (a / b)
  let graph = vec![add, divide].then(multiply)?;
  let out = graph
    .invoke_with(Args::named([("a", 6), ("b", 3)]), &options)
    .await?;
  println!("[add, divide] -> multiply on (a=6, b=3): {}", out.into_value());

  let grow = node("grow", Signature::positional(["x"]), |a| {
    Ok(Bundle::single(a.i64("x")? + 7))
  })?;
  let big_enough = unit("big_enough", Signature::positional(["x"]), |a| {
    Ok(Bundle::single(a.i64("x")? >= 100))
  });
  let until_big = LoopNode::new(big_enough, grow)?;
  let looped = streamweave_chain::Node::from(until_big)
    .invoke_with(Args::positional([3]), &options)
    .await?;
  println!("grow by 7 from 3 until >= 100: {}", looped.into_value());

  println!("{}", export(&graph).to_json()?);
  Ok(())
}
