//! Execution engine: walks a composed graph for one invocation.
//!
//! - Chains run their stages strictly in order.
//! - Layers fan out to a bounded set of tokio tasks and join in declaration order.
//! - Computation units are synchronous and always run on the blocking pool.
//! - Conditional nodes run the predicate, then only the selected branch.
//! - Loop nodes are pre-test loops over their body.
//!
//! Nothing is shared between invocations except the immutable graph, so one
//! graph may be invoked concurrently from several callers.

use std::any::Any;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{Instrument, debug, info, instrument, warn};

use crate::binder::bind;
use crate::computation::Unit;
use crate::error::{BoxError, GraphError, Result};
use crate::nodes::{Chain, ConditionalNode, FunctionNode, Layer, LayerMembers, LoopNode, Node};
use crate::options::ExecutionOptions;
use crate::types::{Args, Bundle, CallArgs, NodeId, ParameterDescriptor};

/// Producer label used for the arguments of the outermost call.
pub const INVOCATION: &str = "invocation";

impl Node {
  /// Runs the graph on `args` with default [ExecutionOptions].
  pub async fn invoke(&self, args: Args) -> Result<Bundle> {
    self.invoke_with(args, &ExecutionOptions::default()).await
  }

  /// Runs the graph on `args`.
  #[instrument(level = "trace", skip_all, fields(root = %self.id(), name = %self.name()))]
  pub async fn invoke_with(&self, args: Args, options: &ExecutionOptions) -> Result<Bundle> {
    let ctx = Arc::new(options.clone());
    let result = evaluate(self, args, INVOCATION.to_string(), &ctx).await;
    if let Err(ref e) = result {
      warn!(error = %e, "invocation failed");
    }
    result
  }
}

fn evaluate<'a>(
  node: &'a Node,
  args: Args,
  producer: String,
  ctx: &'a Arc<ExecutionOptions>,
) -> BoxFuture<'a, Result<Bundle>> {
  async move {
    match node {
      Node::Function(n) => run_function(n, args, &producer).await,
      Node::Chain(n) => run_chain(n, args, producer, ctx).await,
      Node::Layer(n) => run_layer(n, args, producer, ctx).await,
      Node::Conditional(n) => run_conditional(n, args, &producer, ctx).await,
      Node::Loop(n) => run_loop(n, args, producer, ctx).await,
    }
  }
  .boxed()
}

fn bind_for(
  args: Args,
  params: &ParameterDescriptor,
  producer: &str,
  consumer: impl FnOnce() -> String,
) -> Result<CallArgs> {
  bind(args, params).map_err(|m| m.into_error(producer, consumer()))
}

/// Runs `unit` on the blocking pool. A unit error or panic is attributed to `node`.
async fn call_unit(unit: &Unit, call: CallArgs, node: NodeId, name: &str) -> Result<Bundle> {
  let unit = Arc::clone(unit);
  let failed = |source: BoxError| GraphError::NodeExecution {
    node,
    name: name.to_string(),
    source,
  };
  match tokio::task::spawn_blocking(move || unit.call(call)).await {
    Ok(result) => result.map_err(failed),
    Err(e) if e.is_panic() => Err(failed(panic_message(e.into_panic()).into())),
    Err(e) => Err(failed(e.to_string().into())),
  }
}

async fn run_function(n: &FunctionNode, args: Args, producer: &str) -> Result<Bundle> {
  info!(node_id = %n.id, name = %n.name, "start node");
  let call = bind_for(args, &n.params, producer, || {
    format!("'{}' ({})", n.name, n.id)
  })?;
  let bound: Vec<&String> = call.params.keys().collect();
  debug!(node_id = %n.id, params = ?bound, "bound arguments");
  let out = call_unit(&n.unit, call, n.id, &n.name).await?;
  if !out.conforms_to(&n.returns) {
    return Err(GraphError::NodeExecution {
      node: n.id,
      name: n.name.clone(),
      source: format!(
        "returned a {:?} value but declares {:?}",
        out.shape(),
        n.returns
      )
      .into(),
    });
  }
  info!(node_id = %n.id, name = %n.name, "end node");
  Ok(out)
}

async fn run_chain(
  n: &Chain,
  args: Args,
  producer: String,
  ctx: &Arc<ExecutionOptions>,
) -> Result<Bundle> {
  let mut stages = n.stages.iter();
  let first = stages.next().ok_or_else(|| {
    GraphError::InvalidComposition(format!("chain '{}' ({}) has no stages", n.name, n.id))
  })?;
  let mut out = evaluate(first, args, producer, ctx).await?;
  let mut previous = first;
  for stage in stages {
    out = evaluate(stage, out.into_args(), previous.label(), ctx).await?;
    previous = stage;
  }
  Ok(out)
}

/// Evaluates a predicate and requires a boolean answer.
async fn check_predicate(
  predicate: &Unit,
  call: CallArgs,
  node: NodeId,
  name: &str,
) -> Result<bool> {
  let out = call_unit(predicate, call, node, name).await?;
  match out.as_single() {
    Some(Value::Bool(b)) => Ok(*b),
    _ => Err(GraphError::Predicate {
      node,
      name: name.to_string(),
      found: out.into_value().to_string(),
    }),
  }
}

async fn run_conditional(
  n: &ConditionalNode,
  args: Args,
  producer: &str,
  ctx: &Arc<ExecutionOptions>,
) -> Result<Bundle> {
  info!(node_id = %n.id, name = %n.name, "start conditional node");
  let call = bind_for(args.clone(), &n.params, producer, || {
    format!("'{}' ({})", n.name, n.id)
  })?;
  let verdict = check_predicate(&n.predicate, call, n.id, &n.name).await?;
  let branch = if verdict {
    n.true_node.as_ref()
  } else {
    n.false_node.as_ref()
  };
  debug!(node_id = %n.id, verdict, branch = %branch.id(), "selected branch");
  let branch_args = if branch.accepts_nothing() {
    Args::new()
  } else {
    args
  };
  let out = evaluate(branch, branch_args, format!("'{}' ({})", n.name, n.id), ctx).await?;
  info!(node_id = %n.id, name = %n.name, "end conditional node");
  Ok(out)
}

/// Packs the loop's incoming arguments as its current value.
fn loop_value(args: Args, n: &LoopNode, producer: &str) -> Result<Bundle> {
  let Args { positional, named } = args;
  match (positional.len(), named.is_empty()) {
    (1, true) => Ok(Bundle::Single(positional.into_iter().next().unwrap_or(Value::Null))),
    (_, true) => Ok(Bundle::Ordered(positional)),
    (0, false) => Ok(Bundle::Keyed(named)),
    (p, false) => Err(GraphError::Binding {
      producer: producer.to_string(),
      consumer: format!("'{}' ({})", n.name, n.id),
      expected: n.params.required.len(),
      actual: p + named.len(),
      reason: "a loop value cannot mix positional and named arguments".to_string(),
    }),
  }
}

async fn run_loop(
  n: &LoopNode,
  args: Args,
  producer: String,
  ctx: &Arc<ExecutionOptions>,
) -> Result<Bundle> {
  info!(node_id = %n.id, name = %n.name, "start loop node");
  let limit = n.max_iterations.or(ctx.max_loop_iterations);
  let consumer = || format!("'{}' ({})", n.name, n.id);
  let mut value = loop_value(args, n, &producer)?;
  let mut producer = producer;
  let mut iterations: u64 = 0;
  loop {
    let call = bind_for(value.clone().into_args(), &n.params, &producer, consumer)?;
    if check_predicate(&n.predicate, call, n.id, &n.name).await? {
      info!(node_id = %n.id, name = %n.name, iterations, "end loop node");
      return Ok(value);
    }
    if let Some(limit) = limit
      && iterations >= limit
    {
      return Err(GraphError::IterationLimit {
        node: n.id,
        name: n.name.clone(),
        limit,
      });
    }
    iterations += 1;
    debug!(node_id = %n.id, iteration = iterations, "loop iterate");
    value = evaluate(&n.body, value.into_args(), consumer(), ctx).await?;
    producer = n.body.label();
  }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
  payload
    .downcast_ref::<&str>()
    .map(|s| s.to_string())
    .or_else(|| payload.downcast_ref::<String>().cloned())
    .unwrap_or_else(|| "unit panicked".to_string())
}

type MemberOutcome = (usize, Result<Bundle>);

/// Stores one joined member result; the first failure aborts the layer.
fn record(
  results: &mut [Option<Bundle>],
  joined: std::result::Result<MemberOutcome, JoinError>,
) -> Result<()> {
  let (idx, result) = joined.map_err(|e| GraphError::WorkerPool(e.to_string()))?;
  results[idx] = Some(result?);
  Ok(())
}

async fn run_layer(
  n: &Layer,
  args: Args,
  producer: String,
  ctx: &Arc<ExecutionOptions>,
) -> Result<Bundle> {
  let members: Vec<Node> = n.members.iter().cloned().collect();
  info!(node_id = %n.id, name = %n.name, members = members.len(), workers = ctx.workers, "start layer");

  let mut results: Vec<Option<Bundle>> = vec![None; members.len()];
  let mut set: JoinSet<MemberOutcome> = JoinSet::new();
  let outcome = dispatch(members, &args, &producer, ctx, &mut set, &mut results).await;
  if let Err(e) = outcome {
    warn!(node_id = %n.id, name = %n.name, error = %e, "layer aborted");
    set.abort_all();
    return Err(e);
  }

  let values = results
    .into_iter()
    .map(|r| {
      r.map(Bundle::into_value)
        .ok_or_else(|| GraphError::WorkerPool("a layer member produced no result".to_string()))
    })
    .collect::<Result<Vec<Value>>>()?;

  let out = match &n.members {
    LayerMembers::List(_) => Bundle::Ordered(values),
    LayerMembers::Keyed(entries) => Bundle::Keyed(
      entries
        .iter()
        .map(|(k, _)| k.clone())
        .zip(values)
        .collect::<Map<String, Value>>(),
    ),
  };
  info!(node_id = %n.id, name = %n.name, "end layer");
  Ok(out)
}

/// Spawns every member once a worker slot is free and joins them all.
/// Stops dispatching as soon as a finished member reports a failure.
async fn dispatch(
  members: Vec<Node>,
  args: &Args,
  producer: &str,
  ctx: &Arc<ExecutionOptions>,
  set: &mut JoinSet<MemberOutcome>,
  results: &mut [Option<Bundle>],
) -> Result<()> {
  let slots = Arc::new(Semaphore::new(ctx.workers.max(1)));
  for (idx, member) in members.into_iter().enumerate() {
    let permit = match slots.clone().try_acquire_owned() {
      Ok(permit) => permit,
      Err(_) => {
        if let Some(joined) = set.join_next().await {
          record(results, joined)?;
        }
        slots
          .clone()
          .acquire_owned()
          .await
          .map_err(|e| GraphError::WorkerPool(e.to_string()))?
      }
    };

    let member_args = args.clone();
    let producer = producer.to_string();
    let ctx = Arc::clone(ctx);
    set.spawn(
      async move {
        let _permit = permit;
        (idx, evaluate(&member, member_args, producer, &ctx).await)
      }
      .in_current_span(),
    );
  }

  while let Some(joined) = set.join_next().await {
    record(results, joined)?;
  }
  Ok(())
}
