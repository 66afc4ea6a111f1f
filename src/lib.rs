//! # streamweave-chain
//!
//! Compose computation nodes into directed graphs and run them.
//!
//! ## Architecture
//!
//! - [inspector]: reads the declared parameters of a computation unit.
//! - [nodes]: the node variants (function, conditional, loop, chain, layer).
//! - [compose]: `then` / `preceded_by`, flattening chains and wrapping
//!   collections into parallel layers.
//! - [binder]: maps a producer's output onto a consumer's parameters, eagerly
//!   at composition time where shapes are known.
//! - [runner]: executes a composed graph; layers fan out on tokio tasks.
//! - [export]: read-only structure for diagram renderers.
//!
//! ```
//! use streamweave_chain::{Args, Bundle, Compose, Signature, node};
//!
//! # tokio_test::block_on(async {
//! let add = node("add", Signature::positional(["a", "b"]), |a| {
//!   Ok(Bundle::single(a.f64("a")? + a.f64("b")?))
//! })?;
//! let double = node("double", Signature::positional(["x"]), |a| {
//!   Ok(Bundle::single(a.f64("x")? * 2.0))
//! })?;
//! let graph = add.then(double)?;
//! let out = graph.invoke(Args::named([("a", 1.0), ("b", 2.0)])).await?;
//! assert_eq!(out, Bundle::single(6.0));
//! # Ok::<(), streamweave_chain::GraphError>(())
//! # }).unwrap();
//! ```

pub mod binder;
pub mod compose;
pub mod computation;
pub mod error;
pub mod export;
pub mod inspector;
#[cfg(test)]
mod inspector_test;
pub mod nodes;
pub mod options;
pub mod runner;
#[cfg(test)]
mod test_nodes;
pub mod types;

pub use compose::{Compose, Composable};
pub use computation::{Computation, FnUnit, Unit, unit};
pub use error::{BoxError, GraphError, Result};
pub use export::{GraphExport, export};
pub use inspector::inspect;
pub use nodes::{Chain, ConditionalNode, FunctionNode, Layer, LoopNode, Node, conditional, node};
pub use options::ExecutionOptions;
pub use types::{
  Args, Bundle, CallArgs, EdgeKind, NodeId, NodeKind, OutputShape, ParameterDescriptor, Signature,
};
