//! The node model: a closed set of executable node variants.
//!
//! Leaves ([FunctionNode]) wrap one computation unit. [ConditionalNode] and
//! [LoopNode] wrap a predicate plus branch/body nodes. [Chain] and [Layer]
//! compose other nodes sequentially and in parallel.

mod chain;
mod conditional_node;
mod function_node;
mod layer;
mod loop_node;
mod node;
#[cfg(test)]
mod node_test;

pub use chain::Chain;
pub use conditional_node::{ConditionalNode, conditional};
pub use function_node::{FunctionNode, node};
pub use layer::{Layer, LayerMembers};
pub use loop_node::LoopNode;
pub use node::Node;
