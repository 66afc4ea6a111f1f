//! Data types shared by the node model, the binder and the engine.
//!
//! Values flowing along edges are `serde_json::Value`s packed into [Bundle]s.

mod args;
mod bundle;
#[cfg(test)]
mod bundle_test;
mod kinds;
mod node_id;
mod signature;
#[cfg(test)]
mod signature_test;

pub use args::{Args, CallArgs};
pub use bundle::{Bundle, OutputShape};
pub use kinds::{EdgeKind, NodeKind};
pub use node_id::NodeId;
pub use signature::{Param, ParameterDescriptor, Signature};
