//! Composition algebra: forward (`then`) and backward (`preceded_by`) composition.
//!
//! Either operand may be a node, an ordered collection (a list-shaped layer)
//! or a name-keyed collection (a mapping-shaped layer). Chains are flattened;
//! layers stay single stages. Every new edge is bound before the result exists.

use tracing::{debug, instrument};

use crate::error::Result;
use crate::nodes::{Chain, ConditionalNode, FunctionNode, Layer, LoopNode, Node};

/// An operand of the composition operators.
pub enum Composable {
  Node(Node),
  List(Vec<Node>),
  Keyed(Vec<(String, Node)>),
}

impl Composable {
  /// Resolves collections into layers.
  pub fn into_node(self) -> Result<Node> {
    match self {
      Composable::Node(n) => Ok(n),
      Composable::List(nodes) => Layer::list(nodes).map(Node::Layer),
      Composable::Keyed(entries) => Layer::keyed(entries).map(Node::Layer),
    }
  }
}

/// Forward and backward composition for anything that can become a node.
pub trait Compose: Into<Composable> + Sized {
  /// `self -> next`: appends `next` after the last stage of `self`.
  fn then(self, next: impl Into<Composable>) -> Result<Node> {
    compose(self.into(), next.into())
  }

  /// `self <- prev`: inserts `prev` before the first stage of `self`.
  /// `a.preceded_by(b)` builds the same graph as `b.then(a)`.
  fn preceded_by(self, prev: impl Into<Composable>) -> Result<Node> {
    compose(prev.into(), self.into())
  }
}

impl<T: Into<Composable>> Compose for T {}

#[instrument(level = "trace", skip_all)]
fn compose(first: Composable, second: Composable) -> Result<Node> {
  let first = first.into_node()?;
  let second = second.into_node()?;
  debug!(
    producer = %first.id(),
    consumer = %second.id(),
    "composing"
  );
  Chain::new([first, second]).map(Node::Chain)
}

impl From<Node> for Composable {
  fn from(n: Node) -> Self {
    Composable::Node(n)
  }
}

impl From<FunctionNode> for Composable {
  fn from(n: FunctionNode) -> Self {
    Composable::Node(n.into())
  }
}

impl From<ConditionalNode> for Composable {
  fn from(n: ConditionalNode) -> Self {
    Composable::Node(n.into())
  }
}

impl From<LoopNode> for Composable {
  fn from(n: LoopNode) -> Self {
    Composable::Node(n.into())
  }
}

impl From<Chain> for Composable {
  fn from(n: Chain) -> Self {
    Composable::Node(n.into())
  }
}

impl From<Layer> for Composable {
  fn from(n: Layer) -> Self {
    Composable::Node(n.into())
  }
}

impl From<Vec<Node>> for Composable {
  fn from(nodes: Vec<Node>) -> Self {
    Composable::List(nodes)
  }
}

impl From<Vec<FunctionNode>> for Composable {
  fn from(nodes: Vec<FunctionNode>) -> Self {
    Composable::List(nodes.into_iter().map(Node::from).collect())
  }
}

impl From<Vec<(String, Node)>> for Composable {
  fn from(entries: Vec<(String, Node)>) -> Self {
    Composable::Keyed(entries)
  }
}

impl From<Vec<(&str, Node)>> for Composable {
  fn from(entries: Vec<(&str, Node)>) -> Self {
    Composable::Keyed(
      entries
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect(),
    )
  }
}
