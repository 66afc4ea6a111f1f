//! The `Node` sum type and the operations every variant supports.

use std::fmt;

use serde_json::json;

use crate::types::{NodeId, NodeKind, OutputShape, ParameterDescriptor};

use super::{Chain, ConditionalNode, FunctionNode, Layer, LayerMembers, LoopNode};

/// Any executable unit of a graph.
#[derive(Clone)]
pub enum Node {
  Function(FunctionNode),
  Conditional(ConditionalNode),
  Loop(LoopNode),
  Chain(Chain),
  Layer(Layer),
}

impl Node {
  pub fn id(&self) -> NodeId {
    match self {
      Node::Function(n) => n.id,
      Node::Conditional(n) => n.id,
      Node::Loop(n) => n.id,
      Node::Chain(n) => n.id,
      Node::Layer(n) => n.id,
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Node::Function(n) => &n.name,
      Node::Conditional(n) => &n.name,
      Node::Loop(n) => &n.name,
      Node::Chain(n) => &n.name,
      Node::Layer(n) => &n.name,
    }
  }

  pub fn description(&self) -> Option<&str> {
    match self {
      Node::Function(n) => n.description.as_deref(),
      Node::Conditional(n) => n.description.as_deref(),
      Node::Loop(n) => n.description.as_deref(),
      Node::Chain(n) => n.description.as_deref(),
      Node::Layer(n) => n.description.as_deref(),
    }
  }

  pub fn kind(&self) -> NodeKind {
    match self {
      Node::Function(_) => NodeKind::Function,
      Node::Conditional(_) => NodeKind::Conditional,
      Node::Loop(_) => NodeKind::Loop,
      Node::Chain(_) => NodeKind::Chain,
      Node::Layer(_) => NodeKind::Layer,
    }
  }

  /// Short human-readable reference used in error messages.
  pub fn label(&self) -> String {
    format!("'{}' ({})", self.name(), self.id())
  }

  /// Parameters the node binds its input against.
  ///
  /// Chains expose their first stage. Conditional and loop nodes expose
  /// their predicate. Layers accept anything: each member binds on its own.
  pub fn parameters(&self) -> ParameterDescriptor {
    match self {
      Node::Function(n) => n.params.clone(),
      Node::Conditional(n) => n.params.clone(),
      Node::Loop(n) => n.params.clone(),
      Node::Chain(n) => n
        .stages
        .first()
        .map(Node::parameters)
        .unwrap_or_default(),
      Node::Layer(_) => ParameterDescriptor::open(),
    }
  }

  /// Statically known output shape.
  pub fn output_shape(&self) -> OutputShape {
    match self {
      Node::Function(n) => n.returns.clone(),
      Node::Conditional(n) => {
        let t = n.true_node.output_shape();
        if t == n.false_node.output_shape() {
          t
        } else {
          OutputShape::Dynamic
        }
      }
      Node::Loop(_) => OutputShape::Dynamic,
      Node::Chain(n) => n
        .stages
        .last()
        .map(Node::output_shape)
        .unwrap_or(OutputShape::Dynamic),
      Node::Layer(n) => match &n.members {
        LayerMembers::List(nodes) => OutputShape::Ordered(nodes.len()),
        LayerMembers::Keyed(entries) => {
          OutputShape::Keyed(entries.iter().map(|(k, _)| k.clone()).collect())
        }
      },
    }
  }

  /// True when the node takes no input at all, so a branch can ignore the
  /// value that reached it.
  pub fn accepts_nothing(&self) -> bool {
    match self {
      Node::Layer(n) => n.members.iter().all(Node::accepts_nothing),
      _ => self.parameters().is_nullary(),
    }
  }

  /// Direct children, in declaration order.
  pub fn children(&self) -> Vec<&Node> {
    match self {
      Node::Function(_) => Vec::new(),
      Node::Conditional(n) => vec![n.true_node.as_ref(), n.false_node.as_ref()],
      Node::Loop(n) => vec![n.body.as_ref()],
      Node::Chain(n) => n.stages.iter().collect(),
      Node::Layer(n) => n.members.iter().collect(),
    }
  }

  /// Copy of this node in which every occurrence, nested ones included,
  /// carries a fresh identity. Computations stay shared.
  pub fn reidentified(self) -> Node {
    match self {
      Node::Function(n) => Node::Function(FunctionNode {
        id: NodeId::fresh(),
        ..n
      }),
      Node::Conditional(n) => Node::Conditional(ConditionalNode {
        id: NodeId::fresh(),
        true_node: Box::new(n.true_node.reidentified()),
        false_node: Box::new(n.false_node.reidentified()),
        ..n
      }),
      Node::Loop(n) => Node::Loop(LoopNode {
        id: NodeId::fresh(),
        body: Box::new(n.body.reidentified()),
        ..n
      }),
      Node::Chain(n) => Node::Chain(Chain {
        id: NodeId::fresh(),
        stages: n.stages.into_iter().map(Node::reidentified).collect(),
        ..n
      }),
      Node::Layer(n) => Node::Layer(n.reidentify_members()),
    }
  }

  /// Visits this node and all descendants, depth first.
  pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
    visit(self);
    for child in self.children() {
      child.walk(visit);
    }
  }
}

impl fmt::Display for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut repr = json!({
      "id": self.id().to_string(),
      "name": self.name(),
      "description": self.description(),
    });
    if matches!(
      self,
      Node::Function(_) | Node::Conditional(_) | Node::Loop(_)
    ) {
      repr["args"] = json!(self.parameters().names);
    }
    let kind = match self.kind() {
      NodeKind::Function => "Node",
      NodeKind::Conditional => "ConditionalNode",
      NodeKind::Loop => "LoopNode",
      NodeKind::Chain => "Chain",
      NodeKind::Layer => "Layer",
    };
    write!(f, "{}({})", kind, repr)
  }
}

impl fmt::Debug for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}

impl From<FunctionNode> for Node {
  fn from(n: FunctionNode) -> Self {
    Node::Function(n)
  }
}

impl From<ConditionalNode> for Node {
  fn from(n: ConditionalNode) -> Self {
    Node::Conditional(n)
  }
}

impl From<LoopNode> for Node {
  fn from(n: LoopNode) -> Self {
    Node::Loop(n)
  }
}

impl From<Chain> for Node {
  fn from(n: Chain) -> Self {
    Node::Chain(n)
  }
}

impl From<Layer> for Node {
  fn from(n: Layer) -> Self {
    Node::Layer(n)
  }
}
