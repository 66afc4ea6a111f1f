//! Read-only structural view of a composed graph, for diagram renderers.
//!
//! Composite nodes (chains, layers, loops, conditionals) are exported next to
//! their children so renderers can draw nested subgraphs.

use serde::Serialize;
use tracing::instrument;

use crate::nodes::Node;
use crate::types::{EdgeKind, NodeId, NodeKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedNode {
  pub id: NodeId,
  pub label: String,
  pub description: Option<String>,
  pub kind: NodeKind,
  /// Enclosing composite, if any.
  pub parent: Option<NodeId>,
  /// Directly nested nodes, in declaration order.
  pub children: Vec<NodeId>,
  /// Key of this node inside a mapping-shaped layer.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedEdge {
  pub from: NodeId,
  pub to: NodeId,
  pub kind: EdgeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphExport {
  pub root: Option<NodeId>,
  pub nodes: Vec<ExportedNode>,
  pub edges: Vec<ExportedEdge>,
}

impl GraphExport {
  pub fn node(&self, id: NodeId) -> Option<&ExportedNode> {
    self.nodes.iter().find(|n| n.id == id)
  }

  /// Outgoing edges of `id`.
  pub fn edges_from(&self, id: NodeId) -> impl Iterator<Item = &ExportedEdge> {
    self.edges.iter().filter(move |e| e.from == id)
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(self)
  }
}

/// Exports `root` and everything nested under it.
#[instrument(level = "trace", skip_all, fields(root = %root.id()))]
pub fn export(root: &Node) -> GraphExport {
  let mut out = GraphExport {
    root: Some(root.id()),
    ..GraphExport::default()
  };
  visit(root, None, None, &mut out);
  out
}

fn visit(node: &Node, parent: Option<NodeId>, key: Option<String>, out: &mut GraphExport) {
  let id = node.id();
  out.nodes.push(ExportedNode {
    id,
    label: node.name().to_string(),
    description: node.description().map(str::to_string),
    kind: node.kind(),
    parent,
    children: node.children().iter().map(|c| c.id()).collect(),
    key,
  });

  let edge = |from: NodeId, to: NodeId, kind: EdgeKind| ExportedEdge { from, to, kind };
  match node {
    Node::Function(_) => {}
    Node::Chain(chain) => {
      for pair in chain.stages().windows(2) {
        out
          .edges
          .push(edge(pair[0].id(), pair[1].id(), EdgeKind::Sequential));
      }
      for stage in chain.stages() {
        visit(stage, Some(id), None, out);
      }
    }
    Node::Layer(layer) => {
      let keys = layer.members().keys();
      for (i, member) in layer.members().iter().enumerate() {
        out
          .edges
          .push(edge(id, member.id(), EdgeKind::ParallelMember));
        let key = keys.as_ref().map(|k| k[i].clone());
        visit(member, Some(id), key, out);
      }
    }
    Node::Conditional(cond) => {
      out
        .edges
        .push(edge(id, cond.true_node().id(), EdgeKind::ConditionalTrue));
      out
        .edges
        .push(edge(id, cond.false_node().id(), EdgeKind::ConditionalFalse));
      visit(cond.true_node(), Some(id), None, out);
      visit(cond.false_node(), Some(id), None, out);
    }
    Node::Loop(lp) => {
      out
        .edges
        .push(edge(id, lp.body().id(), EdgeKind::LoopEnter));
      out
        .edges
        .push(edge(lp.body().id(), id, EdgeKind::LoopIterate));
      visit(lp.body(), Some(id), None, out);
    }
  }
}
