//! Parallel layer: members share one input and run independently.

use std::collections::HashSet;
use std::fmt;

use crate::error::{GraphError, Result};
use crate::types::NodeId;

use super::Node;

/// Members of a layer, list- or mapping-shaped.
#[derive(Clone, Debug)]
pub enum LayerMembers {
  List(Vec<Node>),
  Keyed(Vec<(String, Node)>),
}

impl LayerMembers {
  pub fn len(&self) -> usize {
    match self {
      LayerMembers::List(nodes) => nodes.len(),
      LayerMembers::Keyed(entries) => entries.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Members in declaration order.
  pub fn iter(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
    match self {
      LayerMembers::List(nodes) => Box::new(nodes.iter()),
      LayerMembers::Keyed(entries) => Box::new(entries.iter().map(|(_, n)| n)),
    }
  }

  /// Keys in declaration order; `None` for list-shaped members.
  pub fn keys(&self) -> Option<Vec<String>> {
    match self {
      LayerMembers::List(_) => None,
      LayerMembers::Keyed(entries) => Some(entries.iter().map(|(k, _)| k.clone()).collect()),
    }
  }

  fn map_nodes(self, f: impl Fn(Node) -> Node) -> Self {
    match self {
      LayerMembers::List(nodes) => LayerMembers::List(nodes.into_iter().map(f).collect()),
      LayerMembers::Keyed(entries) => {
        LayerMembers::Keyed(entries.into_iter().map(|(k, n)| (k, f(n))).collect())
      }
    }
  }
}

#[derive(Clone)]
pub struct Layer {
  pub(crate) id: NodeId,
  pub(crate) name: String,
  pub(crate) description: Option<String>,
  pub(crate) members: LayerMembers,
}

impl Layer {
  /// List-shaped layer; the output keeps member order.
  pub fn list<I, N>(members: I) -> Result<Self>
  where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
  {
    Self::from_members(LayerMembers::List(
      members.into_iter().map(Into::into).collect(),
    ))
  }

  /// Mapping-shaped layer; the output keeps the declared keys.
  pub fn keyed<I, K, N>(members: I) -> Result<Self>
  where
    I: IntoIterator<Item = (K, N)>,
    K: Into<String>,
    N: Into<Node>,
  {
    let entries: Vec<(String, Node)> = members
      .into_iter()
      .map(|(k, n)| (k.into(), n.into()))
      .collect();
    let mut seen = HashSet::new();
    if let Some((dup, _)) = entries.iter().find(|(k, _)| !seen.insert(k.as_str())) {
      return Err(GraphError::InvalidComposition(format!(
        "layer key '{}' is declared twice",
        dup
      )));
    }
    Self::from_members(LayerMembers::Keyed(entries))
  }

  fn from_members(members: LayerMembers) -> Result<Self> {
    if members.is_empty() {
      return Err(GraphError::InvalidComposition(
        "a layer needs at least one member".to_string(),
      ));
    }
    Ok(Self {
      id: NodeId::fresh(),
      name: "Layer".to_string(),
      description: None,
      members: members.map_nodes(Node::reidentified),
    })
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn id(&self) -> NodeId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn members(&self) -> &LayerMembers {
    &self.members
  }

  pub fn is_keyed(&self) -> bool {
    matches!(self.members, LayerMembers::Keyed(_))
  }

  pub(crate) fn reidentify_members(self) -> Self {
    Self {
      id: NodeId::fresh(),
      members: self.members.map_nodes(Node::reidentified),
      ..self
    }
  }
}

impl fmt::Debug for Layer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Layer")
      .field("id", &self.id)
      .field("name", &self.name)
      .field("members", &self.members)
      .finish_non_exhaustive()
  }
}
