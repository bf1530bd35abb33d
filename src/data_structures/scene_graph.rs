//! Scene graph of a sketch.
//!
//! A flat, append-only list of top-level nodes. Nodes are never removed, so a
//! [`NodeId`] stays valid for the lifetime of the graph and GPU mirrors can be
//! kept in sync by uploading only the nodes past the last synced length.

use crate::data_structures::{geometry::PlaneGeometry, instance::Instance, model::LoadedModel};

/// Index of a node inside its [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// A loaded model, drawn with its (flat) material.
    Model(LoadedModel),
    /// One horizontal strip of the line surface. `index` runs from the bottom strip up.
    Strip { index: usize, geometry: PlaneGeometry },
    /// A single full-screen quad.
    Quad(PlaneGeometry),
}

impl NodeKind {
    pub fn is_surface(&self) -> bool {
        matches!(self, NodeKind::Strip { .. } | NodeKind::Quad(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub label: String,
    pub transform: Instance,
    pub kind: NodeKind,
}

impl SceneNode {
    pub fn new(label: impl Into<String>, transform: Instance, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            transform,
            kind,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: SceneNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx), node))
    }

    /// Nodes added at or after position `from`.
    pub fn since(&self, from: usize) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.iter().skip(from)
    }

    pub fn surfaces(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.iter().filter(|(_, node)| node.kind.is_surface())
    }

    pub fn models(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.iter()
            .filter(|(_, node)| matches!(node.kind, NodeKind::Model(_)))
    }
}
