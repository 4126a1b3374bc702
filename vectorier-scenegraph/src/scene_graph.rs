use std::ops::{Index, IndexMut};

use lyon_path::geom::euclid::{Point2D, Transform2D, UnknownUnit};
use lyon_path::geom::Angle;
use serde::{Deserialize, Serialize};

use crate::error::SceneGraphError;
use crate::layers::LayerNames;
use crate::node::{NodeId, NodeKind, SceneNode};

pub type NodeTransform = Transform2D<f32, UnknownUnit, UnknownUnit>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct NodeEntry {
    node: SceneNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeId>,
}

/// Position, accumulated rotation and accumulated (lossy) scale of a node
/// expressed in the local space of an ancestor frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: [f32; 2],
    pub rotation: f32,
    pub scale: [f32; 2],
}

/// Arena of scene nodes.
///
/// Nodes are addressed by [`NodeId`] and never removed, so ids stay valid for
/// the lifetime of the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    #[serde(default)]
    nodes: Vec<NodeEntry>,
    #[serde(default)]
    roots: Vec<NodeId>,
    #[serde(default)]
    pub layers: LayerNames,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layers(layers: LayerNames) -> Self {
        Self {
            layers,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_root(&mut self, node: SceneNode) -> NodeId {
        let id = self.push_entry(node, None);
        self.roots.push(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, node: SceneNode) -> Result<NodeId, SceneGraphError> {
        self.check(parent)?;
        let id = self.push_entry(node, Some(parent));
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn push_entry(&mut self, node: SceneNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeEntry {
            node,
            parent,
            children: Vec::new(),
        });
        id
    }

    fn check(&self, id: NodeId) -> Result<(), SceneGraphError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(SceneGraphError::UnknownNode(id))
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0).map(|entry| &entry.node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0).map(|entry| &mut entry.node)
    }

    pub fn node(&self, id: NodeId) -> Result<&SceneNode, SceneGraphError> {
        self.get(id).ok_or(SceneGraphError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, SceneGraphError> {
        self.get_mut(id).ok_or(SceneGraphError::UnknownNode(id))
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|entry| entry.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|entry| entry.children.as_slice())
            .unwrap_or_default()
    }

    /// Iterator over the strict ancestors of a node, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// All node ids in depth-first pre-order, roots in insertion order
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// First direct child with the given name
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|child| self[*child].name == name)
    }

    /// First node with the given name in depth-first order
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.depth_first()
            .into_iter()
            .find(|id| self[*id].name == name)
    }

    /// Whether the node and all of its ancestors are visible
    pub fn active_in_hierarchy(&self, id: NodeId) -> bool {
        match self.get(id) {
            Some(node) if node.visible => self.ancestors(id).all(|a| self[a].visible),
            _ => false,
        }
    }

    pub fn nearest_ancestor_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.ancestors(id).find(|a| self[*a].is_kind(kind))
    }

    pub fn has_ancestor_of_kind(&self, id: NodeId, kind: NodeKind) -> bool {
        self.nearest_ancestor_of_kind(id, kind).is_some()
    }

    /// Depth factor derived from the node's layer label
    pub fn depth_factor(&self, id: NodeId) -> f32 {
        self.layers
            .depth_factor(self.get(id).map(|node| node.layer).unwrap_or_default())
    }

    pub fn local_transform(&self, id: NodeId) -> NodeTransform {
        match self.get(id) {
            Some(node) => local_transform(node),
            None => NodeTransform::identity(),
        }
    }

    /// Maps local coordinates of the node into world coordinates
    pub fn world_transform(&self, id: NodeId) -> NodeTransform {
        self.frame_transform(id, None)
    }

    /// Maps local coordinates of the node into the local coordinates of
    /// `frame`. A `frame` that is not an ancestor behaves like the world.
    pub fn frame_transform(&self, id: NodeId, frame: Option<NodeId>) -> NodeTransform {
        let mut transform = self.local_transform(id);
        for ancestor in self.ancestors(id) {
            if Some(ancestor) == frame {
                break;
            }
            transform = transform.then(&self.local_transform(ancestor));
        }
        transform
    }

    pub fn placement(&self, id: NodeId, frame: Option<NodeId>) -> Placement {
        let Some(node) = self.get(id) else {
            return Placement {
                position: [0.0, 0.0],
                rotation: 0.0,
                scale: [1.0, 1.0],
            };
        };
        let mut position = Point2D::new(node.position[0], node.position[1]);
        let mut rotation = node.rotation;
        let mut scale = node.scale;
        for ancestor in self.ancestors(id) {
            if Some(ancestor) == frame {
                break;
            }
            let ancestor_node = &self[ancestor];
            position = local_transform(ancestor_node).transform_point(position);
            rotation += ancestor_node.rotation;
            scale = [
                scale[0] * ancestor_node.scale[0],
                scale[1] * ancestor_node.scale[1],
            ];
        }
        Placement {
            position: [position.x, position.y],
            rotation,
            scale,
        }
    }

    pub fn world_position(&self, id: NodeId) -> [f32; 2] {
        self.placement(id, None).position
    }

    /// Moves a node so that its world position becomes `position`
    pub fn set_world_position(&mut self, id: NodeId, position: [f32; 2]) -> Result<(), SceneGraphError> {
        self.check(id)?;
        let local = match self.parent(id) {
            Some(parent) => {
                let inverse = self
                    .world_transform(parent)
                    .inverse()
                    .ok_or(SceneGraphError::NonInvertibleTransform(id))?;
                let point = inverse.transform_point(Point2D::new(position[0], position[1]));
                [point.x, point.y]
            }
            None => position,
        };
        self.nodes[id.0].node.position = local;
        Ok(())
    }

    /// Moves every node of `other` into this graph.
    ///
    /// The roots of `other` become children of `parent`, or roots of this
    /// graph when `parent` is `None`. Returns the new ids of those roots.
    pub fn append(&mut self, other: SceneGraph, parent: Option<NodeId>) -> Result<Vec<NodeId>, SceneGraphError> {
        if let Some(parent) = parent {
            self.check(parent)?;
        }
        other.validate()?;

        let offset = self.nodes.len();
        let shift = |id: NodeId| NodeId(id.0 + offset);
        let new_roots: Vec<NodeId> = other.roots.iter().copied().map(shift).collect();

        for entry in other.nodes {
            self.nodes.push(NodeEntry {
                node: entry.node,
                parent: entry.parent.map(shift).or(parent),
                children: entry.children.into_iter().map(shift).collect(),
            });
        }
        match parent {
            Some(parent) => self.nodes[parent.0].children.extend(new_roots.iter().copied()),
            None => self.roots.extend(new_roots.iter().copied()),
        }
        Ok(new_roots)
    }

    /// Checks that the parent and child indices describe a forest.
    ///
    /// Graphs built through the API always pass; deserialized graphs may not.
    pub fn validate(&self) -> Result<(), SceneGraphError> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack: Vec<(NodeId, Option<NodeId>)> = self.roots.iter().map(|r| (*r, None)).collect();
        while let Some((id, expected_parent)) = stack.pop() {
            let entry = self
                .nodes
                .get(id.0)
                .ok_or(SceneGraphError::UnknownNode(id))?;
            if seen[id.0] {
                return Err(SceneGraphError::InvalidStructure(format!(
                    "node {id} is reachable more than once"
                )));
            }
            seen[id.0] = true;
            if entry.parent != expected_parent {
                return Err(SceneGraphError::InvalidStructure(format!(
                    "node {id} has an inconsistent parent index"
                )));
            }
            stack.extend(entry.children.iter().map(|c| (*c, Some(id))));
        }
        match seen.iter().position(|s| !s) {
            Some(orphan) => Err(SceneGraphError::InvalidStructure(format!(
                "node {orphan} is not reachable from any root"
            ))),
            None => Ok(()),
        }
    }
}

fn local_transform(node: &SceneNode) -> NodeTransform {
    NodeTransform::scale(node.scale[0], node.scale[1])
        .then_rotate(Angle::degrees(node.rotation))
        .then_translate(lyon_path::geom::euclid::Vector2D::new(
            node.position[0],
            node.position[1],
        ))
}

impl Index<NodeId> for SceneGraph {
    type Output = SceneNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0].node
    }
}

impl IndexMut<NodeId> for SceneGraph {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.0].node
    }
}
