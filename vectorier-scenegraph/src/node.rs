use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::components::{
    AreaSettings, CameraSettings, SelectionVariant, SpriteRenderer,
};
use crate::dynamic::DynamicTransform;

/// Index of a node in a [`SceneGraph`](crate::scene_graph::SceneGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag of a node. Nodes without a kind are "untagged" and never exported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
pub enum NodeKind {
    Object,
    Image,
    Platform,
    Trapezoid,
    Trigger,
    Area,
    Camera,
    Spawn,
    Item,
    Model,
    Particle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneNode {
    pub name: String,
    pub kind: Option<NodeKind>,
    /// Local position in scene units, Y up
    pub position: [f32; 2],
    pub scale: [f32; 2],
    /// Local rotation in degrees, counter-clockwise
    pub rotation: f32,
    pub visible: bool,
    pub layer: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprite: Option<SpriteRenderer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<DynamicTransform>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: None,
            position: [0.0, 0.0],
            scale: [1.0, 1.0],
            rotation: 0.0,
            visible: true,
            layer: 0,
            sprite: None,
            camera: None,
            area: None,
            selection: None,
            dynamic: None,
        }
    }
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn tagged(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = [x, y];
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteRenderer) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn is_kind(&self, kind: NodeKind) -> bool {
        self.kind == Some(kind)
    }

    pub fn is_tagged(&self) -> bool {
        self.kind.is_some()
    }

    pub fn sorting_order(&self) -> i32 {
        self.sprite.as_ref().map(|s| s.sorting_order).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_tag_strings() {
        assert_eq!(NodeKind::from_str("Trapezoid").unwrap(), NodeKind::Trapezoid);
        assert_eq!(NodeKind::Particle.to_string(), "Particle");
        assert!(NodeKind::from_str("Untagged").is_err());
        assert_eq!(NodeKind::VARIANTS.len(), 11);
    }

    #[test]
    fn test_node_defaults() {
        let node = SceneNode::new("Crate");
        assert_eq!(node.scale, [1.0, 1.0]);
        assert!(node.visible);
        assert!(!node.is_tagged());
        assert_eq!(node.sorting_order(), 0);
    }
}
