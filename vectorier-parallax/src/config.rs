use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use vectorier_scenegraph::NodeKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Follow the scene view camera on every tick
    pub attach_scene_camera: bool,
    /// Orthographic size that represents a zoom of 1
    pub base_ortho_size: f32,
    pub base_zoom: f32,
    /// Multiplier applied to each group's scale, 1 disables the adjustment
    pub frame_scale_multiplier: f32,
    /// Kinds of the nodes that move with their depth group. An empty list
    /// selects every tagged node.
    pub target_kinds: Vec<NodeKind>,
    pub zoom: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            attach_scene_camera: true,
            base_ortho_size: 4.0,
            base_zoom: 0.5,
            frame_scale_multiplier: 2.0,
            target_kinds: vec![
                NodeKind::Image,
                NodeKind::Trigger,
                NodeKind::Area,
                NodeKind::Platform,
                NodeKind::Trapezoid,
                NodeKind::Item,
                NodeKind::Model,
            ],
            zoom: 1.0,
        }
    }
}

impl ParallaxConfig {
    pub fn is_target_kind(&self, kind: Option<NodeKind>) -> bool {
        match kind {
            None => false,
            Some(kind) => self.target_kinds.is_empty() || self.target_kinds.contains(&kind),
        }
    }

    /// Orthographic size matching the current zoom
    pub fn orthographic_size(&self) -> f32 {
        let zoom = self.base_zoom * self.zoom;
        if zoom > 0.0 {
            self.base_ortho_size / zoom
        } else {
            self.base_ortho_size
        }
    }
}

/// Zoom levels used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames)]
pub enum ZoomPreset {
    Minimum,
    Zoom80,
    Normal,
    Maximum,
}

impl ZoomPreset {
    pub fn value(&self) -> f32 {
        match self {
            ZoomPreset::Minimum => 0.65,
            ZoomPreset::Zoom80 => 0.8,
            ZoomPreset::Normal => 1.0,
            ZoomPreset::Maximum => 1.1,
        }
    }
}
