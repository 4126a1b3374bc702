use serde::{Deserialize, Serialize};
use vectorier_common::types::Rgba;

/// Timed transform data attached to a container.
///
/// The data is only exported as declarative parameters; nothing here is
/// ever evaluated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicTransform {
    pub transformations: Vec<Transformation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transformation {
    pub name: String,
    pub moves: Vec<Move>,
    pub sizes: Vec<SizeChange>,
    pub rotations: Vec<RotationChange>,
    pub colors: Vec<ColorChange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Move {
    pub intervals: Vec<MoveInterval>,
}

/// One leg of a move. The start point is always the origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveInterval {
    pub frames_to_move: i32,
    pub delay: f32,
    pub support: [f32; 2],
    pub finish: [f32; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeChange {
    pub frames: i32,
    pub final_width: f32,
    pub final_height: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationChange {
    pub angle: f32,
    pub anchor: [f32; 2],
    pub frames: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorChange {
    pub color_start: Rgba,
    pub color_finish: Rgba,
    pub frames: i32,
}
