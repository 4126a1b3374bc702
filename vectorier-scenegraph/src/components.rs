use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Pixels of a sprite texture that cover one scene unit
pub const PIXELS_PER_UNIT: f32 = 100.0;

/// Rectangular sprite drawn at a node.
///
/// The sprite's pivot is its top-left corner as seen in document space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteRenderer {
    /// Texture (class) name of the image
    pub texture: String,
    /// Texture size in pixels
    pub native_size: [u32; 2],
    pub flip_x: bool,
    pub flip_y: bool,
    /// Draw order, lower values are drawn first
    pub sorting_order: i32,
    pub image_type: ImageType,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            texture: String::new(),
            native_size: [0, 0],
            flip_x: false,
            flip_y: false,
            sorting_order: 0,
            image_type: ImageType::None,
        }
    }
}

impl SpriteRenderer {
    pub fn new(texture: impl Into<String>, native_size: [u32; 2]) -> Self {
        Self {
            texture: texture.into(),
            native_size,
            ..Default::default()
        }
    }

    /// Sprite size in scene units before any node scale is applied
    pub fn unit_size(&self) -> [f32; 2] {
        [
            self.native_size[0] as f32 / PIXELS_PER_UNIT,
            self.native_size[1] as f32 / PIXELS_PER_UNIT,
        ]
    }
}

/// How the engine treats an image.
///
/// `Vanishing` images disappear under a trigger with a `None` event and
/// `Dynamic` images play the animation of their sprite sheet.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
pub enum ImageType {
    #[default]
    None,
    Static,
    Vanishing,
    Dynamic,
}

/// Restricts an object to one game mode
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
pub enum SelectionVariant {
    #[default]
    CommonMode,
    HunterMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub orthographic_size: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            orthographic_size: 4.0,
        }
    }
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
pub enum AreaType {
    /// Move area, also used when a node has no area settings
    #[default]
    Animation,
    /// Hunter catch area, uses `distance`
    Catch,
    /// Trick area, uses `item_name` and `score`
    Trick,
    /// Tutorial prompt, uses `key` and `description`
    Help,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaSettings {
    pub area_type: AreaType,
    pub distance: i32,
    pub item_name: String,
    pub score: i32,
    pub key: String,
    pub description: String,
}

impl Default for AreaSettings {
    fn default() -> Self {
        Self {
            area_type: AreaType::Animation,
            distance: 300,
            item_name: "TRICK_".to_string(),
            score: 100,
            key: "Up".to_string(),
            description: String::new(),
        }
    }
}
