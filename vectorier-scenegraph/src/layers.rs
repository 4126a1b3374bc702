use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vectorier_common::value::parse_f32;

/// Depth factor used when a layer label is not a number
pub const DEFAULT_DEPTH_FACTOR: f32 = 1.0;

/// Host table mapping a layer index to its label.
///
/// Labels of depth layers are decimal numbers such as `"0.5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerNames(BTreeMap<u32, String>);

impl Default for LayerNames {
    fn default() -> Self {
        let mut names = BTreeMap::new();
        names.insert(0, "Default".to_string());
        Self(names)
    }
}

impl LayerNames {
    pub fn name(&self, layer: u32) -> Option<&str> {
        self.0.get(&layer).map(String::as_str)
    }

    pub fn set_name(&mut self, layer: u32, label: impl Into<String>) {
        self.0.insert(layer, label.into());
    }

    /// First layer carrying exactly this label
    pub fn layer_for_label(&self, label: &str) -> Option<u32> {
        self.0
            .iter()
            .find(|(_, name)| name.as_str() == label)
            .map(|(layer, _)| *layer)
    }

    pub fn depth_factor(&self, layer: u32) -> f32 {
        parse_depth_factor(self.name(layer).unwrap_or_default())
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(layer, name)| (*layer, name.as_str()))
    }
}

pub fn parse_depth_factor(label: &str) -> f32 {
    parse_f32(label)
        .filter(|factor| factor.is_finite())
        .unwrap_or(DEFAULT_DEPTH_FACTOR)
}
