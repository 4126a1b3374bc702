use std::collections::BTreeMap;

use float_cmp::approx_eq;
use ordered_float::OrderedFloat;
use tracing::{debug, info, warn};
use vectorier_scenegraph::{NodeId, NodeKind, SceneGraph};

use crate::config::ParallaxConfig;
use crate::error::ParallaxError;

/// Node moved by the preview, with the values it is restored to
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxTarget {
    pub id: NodeId,
    pub factor: f32,
    pub original_position: [f32; 2],
    pub original_scale: [f32; 2],
    pub original_world_position: [f32; 2],
}

/// Targets sharing a depth factor
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxGroup {
    pub factor: f32,
    pub offset: [f32; 2],
    pub frame_scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveParallax {
    camera: NodeId,
    camera_position: [f32; 2],
    targets: Vec<ParallaxTarget>,
    groups: BTreeMap<OrderedFloat<f32>, ParallaxGroup>,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum ParallaxState {
    #[default]
    Inactive,
    Active(ActiveParallax),
}

/// Previews the in-game depth effect by moving and scaling the targets of
/// each depth group around the camera. Deactivating restores every node it
/// touched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParallaxSimulator {
    config: ParallaxConfig,
    state: ParallaxState,
}

impl ParallaxSimulator {
    pub fn new(config: ParallaxConfig) -> Self {
        Self {
            config,
            state: ParallaxState::Inactive,
        }
    }

    pub fn config(&self) -> &ParallaxConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ParallaxState::Active(_))
    }

    pub fn targets(&self) -> &[ParallaxTarget] {
        match &self.state {
            ParallaxState::Active(active) => &active.targets,
            ParallaxState::Inactive => &[],
        }
    }

    /// Groups ordered by ascending factor
    pub fn groups(&self) -> Vec<&ParallaxGroup> {
        match &self.state {
            ParallaxState::Active(active) => active.groups.values().collect(),
            ParallaxState::Inactive => Vec::new(),
        }
    }

    pub fn group(&self, factor: f32) -> Option<&ParallaxGroup> {
        match &self.state {
            ParallaxState::Active(active) => active.groups.get(&OrderedFloat(factor)),
            ParallaxState::Inactive => None,
        }
    }

    /// Snapshots the targets and the camera, then applies the effect once
    #[tracing::instrument(skip(self, graph))]
    pub fn activate(&mut self, graph: &mut SceneGraph, camera: NodeId) -> Result<(), ParallaxError> {
        if self.is_active() {
            return Err(ParallaxError::AlreadyActive);
        }
        let camera_position = graph
            .get(camera)
            .map(|node| node.position)
            .ok_or(ParallaxError::UnknownCamera(camera))?;

        let targets = collect_targets(graph, &self.config);
        let mut groups = BTreeMap::new();
        for target in &targets {
            groups
                .entry(OrderedFloat(target.factor))
                .or_insert_with(|| ParallaxGroup {
                    factor: target.factor,
                    offset: [0.0, 0.0],
                    frame_scale: 1.0,
                });
        }
        info!(
            "Parallax activated with {} targets in {} groups",
            targets.len(),
            groups.len()
        );

        self.state = ParallaxState::Active(ActiveParallax {
            camera,
            camera_position,
            targets,
            groups,
        });
        if let Err(error) = self.update(graph) {
            warn!("Parallax could not be applied, restoring the scene: {error}");
            self.deactivate(graph)?;
            return Err(error);
        }
        Ok(())
    }

    /// Follows the scene view camera when attached and reapplies the effect.
    /// Does nothing while inactive.
    pub fn tick(&mut self, graph: &mut SceneGraph, scene_camera: Option<[f32; 2]>) -> Result<(), ParallaxError> {
        let ParallaxState::Active(active) = &self.state else {
            return Ok(());
        };
        if let (true, Some(position)) = (self.config.attach_scene_camera, scene_camera) {
            graph.set_world_position(active.camera, position)?;
        }
        self.update(graph)
    }

    /// Changes the zoom and reapplies the effect when active
    pub fn apply_zoom(&mut self, graph: &mut SceneGraph, zoom: f32) -> Result<(), ParallaxError> {
        self.config.zoom = zoom;
        self.update(graph)
    }

    /// Restores every target and the camera. Does nothing while inactive.
    #[tracing::instrument(skip_all)]
    pub fn deactivate(&mut self, graph: &mut SceneGraph) -> Result<(), ParallaxError> {
        let ParallaxState::Active(active) = std::mem::take(&mut self.state) else {
            return Ok(());
        };
        for target in &active.targets {
            let node = graph.node_mut(target.id)?;
            node.position = target.original_position;
            node.scale = target.original_scale;
        }
        graph.node_mut(active.camera)?.position = active.camera_position;
        info!("Parallax deactivated, restored {} targets", active.targets.len());
        Ok(())
    }

    /// Switches between the two states and returns whether the preview is now active
    pub fn toggle(&mut self, graph: &mut SceneGraph, camera: NodeId) -> Result<bool, ParallaxError> {
        if self.is_active() {
            self.deactivate(graph)?;
        } else {
            self.activate(graph, camera)?;
        }
        Ok(self.is_active())
    }

    fn update(&mut self, graph: &mut SceneGraph) -> Result<(), ParallaxError> {
        let ParallaxState::Active(active) = &mut self.state else {
            return Ok(());
        };
        let effective_zoom = self.config.base_zoom * self.config.zoom;
        let [camera_x, camera_y] = graph.world_position(active.camera);

        for group in active.groups.values_mut() {
            let scale = round_tenth(depth_scale(effective_zoom, group.factor));
            group.frame_scale = round_tenth(scale * self.config.frame_scale_multiplier);
            group.offset = [
                camera_x - camera_x * group.factor * group.frame_scale,
                camera_y - camera_y * group.factor * group.frame_scale,
            ];
        }

        for target in &active.targets {
            let Some(group) = active.groups.get(&OrderedFloat(target.factor)) else {
                continue;
            };
            let [x, y] = target.original_world_position;
            graph.set_world_position(
                target.id,
                [
                    group.offset[0] + x * group.frame_scale,
                    group.offset[1] + y * group.frame_scale,
                ],
            )?;
            graph.node_mut(target.id)?.scale = [
                target.original_scale[0] * group.frame_scale,
                target.original_scale[1] * group.frame_scale,
            ];
        }
        debug!("Parallax updated at zoom {effective_zoom}");
        Ok(())
    }
}

fn collect_targets(graph: &SceneGraph, config: &ParallaxConfig) -> Vec<ParallaxTarget> {
    graph
        .depth_first()
        .into_iter()
        .filter(|id| {
            graph.active_in_hierarchy(*id)
                && config.is_target_kind(graph[*id].kind)
                && !graph.has_ancestor_of_kind(*id, NodeKind::Object)
        })
        .map(|id| ParallaxTarget {
            id,
            factor: graph.depth_factor(id),
            original_position: graph[id].position,
            original_scale: graph[id].scale,
            original_world_position: graph.world_position(id),
        })
        .collect()
}

/// Apparent scale of a depth group at the given effective zoom
pub fn depth_scale(effective_zoom: f32, factor: f32) -> f32 {
    if effective_zoom <= 0.0 {
        return 1.0;
    }
    let denominator = (1.0 / effective_zoom - 1.0) * factor + 1.0;
    if approx_eq!(f32, denominator, 0.0, ulps = 4) {
        1.0
    } else {
        1.0 / denominator
    }
}

/// Rounds to one decimal place, halves away from zero
pub fn round_tenth(value: f32) -> f32 {
    ((value as f64 * 10.0).round() / 10.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.5, 1.0, 0.5)]
    #[case(0.5, 0.0, 1.0)]
    #[case(1.0, 0.3, 1.0)]
    #[case(0.0, 0.5, 1.0)]
    #[case(-1.0, 0.5, 1.0)]
    fn test_depth_scale(#[case] zoom: f32, #[case] factor: f32, #[case] expected: f32) {
        assert_approx_eq!(f32, depth_scale(zoom, factor), expected);
    }

    #[test]
    fn test_zero_denominator() {
        // (1 / 0.5 - 1) * -1 + 1 == 0
        assert_eq!(depth_scale(0.5, -1.0), 1.0);
    }

    #[rstest]
    #[case(0.66666, 0.7)]
    #[case(0.25, 0.3)]
    #[case(-0.25, -0.3)]
    #[case(1.04, 1.0)]
    fn test_round_tenth(#[case] value: f32, #[case] expected: f32) {
        assert_eq!(round_tenth(value), expected);
    }
}
