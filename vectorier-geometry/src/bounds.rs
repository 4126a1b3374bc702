use float_cmp::approx_eq;
use lyon_path::geom::euclid::{Box2D, Point2D, UnknownUnit, Vector2D};
use vectorier_scenegraph::{NodeId, Placement, SceneGraph};

pub type Bounds = Box2D<f32, UnknownUnit>;

/// Angle in degrees brought into `[0, 360)`
pub fn normalize_degrees(degrees: f32) -> f32 {
    // rem_euclid rounds tiny negative angles up to exactly 360
    let normalized = degrees.rem_euclid(360.0);
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// `(cos, sin)` of an angle in degrees, exact for multiples of 90
pub fn cos_sin_degrees(degrees: f32) -> (f32, f32) {
    let normalized = normalize_degrees(degrees);
    for (quarter, cos_sin) in [(0.0, (1.0, 0.0)), (90.0, (0.0, 1.0)), (180.0, (-1.0, 0.0)), (270.0, (0.0, -1.0)), (360.0, (1.0, 0.0))] {
        if approximately(normalized, quarter) {
            return cos_sin;
        }
    }
    let radians = normalized.to_radians();
    (radians.cos(), radians.sin())
}

/// Relative float comparison used for canonical angles
pub(crate) fn approximately(a: f32, b: f32) -> bool {
    let margin = 1e-6 * a.abs().max(b.abs());
    approx_eq!(f32, a, b, epsilon = margin.max(f32::EPSILON * 8.0), ulps = 4)
}

/// Axis-aligned bounds in scene units of a sprite with `size` (unit size) at
/// `placement`. The pivot is the top-left corner, so the sprite extends along
/// +X and -Y of its rotated frame.
pub fn placed_sprite_bounds(placement: &Placement, size: [f32; 2]) -> Bounds {
    let (cos, sin) = cos_sin_degrees(placement.rotation);
    let width = size[0] * placement.scale[0];
    let height = size[1] * placement.scale[1];
    let pivot = Point2D::new(placement.position[0], placement.position[1]);
    let across = Vector2D::new(width * cos, width * sin);
    let down = Vector2D::new(height * sin, -height * cos);
    Bounds::from_points([pivot, pivot + across, pivot + down, pivot + across + down])
}

/// World bounds of the node's sprite, `None` without a sprite
pub fn sprite_world_bounds(graph: &SceneGraph, id: NodeId) -> Option<Bounds> {
    sprite_bounds_in(graph, id, None)
}

/// Bounds of the node's sprite in the local space of `frame`
pub fn sprite_bounds_in(graph: &SceneGraph, id: NodeId, frame: Option<NodeId>) -> Option<Bounds> {
    let sprite = graph.get(id)?.sprite.as_ref()?;
    Some(placed_sprite_bounds(&graph.placement(id, frame), sprite.unit_size()))
}

/// Union of the world bounds of the direct children carrying a sprite
pub fn combined_child_bounds(graph: &SceneGraph, id: NodeId) -> Option<Bounds> {
    graph
        .children(id)
        .iter()
        .filter_map(|child| sprite_world_bounds(graph, *child))
        .reduce(|acc, bounds| acc.union(&bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectorier_scenegraph::components::SpriteRenderer;
    use vectorier_scenegraph::{NodeKind, SceneNode};

    #[test]
    fn test_exact_quarter_turns() {
        assert_eq!(cos_sin_degrees(90.0), (0.0, 1.0));
        assert_eq!(cos_sin_degrees(-90.0), (0.0, -1.0));
        assert_eq!(cos_sin_degrees(540.0), (-1.0, 0.0));
        let (cos, sin) = cos_sin_degrees(45.0);
        assert!(approx_eq!(f32, cos, sin, ulps = 2));
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-1e-5), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert!(normalize_degrees(-1e-3) < 360.0);
    }

    #[test]
    fn test_rotated_sprite_bounds() {
        let mut graph = SceneGraph::new();
        let id = graph.add_root(
            SceneNode::tagged("Beam", NodeKind::Image)
                .with_position(1.0, 2.0)
                .with_rotation(90.0)
                .with_sprite(SpriteRenderer::new("beam", [200, 50])),
        );
        let bounds = sprite_world_bounds(&graph, id).unwrap();
        // Width axis points up, height axis points right
        assert_eq!(bounds.min, Point2D::new(1.0, 2.0));
        assert_eq!(bounds.max, Point2D::new(1.5, 4.0));
    }

    #[test]
    fn test_combined_child_bounds() {
        let mut graph = SceneGraph::new();
        let parent = graph.add_root(SceneNode::tagged("Building", NodeKind::Object));
        for (x, y) in [(0.0, 0.0), (2.0, -1.0)] {
            graph
                .add_child(
                    parent,
                    SceneNode::tagged("Wall", NodeKind::Image)
                        .with_position(x, y)
                        .with_sprite(SpriteRenderer::new("wall", [100, 100])),
                )
                .unwrap();
        }
        graph.add_child(parent, SceneNode::new("In")).unwrap();

        let bounds = combined_child_bounds(&graph, parent).unwrap();
        assert_eq!(bounds.min, Point2D::new(0.0, -2.0));
        assert_eq!(bounds.max, Point2D::new(3.0, 0.0));
        assert!(combined_child_bounds(&graph, NodeId(3)).is_none());
    }
}
