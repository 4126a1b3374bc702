use serde::{Deserialize, Serialize};
use vectorier_scenegraph::{NodeId, SceneGraph};

use crate::bounds::{approximately, normalize_degrees};
use crate::units::{scale_for_length, search_span, solve_monotone, to_document, SCENE_TO_DOCUMENT};

/// Matrix of a rotated or flipped sprite in document space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrixData {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub bounding_width: f32,
    pub bounding_height: f32,
    pub native_width: u32,
    pub native_height: u32,
}

/// Everything [`compute_affine`] needs to know about a sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineInput {
    /// Sprite pivot in document units
    pub position: [f32; 2],
    /// Rotation in degrees
    pub rotation: f32,
    pub flip_x: bool,
    pub flip_y: bool,
    pub native_size: [u32; 2],
    pub scale: [f32; 2],
}

/// Matrix for a rotated or flipped sprite, `None` when it is neither.
/// The bounding size is the axis-aligned extent of the placed sprite.
pub fn compute_affine(input: &AffineInput) -> Option<AffineMatrixData> {
    let mut rotation = normalize_degrees(input.rotation);
    if input.flip_x != input.flip_y {
        rotation = normalize_degrees(-rotation);
    }
    if rotation == 0.0 && !input.flip_x && !input.flip_y {
        return None;
    }

    let width = input.native_size[0] as f32 * input.scale[0];
    let height = input.native_size[1] as f32 * input.scale[1];

    let (mut a, mut b, mut c, mut d) = if rotation == 0.0 {
        (width, 0.0, 0.0, height)
    } else if approximately(rotation, 90.0) {
        (0.0, -width, height, 0.0)
    } else if approximately(rotation, 180.0) {
        (-width, 0.0, 0.0, -height)
    } else if approximately(rotation, 270.0) {
        (0.0, width, -height, 0.0)
    } else {
        let (sin, cos) = rotation.to_radians().sin_cos();
        (width * cos, -width * sin, height * sin, height * cos)
    };

    if input.flip_x {
        a = -a;
        c = -c;
    }
    if input.flip_y {
        b = -b;
        d = -d;
    }

    let [x, y] = input.position;
    let top_left_x = x + a.min(0.0) + c.min(0.0);
    let top_left_y = y + b.min(0.0) + d.min(0.0);

    Some(AffineMatrixData {
        a,
        b,
        c,
        d,
        tx: x - top_left_x,
        ty: y - top_left_y,
        top_left_x,
        top_left_y,
        bounding_width: a.abs() + c.abs(),
        bounding_height: b.abs() + d.abs(),
        native_width: input.native_size[0],
        native_height: input.native_size[1],
    })
}

/// Affine matrix of the node's sprite placed relative to `frame`
/// (the world when `None`)
pub fn affine_for_sprite(graph: &SceneGraph, id: NodeId, frame: Option<NodeId>) -> Option<AffineMatrixData> {
    let node = graph.get(id)?;
    let sprite = node.sprite.as_ref()?;
    let placement = graph.placement(id, frame);
    compute_affine(&AffineInput {
        position: to_document(placement.position),
        rotation: placement.rotation,
        flip_x: sprite.flip_x,
        flip_y: sprite.flip_y,
        native_size: sprite.native_size,
        scale: placement.scale,
    })
}

/// Sprite parameters recovered from a stored matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecomposedAffine {
    /// Sprite pivot in scene units
    pub position: [f32; 2],
    pub rotation: f32,
    pub scale: [f32; 2],
    pub flip_x: bool,
    pub flip_y: bool,
}

/// Recovers rotation, scale and flips from `A B C D` and the sprite pivot
/// from the top-left corner plus `Tx Ty`.
///
/// A mirrored matrix (negative determinant) is read back as a horizontal
/// flip. Both flips together are indistinguishable from a half turn and are
/// read back as one.
///
/// The pivot and the scale are chosen so that [`compute_affine`] writes the
/// same corner, translation and lengths again.
pub fn decompose_affine(
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    translation: [f32; 2],
    top_left: [f32; 2],
    native_size: [u32; 2],
) -> DecomposedAffine {
    let pivot_x = solve_pivot(top_left[0], translation[0], [a.min(0.0), c.min(0.0)]);
    let pivot_y = solve_pivot(top_left[1], translation[1], [b.min(0.0), d.min(0.0)]);

    let flip_x = a * d - b * c < 0.0;
    let (a, c) = if flip_x { (-a, -c) } else { (a, c) };

    let width = a.hypot(b);
    let height = c.hypot(d);
    let matrix_angle = snap_quarter_turn((-b).atan2(a).to_degrees());
    let signed_angle = if flip_x { -matrix_angle } else { matrix_angle };
    let rotation = normalize_degrees(signed_angle);

    DecomposedAffine {
        position: [pivot_x, -pivot_y],
        rotation,
        scale: [
            exact_ratio(width, native_size[0]),
            exact_ratio(height, native_size[1]),
        ],
        flip_x,
        flip_y: false,
    }
}

/// Scene coordinate along one axis whose document value `p` gives back
/// `p + offsets[0] + offsets[1] == top_left` and `p - top_left == translation`.
/// The Y axis is solved as its negation, since `y * -100 == -(y * 100)`.
fn solve_pivot(top_left: f32, translation: f32, offsets: [f32; 2]) -> f32 {
    let corner_and_translation = |scene: f32| {
        let document = scene * SCENE_TO_DOCUMENT;
        let corner = document + offsets[0] + offsets[1];
        (corner, document - corner)
    };
    let estimate = (top_left + translation) / SCENE_TO_DOCUMENT;
    let span = search_span(estimate.abs() + (top_left.abs() + translation.abs()) / SCENE_TO_DOCUMENT);
    solve_monotone(estimate, span, (top_left, translation), corner_and_translation).unwrap_or(estimate)
}

fn snap_quarter_turn(degrees: f32) -> f32 {
    let normalized = normalize_degrees(degrees);
    [0.0, 90.0, 180.0, 270.0, 360.0]
        .into_iter()
        .find(|quarter| approximately(normalized, *quarter))
        .map(|quarter| quarter % 360.0)
        .unwrap_or(normalized)
}

fn exact_ratio(length: f32, native: u32) -> f32 {
    match native {
        0 => 1.0,
        _ => scale_for_length(length, native).unwrap_or(length / native as f32),
    }
}
