//! Per-kind writers and readers of level document elements.
//!
//! Every [`NodeKind`] maps to exactly one [`NodeElement`] implementation
//! through [`element_for`].

pub mod area;
pub mod camera;
pub mod image;
pub mod marker;
pub mod object;
pub mod platform;

use itertools::Itertools;
use tracing::debug;
use vectorier_common::value::parse_f32;
use vectorier_document::DocumentElement;
use vectorier_geometry::units::to_scene;
use vectorier_scenegraph::{NodeId, NodeKind, SceneGraph, SceneNode};

use crate::error::VectorierLevelError;
use crate::export::ExportMode;

pub use area::AreaElement;
pub use camera::CameraElement;
pub use image::ImageElement;
pub use marker::MarkerElement;
pub use object::ObjectElement;
pub use platform::PlatformElement;

/// Scene graph being exported and the shape of the target document
#[derive(Debug, Clone, Copy)]
pub struct WriteContext<'a> {
    pub graph: &'a SceneGraph,
    pub mode: ExportMode,
}

impl WriteContext<'_> {
    /// Coordinate frame for placements of a node: its nearest container or
    /// the world
    pub fn frame(&self, id: NodeId) -> Option<NodeId> {
        self.graph.nearest_ancestor_of_kind(id, NodeKind::Object)
    }
}

/// Scratch graph that imported nodes are created in
#[derive(Debug)]
pub struct ReadContext<'a> {
    pub graph: &'a mut SceneGraph,
    /// Layer of the depth group being read
    pub layer: u32,
}

pub trait NodeElement {
    /// Appends the element describing `id` to `parent`
    fn write(&self, ctx: &WriteContext, id: NodeId, parent: &mut DocumentElement) -> Result<(), VectorierLevelError>;

    /// Creates the node described by `element` under `parent`.
    ///
    /// Returns `None` when elements of this kind are not imported.
    fn read(
        &self,
        _ctx: &mut ReadContext,
        element: &DocumentElement,
        _parent: NodeId,
    ) -> Result<Option<NodeId>, VectorierLevelError> {
        debug!("No reader for <{}>, skipping", element.name());
        Ok(None)
    }
}

pub fn element_for(kind: NodeKind) -> &'static dyn NodeElement {
    match kind {
        NodeKind::Object => &ObjectElement,
        NodeKind::Image => &ImageElement,
        NodeKind::Platform => &PlatformElement,
        NodeKind::Camera => &CameraElement,
        NodeKind::Area => &AreaElement,
        NodeKind::Trapezoid => &MarkerElement { tag: "Trapezoid" },
        NodeKind::Trigger => &MarkerElement { tag: "Trigger" },
        NodeKind::Spawn => &MarkerElement { tag: "Spawn" },
        NodeKind::Item => &MarkerElement { tag: "Item" },
        NodeKind::Model | NodeKind::Particle => &MarkerElement { tag: "Model" },
    }
}

/// Writes one tagged node. Untagged nodes are ignored.
pub fn write_node(ctx: &WriteContext, id: NodeId, parent: &mut DocumentElement) -> Result<(), VectorierLevelError> {
    match ctx.graph.node(id)?.kind {
        Some(kind) => element_for(kind).write(ctx, id, parent),
        None => Ok(()),
    }
}

/// Writes `ids` in draw order: images first, stable-sorted by sorting order,
/// then every other node in the given order
pub fn write_in_draw_order(
    ctx: &WriteContext,
    ids: &[NodeId],
    parent: &mut DocumentElement,
) -> Result<(), VectorierLevelError> {
    let (images, others): (Vec<NodeId>, Vec<NodeId>) = ids
        .iter()
        .copied()
        .partition(|id| ctx.graph[*id].is_kind(NodeKind::Image));

    let images = images
        .into_iter()
        .sorted_by_key(|id| ctx.graph[*id].sorting_order());
    for id in images.chain(others) {
        write_node(ctx, id, parent)?;
    }
    Ok(())
}

/// Creates the node for one document element, skipping unknown tags
pub fn read_element(
    ctx: &mut ReadContext,
    element: &DocumentElement,
    parent: NodeId,
) -> Result<Option<NodeId>, VectorierLevelError> {
    match element.name().parse::<NodeKind>() {
        Ok(kind) => element_for(kind).read(ctx, element, parent),
        Err(_) => {
            debug!("Unknown element <{}>, skipping", element.name());
            Ok(None)
        }
    }
}

/// Adds a node on the context's layer under `parent`
pub(crate) fn add_imported(
    ctx: &mut ReadContext,
    parent: NodeId,
    node: SceneNode,
) -> Result<NodeId, VectorierLevelError> {
    let node = node.with_layer(ctx.layer);
    Ok(ctx.graph.add_child(parent, node)?)
}

/// Optional numeric attribute. Present but unparsable values are errors.
pub(crate) fn number_attribute(element: &DocumentElement, name: &str) -> Result<Option<f32>, VectorierLevelError> {
    match element.attribute(name) {
        None => Ok(None),
        Some(text) => parse_f32(text)
            .filter(|value| value.is_finite())
            .map(Some)
            .ok_or_else(|| malformed(element, name, text)),
    }
}

pub(crate) fn required_number(element: &DocumentElement, name: &str) -> Result<f32, VectorierLevelError> {
    number_attribute(element, name)?.ok_or_else(|| malformed(element, name, ""))
}

pub(crate) fn malformed(element: &DocumentElement, name: &str, value: &str) -> VectorierLevelError {
    VectorierLevelError::MalformedAttribute {
        element: element.name().to_string(),
        attribute: name.to_string(),
        value: value.to_string(),
    }
}

/// Scene position from `X`/`Y`, falling back to `BoxX`/`BoxY`, then the
/// origin
pub(crate) fn read_position(element: &DocumentElement) -> Result<[f32; 2], VectorierLevelError> {
    for (x, y) in [("X", "Y"), ("BoxX", "BoxY")] {
        if element.has_attribute(x) && element.has_attribute(y) {
            return Ok(to_scene([
                required_number(element, x)?,
                required_number(element, y)?,
            ]));
        }
    }
    Ok([0.0, 0.0])
}
