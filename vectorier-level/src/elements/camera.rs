use tracing::debug;
use vectorier_document::DocumentElement;
use vectorier_geometry::units::to_document;
use vectorier_scenegraph::components::CameraSettings;
use vectorier_scenegraph::{NodeId, NodeKind, SceneNode};

use crate::elements::{add_imported, read_position, NodeElement, ReadContext, WriteContext};
use crate::error::VectorierLevelError;

pub struct CameraElement;

impl NodeElement for CameraElement {
    fn write(&self, ctx: &WriteContext, id: NodeId, parent: &mut DocumentElement) -> Result<(), VectorierLevelError> {
        let node = ctx.graph.node(id)?;
        if node.camera.is_none() {
            debug!("Camera `{}` has no camera settings, skipping", node.name);
            return Ok(());
        }
        let [x, y] = to_document(ctx.graph.placement(id, ctx.frame(id)).position);
        parent
            .add_child("Camera")
            .set_attribute("X", x)
            .set_attribute("Y", y);
        Ok(())
    }

    fn read(
        &self,
        ctx: &mut ReadContext,
        element: &DocumentElement,
        parent: NodeId,
    ) -> Result<Option<NodeId>, VectorierLevelError> {
        let [x, y] = read_position(element)?;
        let mut node = SceneNode::tagged("Camera", NodeKind::Camera).with_position(x, y);
        node.camera = Some(CameraSettings::default());
        Ok(Some(add_imported(ctx, parent, node)?))
    }
}
