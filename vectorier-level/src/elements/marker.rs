use vectorier_document::DocumentElement;
use vectorier_geometry::units::to_document;
use vectorier_scenegraph::NodeId;

use crate::elements::{NodeElement, WriteContext};
use crate::error::VectorierLevelError;
use crate::naming::clean_name;

/// Positioned element carrying only a name and an optional size
pub struct MarkerElement {
    pub tag: &'static str,
}

impl NodeElement for MarkerElement {
    fn write(&self, ctx: &WriteContext, id: NodeId, parent: &mut DocumentElement) -> Result<(), VectorierLevelError> {
        let node = ctx.graph.node(id)?;
        let placement = ctx.graph.placement(id, ctx.frame(id));
        let [x, y] = to_document(placement.position);

        let element = parent.add_child(self.tag);
        let name = clean_name(&node.name);
        if !name.is_empty() {
            element.set_attribute("Name", name);
        }
        element.set_attribute("X", x).set_attribute("Y", y);
        if let Some(sprite) = &node.sprite {
            element
                .set_attribute("Width", sprite.native_size[0] as f32 * placement.scale[0])
                .set_attribute("Height", sprite.native_size[1] as f32 * placement.scale[1]);
        }
        Ok(())
    }
}
