use vectorier_document::DocumentElement;
use vectorier_geometry::units::to_document;
use vectorier_scenegraph::components::{AreaSettings, AreaType};
use vectorier_scenegraph::NodeId;

use crate::elements::{NodeElement, WriteContext};
use crate::error::VectorierLevelError;

/// Trigger zone with a typed payload
pub struct AreaElement;

impl NodeElement for AreaElement {
    fn write(&self, ctx: &WriteContext, id: NodeId, parent: &mut DocumentElement) -> Result<(), VectorierLevelError> {
        let node = ctx.graph.node(id)?;
        let placement = ctx.graph.placement(id, ctx.frame(id));
        let [x, y] = to_document(placement.position);
        let [width, height] = node
            .sprite
            .as_ref()
            .map(|sprite| {
                [
                    sprite.native_size[0] as f32 * placement.scale[0],
                    sprite.native_size[1] as f32 * placement.scale[1],
                ]
            })
            .unwrap_or([0.0, 0.0]);

        let default_settings = AreaSettings::default();
        let settings = node.area.as_ref().unwrap_or(&default_settings);

        let element = parent.add_child("Area");
        element
            .set_attribute("X", x)
            .set_attribute("Y", y)
            .set_attribute("Width", width)
            .set_attribute("Height", height)
            .set_attribute("Type", settings.area_type.to_string());

        match settings.area_type {
            AreaType::Animation => {}
            AreaType::Catch => {
                element.set_attribute("Distance", settings.distance);
            }
            AreaType::Trick => {
                element
                    .set_attribute("ItemName", &settings.item_name)
                    .set_attribute("Score", settings.score);
            }
            AreaType::Help => {
                element
                    .set_attribute("Key", &settings.key)
                    .set_attribute("Description", &settings.description);
            }
        }
        Ok(())
    }
}
