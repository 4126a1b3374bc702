use tracing::debug;
use vectorier_document::DocumentElement;
use vectorier_geometry::units::{scale_for_length, to_document};
use vectorier_scenegraph::components::SpriteRenderer;
use vectorier_scenegraph::{NodeId, NodeKind, SceneNode};

use crate::elements::{add_imported, read_position, required_number, NodeElement, ReadContext, WriteContext};
use crate::error::VectorierLevelError;

/// Texture shown for imported collision platforms
pub const COLLISION_TEXTURE: &str = "platform";
/// Pixel size of [`COLLISION_TEXTURE`]
pub const COLLISION_TEXTURE_SIZE: [u32; 2] = [100, 100];

pub struct PlatformElement;

impl NodeElement for PlatformElement {
    fn write(&self, ctx: &WriteContext, id: NodeId, parent: &mut DocumentElement) -> Result<(), VectorierLevelError> {
        let node = ctx.graph.node(id)?;
        let Some(sprite) = &node.sprite else {
            debug!("Platform `{}` has no sprite, skipping", node.name);
            return Ok(());
        };
        let [x, y] = to_document(ctx.graph.placement(id, ctx.frame(id)).position);
        let lossy_scale = ctx.graph.placement(id, None).scale;

        parent
            .add_child("Platform")
            .set_attribute("X", x)
            .set_attribute("Y", y)
            .set_attribute("Width", sprite.native_size[0] as f32 * lossy_scale[0])
            .set_attribute("Height", sprite.native_size[1] as f32 * lossy_scale[1]);
        Ok(())
    }

    fn read(
        &self,
        ctx: &mut ReadContext,
        element: &DocumentElement,
        parent: NodeId,
    ) -> Result<Option<NodeId>, VectorierLevelError> {
        let [x, y] = read_position(element)?;
        let width = required_number(element, "Width")?;
        let height = required_number(element, "Height")?;

        let node = SceneNode::tagged("Platform", NodeKind::Platform)
            .with_position(x, y)
            .with_scale(
                collision_scale(width, COLLISION_TEXTURE_SIZE[0]),
                collision_scale(height, COLLISION_TEXTURE_SIZE[1]),
            )
            .with_sprite(SpriteRenderer::new(COLLISION_TEXTURE, COLLISION_TEXTURE_SIZE));
        Ok(Some(add_imported(ctx, parent, node)?))
    }
}

fn collision_scale(length: f32, native: u32) -> f32 {
    scale_for_length(length, native).unwrap_or(length / native as f32)
}
