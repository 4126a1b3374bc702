use tracing::{debug, warn};
use vectorier_document::DocumentElement;
use vectorier_geometry::affine::{affine_for_sprite, decompose_affine};
use vectorier_geometry::units::{scale_for_length, to_document, to_scene};
use vectorier_scenegraph::components::{ImageType, SpriteRenderer};
use vectorier_scenegraph::{NodeId, NodeKind, SceneNode};

use crate::elements::{add_imported, number_attribute, required_number, NodeElement, ReadContext, WriteContext};
use crate::error::VectorierLevelError;

pub struct ImageElement;

impl NodeElement for ImageElement {
    fn write(&self, ctx: &WriteContext, id: NodeId, parent: &mut DocumentElement) -> Result<(), VectorierLevelError> {
        let node = ctx.graph.node(id)?;
        let Some(sprite) = &node.sprite else {
            debug!("Image `{}` has no sprite, skipping", node.name);
            return Ok(());
        };
        let frame = ctx.frame(id);
        let element = parent.add_child("Image");

        match affine_for_sprite(ctx.graph, id, frame) {
            Some(matrix) => {
                element
                    .set_attribute("X", matrix.top_left_x)
                    .set_attribute("Y", matrix.top_left_y)
                    .set_attribute("ClassName", &sprite.texture)
                    .set_attribute("Width", matrix.bounding_width)
                    .set_attribute("Height", matrix.bounding_height)
                    .set_attribute("NativeX", matrix.native_width)
                    .set_attribute("NativeY", matrix.native_height);
                if sprite.image_type != ImageType::None {
                    element.set_attribute("Type", sprite.image_type.to_string());
                }
                element
                    .get_or_create_child("Properties")
                    .get_or_create_child("Static")
                    .add_child("Matrix")
                    .set_attribute("A", matrix.a)
                    .set_attribute("B", matrix.b)
                    .set_attribute("C", matrix.c)
                    .set_attribute("D", matrix.d)
                    .set_attribute("Tx", matrix.tx)
                    .set_attribute("Ty", matrix.ty);
            }
            None => {
                let placement = ctx.graph.placement(id, frame);
                let [x, y] = to_document(placement.position);
                element
                    .set_attribute("X", x)
                    .set_attribute("Y", y)
                    .set_attribute("ClassName", &sprite.texture)
                    .set_attribute("Width", sprite.native_size[0] as f32 * placement.scale[0])
                    .set_attribute("Height", sprite.native_size[1] as f32 * placement.scale[1]);
                if sprite.image_type != ImageType::None {
                    element.set_attribute("Type", sprite.image_type.to_string());
                }
            }
        }
        Ok(())
    }

    fn read(
        &self,
        ctx: &mut ReadContext,
        element: &DocumentElement,
        parent: NodeId,
    ) -> Result<Option<NodeId>, VectorierLevelError> {
        let texture = element.attribute("ClassName").unwrap_or_default();
        let image_type = match element.attribute("Type") {
            None => ImageType::None,
            Some(text) => text.parse().unwrap_or_else(|_| {
                warn!("Unknown image type `{text}` on `{texture}`, using None");
                ImageType::None
            }),
        };

        let matrix = element
            .child("Properties")
            .and_then(|properties| properties.child("Static"))
            .and_then(|properties| properties.child("Matrix"));

        let mut node = SceneNode::tagged(
            if texture.is_empty() { "Image" } else { texture },
            NodeKind::Image,
        );

        let sprite = match matrix {
            Some(matrix) => {
                let native_size = [
                    native_dimension(element, "NativeX")?,
                    native_dimension(element, "NativeY")?,
                ];
                let decomposed = decompose_affine(
                    required_number(matrix, "A")?,
                    required_number(matrix, "B")?,
                    required_number(matrix, "C")?,
                    required_number(matrix, "D")?,
                    [required_number(matrix, "Tx")?, required_number(matrix, "Ty")?],
                    [required_number(element, "X")?, required_number(element, "Y")?],
                    native_size,
                );
                node.position = decomposed.position;
                node.rotation = decomposed.rotation;
                node.scale = decomposed.scale;
                SpriteRenderer {
                    flip_x: decomposed.flip_x,
                    flip_y: decomposed.flip_y,
                    image_type,
                    ..SpriteRenderer::new(texture, native_size)
                }
            }
            None => {
                let position = [
                    number_attribute(element, "X")?.unwrap_or_default(),
                    number_attribute(element, "Y")?.unwrap_or_default(),
                ];
                let width = number_attribute(element, "Width")?.unwrap_or_default();
                let height = number_attribute(element, "Height")?.unwrap_or_default();
                let (native_width, scale_x) = native_and_scale(width);
                let (native_height, scale_y) = native_and_scale(height);
                let native_size = [native_width, native_height];
                node.position = to_scene(position);
                node.scale = [scale_x, scale_y];
                SpriteRenderer {
                    image_type,
                    ..SpriteRenderer::new(texture, native_size)
                }
            }
        };
        node.sprite = Some(sprite);

        Ok(Some(add_imported(ctx, parent, node)?))
    }
}

fn native_dimension(element: &DocumentElement, name: &str) -> Result<u32, VectorierLevelError> {
    let value = required_number(element, name)?;
    if value < 0.0 {
        return Err(crate::elements::malformed(element, name, &value.to_string()));
    }
    Ok(value.round() as u32)
}

/// Native size and scale whose product is exactly `length`. Falls back to a
/// one pixel sprite when the rounded size admits no such scale.
fn native_and_scale(length: f32) -> (u32, f32) {
    let native = (length.abs().round() as u32).max(1);
    match scale_for_length(length, native) {
        Some(scale) => (native, scale),
        None => (1, length),
    }
}
