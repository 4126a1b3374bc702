use tracing::warn;
use vectorier_document::DocumentElement;
use vectorier_geometry::bounds::combined_child_bounds;
use vectorier_scenegraph::components::SelectionVariant;
use vectorier_geometry::units::{length_to_document, to_document};
use vectorier_scenegraph::{NodeId, NodeKind, SceneNode};

use crate::dynamic::write_dynamic;
use crate::elements::{add_imported, read_element, read_position, write_in_draw_order, NodeElement, ReadContext, WriteContext};
use crate::error::VectorierLevelError;
use crate::export::ExportMode;
use crate::naming::clean_name;

/// Container node grouping other elements
pub struct ObjectElement;

impl NodeElement for ObjectElement {
    fn write(&self, ctx: &WriteContext, id: NodeId, parent: &mut DocumentElement) -> Result<(), VectorierLevelError> {
        let graph = ctx.graph;
        let node = graph.node(id)?;
        let element = parent.add_child("Object");

        let name = clean_name(&node.name);
        if !name.is_empty() {
            element.set_attribute("Name", name);
        }

        let anchors = graph.find_child(id, "In").zip(graph.find_child(id, "Out"));
        if let Some((in_id, out_id)) = anchors {
            let [in_x, in_y] = to_document(graph.world_position(in_id));
            let [out_x, out_y] = to_document(graph.world_position(out_id));
            element
                .set_attribute("InX", in_x)
                .set_attribute("InY", in_y)
                .set_attribute("OutX", out_x)
                .set_attribute("OutY", out_y);

            if let Some(bounds) = combined_child_bounds(graph, id) {
                let [box_x, box_y] = to_document([bounds.min.x, bounds.max.y]);
                element
                    .set_attribute("BoxX", box_x)
                    .set_attribute("BoxY", box_y)
                    .set_attribute("BoxWidth", length_to_document(bounds.width()))
                    .set_attribute("BoxHeight", length_to_document(bounds.height()));
            }
            write_content(ctx, id, element)?;
        } else {
            match ctx.mode {
                ExportMode::Level => {
                    let placement = graph.placement(id, ctx.frame(id));
                    let [x, y] = to_document(placement.position);
                    element.set_attribute("X", x).set_attribute("Y", y);
                    if !graph.children(id).is_empty() {
                        write_content(ctx, id, element)?;
                    }
                }
                ExportMode::Objects => write_content(ctx, id, element)?,
            }
        }

        if let Some(variant) = node.selection {
            element
                .get_or_create_child("Properties")
                .get_or_create_child("Static")
                .add_child("Selection")
                .set_attribute("Choice", "AITriggers")
                .set_attribute("Variant", variant.to_string());
        }
        if let Some(dynamic) = &node.dynamic {
            write_dynamic(dynamic, element.get_or_create_child("Properties"));
        }
        Ok(())
    }

    fn read(
        &self,
        ctx: &mut ReadContext,
        element: &DocumentElement,
        parent: NodeId,
    ) -> Result<Option<NodeId>, VectorierLevelError> {
        let name = element
            .attribute("Name")
            .filter(|name| !name.is_empty())
            .unwrap_or("Object");
        let [x, y] = read_position(element)?;
        let mut node = SceneNode::tagged(name, NodeKind::Object).with_position(x, y);
        node.selection = read_selection(element);
        let id = add_imported(ctx, parent, node)?;

        if let Some(content) = element.child("Content") {
            for child in content.children() {
                read_element(ctx, child, id)?;
            }
        }
        Ok(Some(id))
    }
}

fn read_selection(element: &DocumentElement) -> Option<SelectionVariant> {
    let variant = element
        .child("Properties")?
        .child("Static")?
        .child("Selection")?
        .attribute("Variant")?;
    match variant.parse() {
        Ok(variant) => Some(variant),
        Err(_) => {
            warn!("Unknown selection variant `{variant}`, ignoring");
            None
        }
    }
}

/// `Content` element holding the eligible direct children in draw order
fn write_content(ctx: &WriteContext, id: NodeId, element: &mut DocumentElement) -> Result<(), VectorierLevelError> {
    let graph = ctx.graph;
    let children: Vec<NodeId> = graph
        .children(id)
        .iter()
        .copied()
        .filter(|child| graph.active_in_hierarchy(*child) && graph[*child].is_tagged())
        .collect();
    write_in_draw_order(ctx, &children, element.add_child("Content"))
}
