use std::collections::BTreeMap;
use std::path::Path;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};
use tracing::info;
use vectorier_document::{Document, DocumentElement};
use vectorier_scenegraph::{NodeId, NodeKind, SceneGraph};

use crate::elements::{write_in_draw_order, write_node, WriteContext};
use crate::error::VectorierLevelError;
use crate::naming::clean_name;

/// Shape of an exported document
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportMode {
    /// `Track` of depth groups
    #[default]
    Level,
    /// `Objects` library with one entry per node
    Objects,
}

/// Nodes written at the top level of a document, in depth-first pre-order.
///
/// Nodes below a container are written by that container instead.
pub fn eligible_nodes(graph: &SceneGraph) -> Vec<NodeId> {
    graph
        .depth_first()
        .into_iter()
        .filter(|id| {
            graph[*id].is_tagged()
                && graph.active_in_hierarchy(*id)
                && !graph.has_ancestor_of_kind(*id, NodeKind::Object)
        })
        .collect()
}

/// Exports `graph` into `template`, or into a fresh `Root` document
#[tracing::instrument(skip_all)]
pub fn export_document(
    graph: &SceneGraph,
    mode: ExportMode,
    template: Option<Document>,
) -> Result<Document, VectorierLevelError> {
    let mut document = template.unwrap_or_else(|| Document::create("Root"));
    let ctx = WriteContext { graph, mode };
    let nodes = eligible_nodes(graph);

    match mode {
        ExportMode::Level => export_level(&ctx, &nodes, document.root_mut())?,
        ExportMode::Objects => export_objects(&ctx, &nodes, document.root_mut())?,
    }

    info!("Exported {} nodes as {mode}", nodes.len());
    Ok(document)
}

fn export_level(ctx: &WriteContext, nodes: &[NodeId], root: &mut DocumentElement) -> Result<(), VectorierLevelError> {
    let mut groups: BTreeMap<OrderedFloat<f32>, Vec<NodeId>> = BTreeMap::new();
    for id in nodes {
        groups
            .entry(OrderedFloat(ctx.graph.depth_factor(*id)))
            .or_default()
            .push(*id);
    }

    let track = root.add_child("Track");
    for (factor, ids) in groups {
        let group = track.add_child("Object");
        group.set_attribute("Factor", factor.into_inner());
        write_in_draw_order(ctx, &ids, group.add_child("Content"))?;
    }
    Ok(())
}

fn export_objects(ctx: &WriteContext, nodes: &[NodeId], root: &mut DocumentElement) -> Result<(), VectorierLevelError> {
    let objects = root.add_child("Objects");
    for id in nodes {
        let entry = objects.add_child("Object");
        let name = clean_name(&ctx.graph[*id].name);
        if !name.is_empty() {
            entry.set_attribute("Name", name);
        }
        write_node(ctx, *id, entry.add_child("Content"))?;
    }
    Ok(())
}

/// Exports into the document at `path`, appending to it when it already
/// exists, then prunes empty elements and saves atomically
#[tracing::instrument(skip(graph))]
pub fn export_to_path(graph: &SceneGraph, mode: ExportMode, path: &Path) -> Result<(), VectorierLevelError> {
    if path.as_os_str().is_empty() {
        return Err(VectorierLevelError::InputError("output path is empty".to_string()));
    }

    let template = if path.exists() {
        info!("Appending to existing document {}", path.display());
        Some(Document::load(path)?)
    } else {
        None
    };

    let mut document = export_document(graph, mode, template)?;
    document.remove_empty_elements();
    document.save(path)?;

    info!("Export completed: {}", path.display());
    Ok(())
}
