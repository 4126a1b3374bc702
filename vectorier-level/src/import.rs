use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vectorier_document::{Document, DocumentElement};
use vectorier_scenegraph::{NodeId, NodeKind, SceneGraph, SceneNode};

use crate::elements::{read_element, ReadContext};
use crate::error::VectorierLevelError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Name of the untagged node all imported groups hang under
    pub root_name: String,
    /// Remove the kind of every node nested in an imported container
    pub untag_children: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            root_name: "Import".to_string(),
            untag_children: false,
        }
    }
}

/// Layout of a level document
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocumentShape<'a> {
    /// `Track` of depth groups
    Level(&'a DocumentElement),
    /// `Objects` library holding at least one `Object`
    Objects(&'a DocumentElement),
}

pub fn detect_shape(document: &Document) -> Result<DocumentShape<'_>, VectorierLevelError> {
    let root = document.root();
    if let Some(track) = root.child("Track") {
        return Ok(DocumentShape::Level(track));
    }
    root.children_named("Objects")
        .find(|objects| objects.child("Object").is_some())
        .map(DocumentShape::Objects)
        .ok_or_else(|| {
            VectorierLevelError::FormatError(format!(
                "expected <Track> or a populated <Objects> under <{}>",
                root.name()
            ))
        })
}

/// Rebuilds the nodes described by `document` under a new root of `graph`.
///
/// Nodes are built in a scratch graph first; `graph` is only modified when
/// the whole document was read successfully. Returns the import root.
#[tracing::instrument(skip_all)]
pub fn import_document(
    graph: &mut SceneGraph,
    document: &Document,
    options: &ImportOptions,
) -> Result<NodeId, VectorierLevelError> {
    let shape = detect_shape(document)?;

    let mut scratch = SceneGraph::with_layers(graph.layers.clone());
    let import_root = scratch.add_root(SceneNode::new(options.root_name.as_str()));

    match shape {
        DocumentShape::Level(track) => {
            for group in track.children_named("Object") {
                let factor = group.attribute("Factor").unwrap_or_default();
                let layer = layer_for_factor(&scratch, factor);
                let container = scratch.add_child(
                    import_root,
                    SceneNode::new(format!("Factor_{factor}")).with_layer(layer),
                )?;
                if let Some(content) = group.child("Content") {
                    read_children(&mut scratch, layer, content, container)?;
                }
            }
        }
        DocumentShape::Objects(objects) => {
            let layer = layer_for_factor(&scratch, "1");
            for entry in objects.children_named("Object") {
                let Some(content) = entry.child("Content") else {
                    continue;
                };
                let created = read_children(&mut scratch, layer, content, import_root)?;
                // The entry names the single node its content describes
                if let (Some(name), [id]) = (entry.attribute("Name"), created.as_slice()) {
                    if !name.is_empty() {
                        scratch[*id].name = name.to_string();
                    }
                }
            }
        }
    }

    if options.untag_children {
        untag_nested(&mut scratch);
    }

    let count = scratch.len() - 1;
    let roots = graph.append(scratch, None)?;
    info!("Imported {count} nodes under `{}`", options.root_name);
    roots
        .first()
        .copied()
        .ok_or_else(|| VectorierLevelError::InputError("import produced no root".to_string()))
}

/// Loads and imports the document at `path`
pub fn import_from_path(
    graph: &mut SceneGraph,
    path: &Path,
    options: &ImportOptions,
) -> Result<NodeId, VectorierLevelError> {
    if !path.is_file() {
        return Err(VectorierLevelError::InputError(format!(
            "document not found: {}",
            path.display()
        )));
    }
    let document = Document::load(path)?;
    import_document(graph, &document, options)
}

/// Reads every element of `content` under `parent`, returning the nodes made
fn read_children(
    graph: &mut SceneGraph,
    layer: u32,
    content: &DocumentElement,
    parent: NodeId,
) -> Result<Vec<NodeId>, VectorierLevelError> {
    let mut ctx = ReadContext { graph, layer };
    let mut created = Vec::new();
    for element in content.children() {
        created.extend(read_element(&mut ctx, element, parent)?);
    }
    Ok(created)
}

fn layer_for_factor(graph: &SceneGraph, factor: &str) -> u32 {
    graph.layers.layer_for_label(factor).unwrap_or_else(|| {
        warn!("Layer `{factor}` does not exist, using the default layer");
        0
    })
}

fn untag_nested(graph: &mut SceneGraph) {
    let nested: Vec<NodeId> = graph
        .depth_first()
        .into_iter()
        .filter(|id| graph.has_ancestor_of_kind(*id, NodeKind::Object))
        .collect();
    for id in nested {
        graph[id].kind = None;
    }
}
