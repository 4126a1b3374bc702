use thiserror::Error;

use crate::node::NodeId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneGraphError {
    #[error("Unknown scene node: `{0}`")]
    UnknownNode(NodeId),

    #[error("Transform of the parent of node `{0}` cannot be inverted")]
    NonInvertibleTransform(NodeId),

    #[error("No node named `{0}`")]
    NodeNotFound(String),

    #[error("Invalid scene graph structure: {0}")]
    InvalidStructure(String),
}
