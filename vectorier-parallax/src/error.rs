use thiserror::Error;
use vectorier_scenegraph::error::SceneGraphError;
use vectorier_scenegraph::NodeId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParallaxError {
    #[error("Parallax is already active")]
    AlreadyActive,

    #[error("Camera node `{0}` is not part of the scene")]
    UnknownCamera(NodeId),

    #[error("Scene graph error: {0}")]
    SceneGraphError(#[from] SceneGraphError),
}
