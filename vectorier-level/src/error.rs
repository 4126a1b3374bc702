use thiserror::Error;
use vectorier_document::DocumentError;
use vectorier_scenegraph::error::SceneGraphError;

#[derive(Error, Debug)]
pub enum VectorierLevelError {
    #[error("Invalid input: {0}")]
    InputError(String),

    #[error("Unrecognized document: {0}")]
    FormatError(String),

    #[error("Malformed `{attribute}` attribute on <{element}>: `{value}`")]
    MalformedAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("Document error: {0}")]
    DocumentError(#[from] DocumentError),

    #[error("Scene graph error: {0}")]
    SceneGraphError(#[from] SceneGraphError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl VectorierLevelError {
    /// Malformed numeric attributes count as format errors
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            VectorierLevelError::FormatError(_) | VectorierLevelError::MalformedAttribute { .. }
        )
    }
}
