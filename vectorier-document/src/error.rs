use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("XML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("Invalid XML attribute: {0}")]
    InvalidAttribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist document: {0}")]
    Persist(#[from] tempfile::PersistError),
}
