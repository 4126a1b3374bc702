pub mod build;
pub mod dynamic;
pub mod elements;
pub mod error;
pub mod export;
pub mod import;
pub mod naming;

pub use build::{build, BuildConfig};
pub use error::VectorierLevelError;
pub use export::{export_document, export_to_path, ExportMode};
pub use import::{import_document, import_from_path, ImportOptions};
