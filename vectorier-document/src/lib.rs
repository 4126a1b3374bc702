pub mod document;
pub mod element;
pub mod error;
mod reader;
mod writer;

pub use document::Document;
pub use element::DocumentElement;
pub use error::DocumentError;
