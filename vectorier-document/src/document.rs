use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::element::DocumentElement;
use crate::error::DocumentError;
use crate::reader::parse_elements;
use crate::writer::write_document;

/// A level document: a single root element and its subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: DocumentElement,
}

impl Document {
    pub fn create(root_name: &str) -> Self {
        Self {
            root: DocumentElement::new(root_name),
        }
    }

    pub fn from_root(root: DocumentElement) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &DocumentElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut DocumentElement {
        &mut self.root
    }

    pub fn into_root(self) -> DocumentElement {
        self.root
    }

    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let mut elements = parse_elements(xml)?;
        if elements.len() != 1 {
            return Err(DocumentError::Malformed(format!(
                "expected a single root element, found {}",
                elements.len()
            )));
        }
        Ok(Self {
            root: elements.remove(0),
        })
    }

    /// Reads and parses the file at `path`. Only the element tree is kept:
    /// indentation, comments and the declaration of the file are dropped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let xml = fs::read_to_string(path)?;
        let document = Self::parse(&xml)?;
        tracing::debug!("Loaded document {}", path.display());
        Ok(document)
    }

    /// Canonical text form: declaration, two space indentation and
    /// self-closing childless elements. The layout of a loaded file is not
    /// preserved, so saving normalizes it.
    pub fn to_xml_string(&self) -> Result<String, DocumentError> {
        write_document(&self.root)
    }

    /// Writes the canonical form of [`Document::to_xml_string`] next to `path`
    /// and atomically moves it into place, so a failed save never leaves a
    /// partially written file behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let xml = self.to_xml_string()?;

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(directory)?;
        file.write_all(xml.as_bytes())?;
        file.flush()?;
        file.persist(path)?;

        tracing::debug!("Saved document {}", path.display());
        Ok(())
    }

    pub fn remove_empty_elements(&mut self) {
        self.root.remove_empty_elements();
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
