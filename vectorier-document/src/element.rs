use indexmap::IndexMap;
use vectorier_common::value::AttributeValue;

use crate::error::DocumentError;
use crate::reader::parse_elements;

/// An element of a level document.
///
/// Attributes keep their insertion order, and overwriting an attribute keeps
/// its original slot. Children are kept in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentElement {
    name: String,
    attributes: IndexMap<String, String>,
    children: Vec<DocumentElement>,
}

impl DocumentElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Parses a sequence of sibling elements, e.g. the raw body of a `Models` block
    pub fn parse_fragment(xml: &str) -> Result<Vec<DocumentElement>, DocumentError> {
        parse_elements(xml)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<AttributeValue>) -> &mut Self {
        self.attributes
            .insert(name.to_string(), value.into().to_invariant_string());
        self
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    pub fn children(&self) -> &[DocumentElement] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<DocumentElement> {
        &mut self.children
    }

    /// First child with the given tag name
    pub fn child(&self, name: &str) -> Option<&DocumentElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut DocumentElement> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    pub fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a DocumentElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Appends a new child after the existing children and returns it
    pub fn add_child(&mut self, name: impl Into<String>) -> &mut DocumentElement {
        self.push_child(DocumentElement::new(name))
    }

    pub fn push_child(&mut self, element: DocumentElement) -> &mut DocumentElement {
        let index = self.children.len();
        self.children.push(element);
        &mut self.children[index]
    }

    /// Returns the first child named `name`, creating it if there is none
    pub fn get_or_create_child(&mut self, name: &str) -> &mut DocumentElement {
        match self.children.iter().position(|c| c.name == name) {
            Some(index) => &mut self.children[index],
            None => self.add_child(name),
        }
    }

    /// An element with neither attributes nor children
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// Recursively removes every descendant that ends up empty.
    /// The element itself is kept even when empty.
    pub fn remove_empty_elements(&mut self) {
        for child in &mut self.children {
            child.remove_empty_elements();
        }
        self.children.retain(|c| !c.is_empty());
    }
}
