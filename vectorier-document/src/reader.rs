use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::element::DocumentElement;
use crate::error::DocumentError;

/// Parses all top level elements of `xml`.
///
/// Declarations, comments, processing instructions and whitespace are skipped.
/// Text content is not part of the level format and is dropped.
pub(crate) fn parse_elements(xml: &str) -> Result<Vec<DocumentElement>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<DocumentElement> = Vec::new();
    let mut top_level: Vec<DocumentElement> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(read_element(&start)?),
            Event::Empty(start) => {
                let element = read_element(&start)?;
                attach(&mut stack, &mut top_level, element);
            }
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| {
                    DocumentError::Malformed(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                attach(&mut stack, &mut top_level, element);
            }
            Event::Text(_) | Event::CData(_) => {
                tracing::debug!("Skipping text content in level document");
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DocumentError::Malformed(format!(
            "element <{}> is never closed",
            open.name()
        )));
    }

    Ok(top_level)
}

fn read_element(start: &BytesStart) -> Result<DocumentElement, DocumentError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| DocumentError::Malformed(format!("invalid tag name: {e}")))?
        .to_string();

    let mut element = DocumentElement::new(name);
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|e| DocumentError::Malformed(format!("invalid attribute name: {e}")))?
            .to_string();
        let value = attribute.unescape_value()?;
        element.set_attribute(&key, value.as_ref());
    }
    Ok(element)
}

fn attach(
    stack: &mut [DocumentElement],
    top_level: &mut Vec<DocumentElement>,
    element: DocumentElement,
) {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_child(element);
        }
        None => top_level.push(element),
    }
}
