use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::element::DocumentElement;
use crate::error::DocumentError;

const INDENT_SIZE: usize = 2;

/// Canonical text form: XML declaration, two space indentation, self closing
/// childless elements and a trailing newline.
pub(crate) fn write_document(root: &DocumentElement) -> Result<String, DocumentError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_element(&mut writer, root)?;

    let mut xml = String::from_utf8(writer.into_inner())
        .map_err(|e| DocumentError::Malformed(format!("document is not valid UTF-8: {e}")))?;
    xml.push('\n');
    Ok(xml)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &DocumentElement,
) -> Result<(), DocumentError> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key, value));
    }

    if element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in element.children() {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}
