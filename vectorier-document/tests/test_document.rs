use std::fs;

use vectorier_document::{Document, DocumentElement, DocumentError};

fn sample_document() -> Document {
    let mut document = Document::create("Root");
    let track = document.root_mut().add_child("Track");
    let group = track.add_child("Object");
    group.set_attribute("Factor", 0.5f32);
    let content = group.add_child("Content");
    content
        .add_child("Platform")
        .set_attribute("X", 100.0f32)
        .set_attribute("Y", -100.0f32)
        .set_attribute("Width", 300)
        .set_attribute("Height", 20);
    content
        .add_child("Object")
        .set_attribute("Name", "Crate & \"Co\"");
    document
}

#[test]
fn test_canonical_text_form() {
    let xml = sample_document().to_xml_string().unwrap();
    let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<Root>
  <Track>
    <Object Factor="0.5">
      <Content>
        <Platform X="100" Y="-100" Width="300" Height="20"/>
        <Object Name="Crate &amp; &quot;Co&quot;"/>
      </Content>
    </Object>
  </Track>
</Root>
"#;
    assert_eq!(xml, expected);
}

#[test]
fn test_parse_preserves_attribute_and_child_order() {
    let document = Document::parse(
        r#"<?xml version="1.0"?>
        <!-- exported level -->
        <Root>
            <Objects Name="Money"/>
            <Track>
                <Object Factor="1"><Content><Camera Y="-5" X="10"/></Content></Object>
            </Track>
        </Root>"#,
    )
    .unwrap();

    let root = document.root();
    assert_eq!(root.name(), "Root");
    let names: Vec<_> = root.children().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["Objects", "Track"]);

    let camera = &root.child("Track").unwrap().children()[0]
        .child("Content")
        .unwrap()
        .children()[0];
    let attributes: Vec<_> = camera.attributes().collect();
    assert_eq!(attributes, vec![("Y", "-5"), ("X", "10")]);
}

#[test]
fn test_save_then_load_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.xml");

    let document = sample_document();
    document.save(&path).unwrap();
    let first = fs::read_to_string(&path).unwrap();

    let loaded = Document::load(&path).unwrap();
    assert_eq!(loaded, document);
    assert_eq!(loaded.root().children()[0].children()[0].children()[0].children()[1].attribute("Name"), Some("Crate & \"Co\""));

    loaded.save(&path).unwrap();
    let second = fs::read_to_string(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_save_normalizes_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.xml");
    fs::write(
        &path,
        "<?xml version='1.0'?>\r\n<!-- hand edited -->\n<Root>\t<Track><Object Factor=\"0.5\">\n\n\
         <Content>\t\t<Platform X=\"100\" Y=\"-100\" Width=\"300\" Height=\"20\"></Platform>\n\
         <Object Name=\"Crate &amp; &quot;Co&quot;\" /></Content></Object></Track></Root>",
    )
    .unwrap();

    let loaded = Document::load(&path).unwrap();
    assert_eq!(loaded, sample_document());
    loaded.save(&path).unwrap();
    let saved = fs::read_to_string(&path).unwrap();
    assert_eq!(saved, sample_document().to_xml_string().unwrap());

    Document::load(&path).unwrap().save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), saved);
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("level.xml");
    fs::write(&path, "stale").unwrap();

    Document::create("Root").save(&path).unwrap();
    let loaded = Document::load(&path).unwrap();
    assert_eq!(loaded.root().name(), "Root");
    assert!(loaded.root().children().is_empty());
}

#[test]
fn test_save_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("level.xml");
    let result = Document::create("Root").save(&path);
    assert!(matches!(result, Err(DocumentError::Io(_))));
    assert!(!path.exists());
}

#[test]
fn test_malformed_documents_are_rejected() {
    assert!(Document::parse("<Root><Track></Root>").is_err());
    assert!(Document::parse("<Root>").is_err());
    assert!(matches!(
        Document::parse("<A/><B/>"),
        Err(DocumentError::Malformed(_))
    ));
    assert!(matches!(
        Document::parse(""),
        Err(DocumentError::Malformed(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Document::load(dir.path().join("nope.xml"));
    assert!(matches!(result, Err(DocumentError::Io(_))));
}

#[test]
fn test_parse_fragment() {
    let elements = DocumentElement::parse_fragment(
        r#"<Model Name="hunter" X="0"/>
           <Model Name="runner" X="10"><Properties/></Model>"#,
    )
    .unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].attribute("Name"), Some("hunter"));
    assert_eq!(elements[1].children()[0].name(), "Properties");
}
