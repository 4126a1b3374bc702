use vectorier_document::Document;
use vectorier_level::import::detect_shape;
use vectorier_level::{export_document, import_document, import_from_path, ExportMode, ImportOptions, VectorierLevelError};
use vectorier_scenegraph::components::{CameraSettings, SelectionVariant, SpriteRenderer};
use vectorier_scenegraph::layers::LayerNames;
use vectorier_scenegraph::{NodeKind, SceneGraph, SceneNode};

const BACKGROUND: u32 = 8;
const FOREGROUND: u32 = 9;

fn layers() -> LayerNames {
    let mut layers = LayerNames::default();
    layers.set_name(BACKGROUND, "0.5");
    layers.set_name(FOREGROUND, "1");
    layers
}

fn sprite(texture: &str, size: [u32; 2], sorting_order: i32) -> SpriteRenderer {
    let mut sprite = SpriteRenderer::new(texture, size);
    sprite.sorting_order = sorting_order;
    sprite
}

fn sample_scene() -> SceneGraph {
    let mut graph = SceneGraph::with_layers(layers());
    let level = graph.add_root(SceneNode::new("Level"));

    graph
        .add_child(
            level,
            SceneNode::tagged("Beam", NodeKind::Image)
                .with_position(2.0, -3.0)
                .with_rotation(90.0)
                .with_layer(BACKGROUND)
                .with_sprite(sprite("beam", [100, 50], 2)),
        )
        .unwrap();
    graph
        .add_child(
            level,
            SceneNode::tagged("Sky", NodeKind::Image)
                .with_position(1.0, 0.0)
                .with_layer(BACKGROUND)
                .with_sprite(sprite("sky", [64, 32], 1)),
        )
        .unwrap();
    graph
        .add_child(
            level,
            SceneNode::tagged("Floor", NodeKind::Platform)
                .with_position(0.0, -4.0)
                .with_scale(3.0, 0.2)
                .with_layer(BACKGROUND)
                .with_sprite(SpriteRenderer::new("platform", [100, 100])),
        )
        .unwrap();

    let mut crate_node = SceneNode::tagged("Crate (2)", NodeKind::Object)
        .with_position(4.0, 1.0)
        .with_layer(FOREGROUND);
    crate_node.selection = Some(SelectionVariant::HunterMode);
    let container = graph.add_child(level, crate_node).unwrap();
    graph
        .add_child(
            container,
            SceneNode::tagged("Lid", NodeKind::Image)
                .with_position(0.5, 0.0)
                .with_sprite(SpriteRenderer::new("lid", [50, 50])),
        )
        .unwrap();
    graph
        .add_child(
            container,
            SceneNode::tagged("Ledge", NodeKind::Platform)
                .with_position(0.0, -1.0)
                .with_scale(2.0, 1.0)
                .with_sprite(SpriteRenderer::new("platform", [100, 100])),
        )
        .unwrap();

    let mut camera = SceneNode::tagged("Camera", NodeKind::Camera).with_position(-1.0, 2.0);
    camera.camera = Some(CameraSettings::default());
    graph.add_child(level, camera).unwrap();
    graph
}

fn export_text(graph: &SceneGraph, mode: ExportMode) -> String {
    let mut document = export_document(graph, mode, None).unwrap();
    document.remove_empty_elements();
    document.to_xml_string().unwrap()
}

#[test]
fn test_level_round_trip() {
    let first = export_text(&sample_scene(), ExportMode::Level);

    let mut imported = SceneGraph::with_layers(layers());
    import_document(&mut imported, &Document::parse(&first).unwrap(), &ImportOptions::default()).unwrap();
    let second = export_text(&imported, ExportMode::Level);

    assert_eq!(first, second);
}

fn fractional_scene() -> SceneGraph {
    let mut graph = SceneGraph::with_layers(layers());
    let level = graph.add_root(SceneNode::new("Level"));

    let images = [
        ("Sky", [1.234, -0.57], 0.0, false, [101, 33], [1.3, 0.7]),
        ("Beam", [0.37, -2.05], 90.0, false, [77, 19], [1.7, 0.35]),
        ("Banner", [-3.71, 12.05], 270.0, true, [64, 9], [0.9, 1.1]),
        ("Wheel", [0.003, 2.5], 180.0, false, [33, 33], [0.15, 0.15]),
    ];
    for (order, (name, [x, y], rotation, flip_x, size, [scale_x, scale_y])) in images.into_iter().enumerate() {
        let mut sprite = sprite(&name.to_lowercase(), size, order as i32);
        sprite.flip_x = flip_x;
        let node = SceneNode::tagged(name, NodeKind::Image)
            .with_position(x, y)
            .with_rotation(rotation)
            .with_scale(scale_x, scale_y)
            .with_layer(BACKGROUND)
            .with_sprite(sprite);
        graph.add_child(level, node).unwrap();
    }
    graph
        .add_child(
            level,
            SceneNode::tagged("Floor", NodeKind::Platform)
                .with_position(-1.11, 0.333)
                .with_scale(2.37, 0.13)
                .with_layer(BACKGROUND)
                .with_sprite(SpriteRenderer::new("platform", [100, 100])),
        )
        .unwrap();

    let container = graph
        .add_child(
            level,
            SceneNode::tagged("Crate", NodeKind::Object)
                .with_position(4.4, 1.3)
                .with_layer(FOREGROUND),
        )
        .unwrap();
    graph
        .add_child(
            container,
            SceneNode::tagged("Lid", NodeKind::Image)
                .with_position(0.25, -0.1)
                .with_scale(0.6, 0.45)
                .with_sprite(SpriteRenderer::new("lid", [50, 50])),
        )
        .unwrap();

    let mut camera = SceneNode::tagged("Camera", NodeKind::Camera).with_position(0.1, 0.2);
    camera.camera = Some(CameraSettings::default());
    graph.add_child(level, camera).unwrap();
    graph
}

#[test]
fn test_fractional_level_round_trip() {
    let first = export_text(&fractional_scene(), ExportMode::Level);
    assert!(first.contains(r#"Height="23.1""#), "{first}");

    let mut imported = SceneGraph::with_layers(layers());
    import_document(&mut imported, &Document::parse(&first).unwrap(), &ImportOptions::default()).unwrap();
    let second = export_text(&imported, ExportMode::Level);
    assert_eq!(first, second);

    let mut again = SceneGraph::with_layers(layers());
    import_document(&mut again, &Document::parse(&second).unwrap(), &ImportOptions::default()).unwrap();
    assert_eq!(export_text(&again, ExportMode::Level), second);
}

#[test]
fn test_objects_round_trip_keeps_names() {
    let mut scene = SceneGraph::new();
    scene.add_root(
        SceneNode::tagged("Sign (1)", NodeKind::Image)
            .with_position(0.4, -0.3)
            .with_scale(1.1, 0.9)
            .with_sprite(SpriteRenderer::new("sign_texture", [40, 20])),
    );
    scene.add_root(
        SceneNode::tagged("Ledge", NodeKind::Platform)
            .with_position(1.5, 0.25)
            .with_scale(1.2, 0.3)
            .with_sprite(SpriteRenderer::new("platform", [100, 100])),
    );
    let first = export_text(&scene, ExportMode::Objects);
    assert!(first.contains(r#"<Object Name="Sign">"#), "{first}");

    let mut imported = SceneGraph::new();
    let root = import_document(&mut imported, &Document::parse(&first).unwrap(), &ImportOptions::default()).unwrap();
    let names: Vec<_> = imported.children(root).iter().map(|id| imported[*id].name.as_str()).collect();
    assert_eq!(names, vec!["Sign", "Ledge"]);
    assert_eq!(export_text(&imported, ExportMode::Objects), first);
}

#[test]
fn test_import_structure() {
    let xml = export_text(&sample_scene(), ExportMode::Level);
    let mut graph = SceneGraph::with_layers(layers());
    let root = import_document(&mut graph, &Document::parse(&xml).unwrap(), &ImportOptions::default()).unwrap();

    assert_eq!(graph[root].name, "Import");
    assert!(!graph[root].is_tagged());
    let groups: Vec<_> = graph.children(root).iter().map(|id| graph[*id].name.clone()).collect();
    assert_eq!(groups, vec!["Factor_0.5", "Factor_1"]);

    let background = graph.children(root)[0];
    assert_eq!(graph[background].layer, BACKGROUND);
    for id in graph.children(background) {
        assert_eq!(graph[*id].layer, BACKGROUND);
    }

    let foreground = graph.children(root)[1];
    let container = graph.find_child(foreground, "Crate").unwrap();
    assert_eq!(graph[container].kind, Some(NodeKind::Object));
    assert_eq!(graph[container].position, [4.0, 1.0]);
    assert_eq!(graph[container].selection, Some(SelectionVariant::HunterMode));
    assert_eq!(graph.children(container).len(), 2);

    let floor = graph
        .children(background)
        .iter()
        .copied()
        .find(|id| graph[*id].is_kind(NodeKind::Platform))
        .unwrap();
    assert_eq!(graph[floor].position, [0.0, -4.0]);
    assert_eq!(graph[floor].scale, [3.0, 0.2]);

    let beam = graph.find_child(background, "beam").unwrap();
    assert_eq!(graph[beam].rotation, 90.0);
    assert_eq!(graph[beam].position, [2.0, -3.0]);
    assert_eq!(graph[beam].sprite.as_ref().unwrap().native_size, [100, 50]);

    let camera = graph.find_child(foreground, "Camera").unwrap();
    assert_eq!(graph[camera].camera, Some(CameraSettings { orthographic_size: 4.0 }));
    assert_eq!(graph[camera].position, [-1.0, 2.0]);
}

#[test]
fn test_import_unit_conversion() {
    let document = Document::parse(
        r#"<Root><Track><Object Factor="1"><Content>
            <Camera X="100" Y="-100"/>
            <Object Name="Box" BoxX="-50" BoxY="250"/>
            <Object/>
        </Content></Object></Track></Root>"#,
    )
    .unwrap();
    let mut graph = SceneGraph::with_layers(layers());
    let root = import_document(&mut graph, &document, &ImportOptions::default()).unwrap();
    let group = graph.children(root)[0];
    let nodes = graph.children(group);
    assert_eq!(graph[nodes[0]].position, [1.0, 1.0]);
    assert_eq!(graph[nodes[1]].position, [-0.5, -2.5]);
    assert_eq!(graph[nodes[2]].name, "Object");
    assert_eq!(graph[nodes[2]].position, [0.0, 0.0]);
}

#[test]
fn test_unsupported_elements_are_skipped() {
    let document = Document::parse(
        r#"<Root><Track><Object Factor="1"><Content>
            <Trigger Name="Start" X="0" Y="0"/>
            <Banner X="1" Y="1"/>
            <Platform X="0" Y="0" Width="100" Height="100"/>
        </Content></Object></Track></Root>"#,
    )
    .unwrap();
    let mut graph = SceneGraph::new();
    let root = import_document(&mut graph, &document, &ImportOptions::default()).unwrap();
    let group = graph.children(root)[0];
    let nodes = graph.children(group);
    assert_eq!(nodes.len(), 1);
    assert_eq!(graph[nodes[0]].kind, Some(NodeKind::Platform));
}

#[test]
fn test_missing_layer_uses_default() {
    let document = Document::parse(
        r#"<Root><Track><Object Factor="0.25"><Content><Camera X="0" Y="0"/></Content></Object></Track></Root>"#,
    )
    .unwrap();
    let mut graph = SceneGraph::with_layers(layers());
    let root = import_document(&mut graph, &document, &ImportOptions::default()).unwrap();
    let group = graph.children(root)[0];
    assert_eq!(graph[group].name, "Factor_0.25");
    assert_eq!(graph[group].layer, 0);
    assert_eq!(graph[graph.children(group)[0]].layer, 0);
}

#[test]
fn test_objects_document_import() {
    let mut scene = SceneGraph::new();
    scene.add_root(SceneNode::tagged("Ledge", NodeKind::Platform).with_sprite(SpriteRenderer::new("platform", [100, 100])));
    let container = scene.add_root(SceneNode::tagged("Crate", NodeKind::Object));
    scene
        .add_child(container, SceneNode::tagged("Lid", NodeKind::Image).with_sprite(SpriteRenderer::new("lid", [50, 50])))
        .unwrap();
    let xml = export_text(&scene, ExportMode::Objects);

    let mut graph = SceneGraph::new();
    let options = ImportOptions {
        root_name: "objects.xml".to_string(),
        untag_children: true,
    };
    let root = import_document(&mut graph, &Document::parse(&xml).unwrap(), &options).unwrap();
    assert_eq!(graph[root].name, "objects.xml");

    let nodes = graph.children(root);
    assert_eq!(nodes.len(), 2);
    assert_eq!(graph[nodes[0]].kind, Some(NodeKind::Platform));
    assert_eq!(graph[nodes[1]].kind, Some(NodeKind::Object));
    let lid = graph.children(nodes[1])[0];
    assert_eq!(graph[lid].kind, None);
    assert!(graph[lid].sprite.is_some());
}

#[test]
fn test_unrecognized_document_leaves_scene_unchanged() {
    let mut graph = sample_scene();
    let before = graph.clone();

    for xml in [
        r#"<Root><Objects Name="Money"/></Root>"#,
        r#"<Root><Sets/></Root>"#,
    ] {
        let document = Document::parse(xml).unwrap();
        assert!(detect_shape(&document).is_err());
        let result = import_document(&mut graph, &document, &ImportOptions::default());
        assert!(matches!(result, Err(VectorierLevelError::FormatError(_))));
        assert_eq!(graph, before);
    }
}

#[test]
fn test_malformed_number_leaves_scene_unchanged() {
    let mut graph = sample_scene();
    let before = graph.clone();
    let document = Document::parse(
        r#"<Root><Track><Object Factor="1"><Content>
            <Camera X="0" Y="0"/>
            <Platform X="1,5" Y="0" Width="100" Height="100"/>
        </Content></Object></Track></Root>"#,
    )
    .unwrap();

    let error = import_document(&mut graph, &document, &ImportOptions::default()).unwrap_err();
    assert!(error.is_format_error());
    match error {
        VectorierLevelError::MalformedAttribute { element, attribute, value } => {
            assert_eq!((element.as_str(), attribute.as_str(), value.as_str()), ("Platform", "X", "1,5"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(graph, before);
}

#[test]
fn test_import_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut graph = SceneGraph::new();
    let result = import_from_path(&mut graph, &dir.path().join("missing.xml"), &ImportOptions::default());
    assert!(matches!(result, Err(VectorierLevelError::InputError(_))));
    assert!(graph.is_empty());
}
