use vectorier_common::value::{format_f32, format_fixed};
use vectorier_document::DocumentElement;
use vectorier_scenegraph::dynamic::DynamicTransform;

/// Appends the `Dynamic` block of a container to its `Properties` element.
/// Nothing is written without transformations.
pub fn write_dynamic(dynamic: &DynamicTransform, properties: &mut DocumentElement) {
    if dynamic.transformations.is_empty() {
        return;
    }
    let element = properties.get_or_create_child("Dynamic");

    for transformation in &dynamic.transformations {
        let transform_element = element.add_child("Transformation");
        transform_element.set_attribute("Name", &transformation.name);

        for movement in &transformation.moves {
            let move_element = transform_element.add_child("Move");
            for (index, interval) in movement.intervals.iter().enumerate() {
                let interval_element = move_element.add_child("MoveInterval");
                interval_element
                    .set_attribute("Number", index + 1)
                    .set_attribute("FramesToMove", interval.frames_to_move)
                    .set_attribute("Delay", format_fixed(interval.delay, 1));

                interval_element
                    .add_child("Point")
                    .set_attribute("Name", "Start")
                    .set_attribute("X", 0.0f32)
                    .set_attribute("Y", 0.0f32);
                interval_element
                    .add_child("Point")
                    .set_attribute("Name", "Support")
                    .set_attribute("Number", 1)
                    .set_attribute("X", interval.support[0])
                    .set_attribute("Y", interval.support[1]);
                interval_element
                    .add_child("Point")
                    .set_attribute("Name", "Finish")
                    .set_attribute("X", interval.finish[0])
                    .set_attribute("Y", interval.finish[1]);
            }
        }

        for size in &transformation.sizes {
            transform_element
                .add_child("Size")
                .set_attribute("Frames", size.frames)
                .set_attribute("FinalWidth", size.final_width)
                .set_attribute("FinalHeight", size.final_height);
        }

        for rotation in &transformation.rotations {
            let anchor = format!(
                "{}|{}",
                format_f32(rotation.anchor[0]),
                format_f32(rotation.anchor[1])
            );
            transform_element
                .add_child("Rotation")
                .set_attribute("Angle", rotation.angle)
                .set_attribute("Anchor", anchor)
                .set_attribute("Frames", rotation.frames);
        }

        for color in &transformation.colors {
            transform_element
                .add_child("Color")
                .set_attribute("ColorStart", color.color_start.to_hex())
                .set_attribute("ColorFinish", color.color_finish.to_hex())
                .set_attribute("Frames", color.frames);
        }
    }
}
