/// Document units per scene unit
pub const SCENE_TO_DOCUMENT: f32 = 100.0;

/// Scene position (Y up) to document position (Y down)
pub fn to_document(position: [f32; 2]) -> [f32; 2] {
    [position[0] * SCENE_TO_DOCUMENT, position[1] * -SCENE_TO_DOCUMENT]
}

/// Inverse of [`to_document`]. Picks the scene value that converts back to
/// exactly the same document value whenever one exists.
pub fn to_scene(position: [f32; 2]) -> [f32; 2] {
    [coordinate_to_scene(position[0]), -coordinate_to_scene(position[1])]
}

/// Scene length to document length. Lengths keep their sign.
pub fn length_to_document(length: f32) -> f32 {
    length * SCENE_TO_DOCUMENT
}

/// Scale that stretches `native` pixels to exactly `length` when written
/// back as `native as f32 * scale`. `None` for an empty native size or when
/// no f32 scale hits `length`.
pub fn scale_for_length(length: f32, native: u32) -> Option<f32> {
    if native == 0 {
        return None;
    }
    let native = native as f32;
    let estimate = length / native;
    solve_monotone(estimate, search_span(estimate), length, |scale| native * scale)
}

fn coordinate_to_scene(document: f32) -> f32 {
    let estimate = document / SCENE_TO_DOCUMENT;
    solve_monotone(estimate, search_span(estimate), document, |scene| {
        scene * SCENE_TO_DOCUMENT
    })
    .unwrap_or(estimate)
}

/// Half-width of the window searched around an estimate of `magnitude`
pub(crate) fn search_span(magnitude: f32) -> f32 {
    magnitude.abs() * 8.0 * f32::EPSILON + f32::MIN_POSITIVE
}

/// Smallest f32 in `estimate ± span` that `forward` maps exactly onto
/// `target`. `forward` must be non-decreasing over the window.
pub(crate) fn solve_monotone<T, F>(estimate: f32, span: f32, target: T, forward: F) -> Option<f32>
where
    T: PartialOrd,
    F: Fn(f32) -> T,
{
    if !estimate.is_finite() || !span.is_finite() {
        return None;
    }
    let mut low = ordered_key(estimate - span);
    let mut high = ordered_key(estimate + span);
    if forward(from_ordered_key(high)) < target {
        return None;
    }
    while low < high {
        let middle = low + (high - low) / 2;
        if forward(from_ordered_key(middle)) >= target {
            high = middle;
        } else {
            low = middle + 1;
        }
    }
    let found = from_ordered_key(low);
    (forward(found) == target).then_some(found)
}

/// Maps a non-NaN f32 onto a u32 with the same ordering
fn ordered_key(value: f32) -> u32 {
    let bits = value.to_bits();
    if bits & 0x8000_0000 != 0 {
        !bits
    } else {
        bits | 0x8000_0000
    }
}

fn from_ordered_key(key: u32) -> f32 {
    if key & 0x8000_0000 != 0 {
        f32::from_bits(key & 0x7FFF_FFFF)
    } else {
        f32::from_bits(!key)
    }
}
