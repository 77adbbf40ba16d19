//! Geometry primitives over landmarks: planar distance, vector angles and
//! finger curl.

use super::landmarks::Landmark;

/// Euclidean distance in the image plane. Depth is ignored.
pub fn distance(a: &Landmark, b: &Landmark) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angle in degrees between two 3D vectors, in [0, 180].
///
/// A zero-length vector counts as fully bent and yields 180.
pub fn vector_angle_degrees(v1: [f32; 3], v2: [f32; 3]) -> f32 {
    let dot = v1[0] * v2[0] + v1[1] * v2[1] + v1[2] * v2[2];
    let m1 = (v1[0] * v1[0] + v1[1] * v1[1] + v1[2] * v1[2]).sqrt();
    let m2 = (v2[0] * v2[0] + v2[1] * v2[1] + v2[2] * v2[2]).sqrt();

    if m1 * m2 == 0.0 {
        return 180.0;
    }

    let cos_a = (dot / (m1 * m2)).clamp(-1.0, 1.0);
    cos_a.acos().to_degrees()
}

fn segment(from: &Landmark, to: &Landmark) -> [f32; 3] {
    [to.x - from.x, to.y - from.y, to.z - from.z]
}

/// Bend of a finger: angle between the MCP→PIP and PIP→tip segments.
///
/// Near 0 is a straight finger, large values a curled one.
pub fn finger_curl_angle(landmarks: &[Landmark], mcp: usize, pip: usize, tip: usize) -> f32 {
    let v1 = segment(&landmarks[mcp], &landmarks[pip]);
    let v2 = segment(&landmarks[pip], &landmarks[tip]);
    vector_angle_degrees(v1, v2)
}
