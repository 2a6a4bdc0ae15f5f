//! Planar rotation and the procedural agent silhouette.

use std::f32::consts::FRAC_PI_2;

/// Rotates `(x, y)` about the pivot `(cx, cy)`.
///
/// The angle convention treats `radians = PI / 2` as the rest pose: a quarter
/// turn is subtracted before rotating, so an agent's nose offset along `+x`
/// ends up pointing down-screen at angle zero. Clockwise on a y-down surface
/// corresponds to increasing angles.
pub fn rotate_about(cx: f32, cy: f32, x: f32, y: f32, radians: f32) -> (f32, f32) {
    let (sin, cos) = (radians - FRAC_PI_2).sin_cos();
    let nx = cos * (x - cx) + sin * (y - cy) + cx;
    let ny = cos * (y - cy) - sin * (x - cx) + cy;
    (nx, ny)
}

/// Silhouette vertices in units of agent size, nose first, relative to the
/// agent position. The outline closes from the last vertex back to the nose;
/// the two `y = +/-0.05` vertices pinch the body into the tail.
pub const FISH_OUTLINE: [(f32, f32); 7] = [
    (0.60, 0.0),
    (0.0, 0.30),
    (-0.30, 0.05),
    (-0.55, 0.25),
    (-0.55, -0.25),
    (-0.30, -0.05),
    (0.0, -0.30),
];

/// Triangulation of [`FISH_OUTLINE`] by vertex index: a fan over the convex
/// body pentagon plus two triangles for the tail quad. The outline is concave
/// at the pinch vertices, so a plain fan from the nose would spill outside
/// the silhouette.
pub const FISH_TRIANGLES: [[usize; 3]; 5] = [
    [0, 1, 2],
    [0, 2, 5],
    [0, 5, 6],
    [2, 3, 4],
    [2, 4, 5],
];

/// Computes the silhouette of an agent at `(x, y)` with the given size and
/// stored heading, as absolute surface coordinates.
///
/// Snapshot headings grow counter-clockwise while the surface transform
/// rotates clockwise, so the heading is negated before rotating.
pub fn fish_outline(x: f32, y: f32, size: f32, rotation: f32) -> [(f32, f32); 7] {
    let radians = -rotation;
    FISH_OUTLINE.map(|(dx, dy)| rotate_about(x, y, x + dx * size, y + dy * size, radians))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn assert_point_eq(actual: (f32, f32), expected: (f32, f32), label: &str) {
        assert!(
            (actual.0 - expected.0).abs() < EPSILON && (actual.1 - expected.1).abs() < EPSILON,
            "{label}: got ({}, {}), expected ({}, {})",
            actual.0,
            actual.1,
            expected.0,
            expected.1
        );
    }

    // -- 1. Rotation transform ----------------------------------------------

    #[test]
    fn quarter_turn_angle_is_the_rest_pose() {
        let (x, y) = rotate_about(3.0, 4.0, 7.0, 9.0, FRAC_PI_2);
        assert_point_eq((x, y), (7.0, 9.0), "rest pose must not move points");
    }

    #[test]
    fn zero_angle_sends_nose_offset_down_screen() {
        // An offset along +x from the pivot lands along +y at angle zero.
        let (x, y) = rotate_about(10.0, 20.0, 13.0, 20.0, 0.0);
        assert_point_eq((x, y), (10.0, 23.0), "zero angle");
    }

    #[test]
    fn pivot_is_a_fixed_point_at_any_angle() {
        for radians in [-2.5, 0.0, 0.7, FRAC_PI_2, 3.0] {
            let (x, y) = rotate_about(5.0, -2.0, 5.0, -2.0, radians);
            assert_point_eq((x, y), (5.0, -2.0), "pivot moved");
        }
    }

    #[test]
    fn rotation_preserves_distance_to_pivot() {
        let (cx, cy) = (2.0_f32, 8.0_f32);
        let (px, py) = (6.5_f32, 5.0_f32);
        let original = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
        for radians in [-1.0, 0.0, 0.3, 1.9, 4.4] {
            let (x, y) = rotate_about(cx, cy, px, py, radians);
            let rotated = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            assert!(
                (rotated - original).abs() < EPSILON,
                "distance changed at angle {radians}: {rotated} vs {original}"
            );
        }
    }

    // -- 2. Silhouette ------------------------------------------------------

    #[test]
    fn outline_at_zero_heading_matches_reference_points() {
        // Agent centered at (50, 50) with size 4 on a 100 x 100 surface.
        let outline = fish_outline(50.0, 50.0, 4.0, 0.0);
        let expected = [
            (50.0, 52.4),
            (48.8, 50.0),
            (49.8, 48.8),
            (49.0, 47.8),
            (51.0, 47.8),
            (50.2, 48.8),
            (51.2, 50.0),
        ];
        for (i, (actual, expected)) in outline.iter().zip(expected).enumerate() {
            assert_point_eq(*actual, expected, &format!("outline vertex {i}"));
        }
    }

    #[test]
    fn outline_scales_with_size() {
        let small = fish_outline(0.0, 0.0, 1.0, 0.5);
        let large = fish_outline(0.0, 0.0, 3.0, 0.5);
        for (s, l) in small.iter().zip(large) {
            assert_point_eq((s.0 * 3.0, s.1 * 3.0), l, "scaled vertex");
        }
    }

    // -- 3. Triangulation ---------------------------------------------------

    fn triangle_area(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> f32 {
        0.5 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1)).abs()
    }

    #[test]
    fn triangles_tile_the_outline_exactly() {
        // Shoelace area of the closed outline.
        let mut doubled = 0.0_f32;
        for i in 0..FISH_OUTLINE.len() {
            let (x0, y0) = FISH_OUTLINE[i];
            let (x1, y1) = FISH_OUTLINE[(i + 1) % FISH_OUTLINE.len()];
            doubled += x0 * y1 - x1 * y0;
        }
        let outline_area = 0.5 * doubled.abs();

        // A triangulation that overlapped itself or spilled past the concave
        // pinch would cover more area than the outline encloses.
        let tiled: f32 = FISH_TRIANGLES
            .iter()
            .map(|&[a, b, c]| triangle_area(FISH_OUTLINE[a], FISH_OUTLINE[b], FISH_OUTLINE[c]))
            .sum();
        assert!(
            (tiled - outline_area).abs() < EPSILON,
            "triangles cover {tiled}, outline encloses {outline_area}"
        );
    }

    #[test]
    fn every_outline_vertex_is_referenced_by_a_triangle() {
        for index in 0..FISH_OUTLINE.len() {
            assert!(
                FISH_TRIANGLES.iter().flatten().any(|&i| i == index),
                "vertex {index} unused"
            );
        }
    }
}
