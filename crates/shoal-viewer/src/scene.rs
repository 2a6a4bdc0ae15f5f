//! Snapshot tessellation: a [`WorldSnapshot`] becomes colored triangles in
//! logical surface coordinates, ready for upload.
//!
//! Everything here is pure. The renderer only uploads what [`build_scene`]
//! returns, which keeps shape, color, and layering decisions testable
//! without a GPU.

use std::f32::consts::TAU;

use shoal_world::snapshot::WorldSnapshot;

use crate::geometry::{fish_outline, FISH_TRIANGLES};

/// Fraction of the logical surface width spanned by one agent.
pub const AGENT_SIZE_FRACTION: f32 = 0.04;

/// Fraction of the logical surface width used as the food disc radius.
pub const FOOD_RADIUS_FRACTION: f32 = 0.005;

/// Triangle-fan resolution of a food disc.
pub const CIRCLE_SEGMENTS: usize = 32;

/// Agent fill color, rgb(140, 170, 238).
pub const AGENT_COLOR: [f32; 4] = [0.549, 0.667, 0.933, 1.0];

/// Food fill color, rgb(166, 218, 149).
pub const FOOD_COLOR: [f32; 4] = [0.651, 0.855, 0.584, 1.0];

/// The logical drawing surface and its mapping to physical pixels.
///
/// World coordinates are normalized to `[0, 1]` on both axes; the viewport
/// stretches them over a logical `width x height` rectangle with `y` growing
/// down-screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    scale_factor: f32,
}

impl Viewport {
    /// Creates a viewport of `width x height` logical units, rendered at
    /// `scale_factor` physical pixels per unit.
    ///
    /// # Panics
    ///
    /// Panics if any argument is not strictly positive.
    pub fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0 && scale_factor > 0.0,
            "viewport dimensions and scale must be positive"
        );
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Logical width in surface units.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Logical height in surface units.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Physical pixels per logical unit.
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Surface size in physical pixels, rounded and clamped to at least one
    /// pixel per axis.
    pub fn physical_size(&self) -> (u32, u32) {
        let width = (self.width * self.scale_factor).round().max(1.0) as u32;
        let height = (self.height * self.scale_factor).round().max(1.0) as u32;
        (width, height)
    }

    /// Column-major projection from logical coordinates to clip space.
    ///
    /// Maps `(0, 0)` to the top-left corner `(-1, 1)` and
    /// `(width, height)` to the bottom-right corner `(1, -1)`.
    #[rustfmt::skip]
    pub fn projection_matrix(&self) -> [f32; 16] {
        let sx = 2.0 / self.width;
        let sy = -2.0 / self.height;
        [
            sx,   0.0,  0.0, 0.0,
            0.0,  sy,   0.0, 0.0,
            0.0,  0.0,  1.0, 0.0,
            -1.0, 1.0,  0.0, 1.0,
        ]
    }
}

/// One triangle-list vertex in logical surface coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "renderer",
    derive(bytemuck_derive::Pod, bytemuck_derive::Zeroable)
)]
pub struct SceneVertex {
    /// Position in logical surface units.
    pub position: [f32; 2],
    /// Linear RGBA fill color.
    pub color: [f32; 4],
}

/// Tessellates a snapshot into a triangle list.
///
/// Agents come first in snapshot order, then foods in snapshot order, so
/// later entities paint over earlier ones. Each agent contributes
/// `3 * FISH_TRIANGLES.len()` vertices and each food `3 * CIRCLE_SEGMENTS`.
pub fn build_scene(snapshot: &WorldSnapshot, viewport: &Viewport) -> Vec<SceneVertex> {
    let mut vertices = Vec::with_capacity(
        snapshot.agents.len() * FISH_TRIANGLES.len() * 3
            + snapshot.foods.len() * CIRCLE_SEGMENTS * 3,
    );

    let agent_size = AGENT_SIZE_FRACTION * viewport.width();
    for agent in &snapshot.agents {
        let outline = fish_outline(
            agent.x * viewport.width(),
            agent.y * viewport.height(),
            agent_size,
            agent.rotation,
        );
        for [a, b, c] in FISH_TRIANGLES {
            for index in [a, b, c] {
                let (x, y) = outline[index];
                vertices.push(SceneVertex {
                    position: [x, y],
                    color: AGENT_COLOR,
                });
            }
        }
    }

    let food_radius = FOOD_RADIUS_FRACTION * viewport.width();
    for food in &snapshot.foods {
        push_disc(
            &mut vertices,
            food.x * viewport.width(),
            food.y * viewport.height(),
            food_radius,
            FOOD_COLOR,
        );
    }

    vertices
}

/// Appends a disc as a triangle fan around its center.
fn push_disc(out: &mut Vec<SceneVertex>, cx: f32, cy: f32, radius: f32, color: [f32; 4]) {
    let rim = |segment: usize| {
        let angle = segment as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        [cx + radius * angle.cos(), cy + radius * angle.sin()]
    };
    for segment in 0..CIRCLE_SEGMENTS {
        out.push(SceneVertex {
            position: [cx, cy],
            color,
        });
        out.push(SceneVertex {
            position: rim(segment),
            color,
        });
        out.push(SceneVertex {
            position: rim(segment + 1),
            color,
        });
    }
}
