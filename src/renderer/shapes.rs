//! Shape generation for 2D primitives

use glam::Vec2;

use super::scene::{Color, Scene};
use super::vertex::Vertex;
use crate::sim::Rect;

/// Two counter-clockwise triangles covering `rect` (canvas units)
pub fn rect_quad(rect: &Rect, color: Color) -> [Vertex; 6] {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
        Vertex::new(l, t, color),
        Vertex::new(r, b, color),
        Vertex::new(r, t, color),
    ]
}

/// All scene rectangles as a triangle list, in draw order
pub fn scene_vertices(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(scene.rects.len() * 6);
    for filled in &scene.rects {
        vertices.extend_from_slice(&rect_quad(&filled.rect, filled.color));
    }
    vertices
}

/// Map a canvas point (origin top-left, y down) to normalized device
/// coordinates, letterboxing so the canvas keeps its aspect ratio inside a
/// surface of `surface` pixels
pub fn canvas_to_ndc(point: Vec2, canvas: Vec2, surface: (u32, u32)) -> Vec2 {
    let surface_aspect = surface.0.max(1) as f32 / surface.1.max(1) as f32;
    let canvas_aspect = canvas.x / canvas.y;

    let scale = if surface_aspect > canvas_aspect {
        // Surface is wider: bars left and right
        Vec2::new(canvas_aspect / surface_aspect, 1.0)
    } else {
        // Surface is taller: bars top and bottom
        Vec2::new(1.0, surface_aspect / canvas_aspect)
    };

    let unit = point / canvas;
    Vec2::new(unit.x * 2.0 - 1.0, 1.0 - unit.y * 2.0) * scale
}
