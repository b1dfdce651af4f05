//! Shape generation for 2D primitives

use glam::{Mat4, Vec2};

use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Rect};

/// Two triangles covering `rect`
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
        Vertex::new(l, t, color),
        Vertex::new(r, b, color),
        Vertex::new(l, b, color),
    ]
}

/// Append one quad per rectangle
pub fn push_quads<'a>(
    vertices: &mut Vec<Vertex>,
    rects: impl IntoIterator<Item = &'a Rect>,
    color: [f32; 4],
) {
    for rect in rects {
        vertices.extend_from_slice(&quad(rect, color));
    }
}

/// Vertices for a whole frame, back to front: platforms, checkpoints,
/// enemies, then the player on top
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let count = state.platforms.len() + state.checkpoints.len() + state.enemies.len() + 1;
    let mut vertices = Vec::with_capacity(count * 6);

    push_quads(&mut vertices, &state.platforms, colors::PLATFORM);
    push_quads(&mut vertices, &state.checkpoints, colors::CHECKPOINT);
    push_quads(
        &mut vertices,
        state.enemies.iter().map(|enemy| &enemy.rect),
        colors::ENEMY,
    );
    push_quads(&mut vertices, [&state.player.rect], colors::PLAYER);

    vertices
}

/// Orthographic projection with the origin at the top-left and y pointing down
pub fn projection(world: Vec2) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, world.x, world.y, 0.0, -1.0, 1.0)
}
