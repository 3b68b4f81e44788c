//! Brick grid layout

use glam::Vec2;

use super::geometry::Aabb;
use crate::consts::{BRICK_COLUMN_SPACING, BRICK_EDGE_MARGIN, BRICK_ROW_SPACING};

/// Brick centers for a fresh round, in creation order.
///
/// Rows start `BRICK_EDGE_MARGIN` below the top edge and step down by
/// `BRICK_ROW_SPACING`. Columns start `BRICK_EDGE_MARGIN` right of the left
/// edge and step by `BRICK_COLUMN_SPACING` while the center stays more than
/// the margin away from the right edge. Row-major, top row first.
pub fn brick_grid(arena: &Aabb, rows: u32) -> Vec<Vec2> {
    let min = arena.min();
    let max = arena.max();

    let first_x = min.x + BRICK_EDGE_MARGIN;
    let last_x = max.x - BRICK_EDGE_MARGIN;
    let columns: Vec<f32> = (0u32..)
        .map(|c| first_x + c as f32 * BRICK_COLUMN_SPACING)
        .take_while(|&x| x < last_x)
        .collect();

    let mut centers = Vec::with_capacity(columns.len() * rows as usize);
    for r in 0..rows {
        let y = max.y - BRICK_EDGE_MARGIN - r as f32 * BRICK_ROW_SPACING;
        centers.extend(columns.iter().map(|&x| Vec2::new(x, y)));
    }
    centers
}
