//! Nine-slice skin mesh
//!
//! A 4x4 vertex grid over the element rectangle. The inner grid lines sit
//! one skin step in from each edge, so the corner cells keep their size,
//! edge cells stretch along one axis and the center stretches along both.
//! The skin texture is sampled as an even 3x3 grid.

use super::UIVertex;
use crate::foundation::math::PixelRect;

/// Vertices in a nine-slice mesh
pub const NINE_SLICE_VERTEX_COUNT: usize = 16;

/// Triangle indices for the nine cells, two triangles per cell
///
/// Vertex `(col, row)` of the grid is stored at `row * 4 + col`.
pub const NINE_SLICE_INDICES: [u32; 54] = [
    0, 4, 5, 0, 1, 5,
    1, 5, 6, 1, 2, 6,
    2, 6, 7, 2, 3, 7,
    4, 5, 9, 4, 8, 9,
    5, 6, 10, 5, 9, 10,
    6, 7, 11, 6, 10, 11,
    8, 9, 13, 8, 12, 13,
    9, 10, 14, 9, 13, 14,
    10, 11, 15, 10, 14, 15,
];

/// Grid line offsets along one axis of length `extent`
pub const fn grid_offsets(extent: i32, step: i32) -> [i32; 4] {
    [0, step, extent - step, extent]
}

/// Build the 16 skin vertices for `rect` into `out`, replacing its contents
pub fn build_nine_slice(rect: PixelRect, step_x: i32, step_y: i32, out: &mut Vec<UIVertex>) {
    let cols = grid_offsets(rect.w, step_x);
    let rows = grid_offsets(rect.h, step_y);

    out.clear();
    out.reserve(NINE_SLICE_VERTEX_COUNT);
    for (row, dy) in rows.iter().enumerate() {
        for (col, dx) in cols.iter().enumerate() {
            out.push(UIVertex::white(
                [(rect.x + dx) as f32, (rect.y + dy) as f32],
                [col as f32 / 3.0, row as f32 / 3.0],
            ));
        }
    }
}
