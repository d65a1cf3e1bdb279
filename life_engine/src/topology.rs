// topology.rs - Moore neighbourhood with edge clipping (no wrap-around)

use crate::Coord;

/// Neighbour offsets, row above first, then the sides, then the row below.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// In-bounds neighbours of `(x, y)` on a `size` x `size` grid.
///
/// Corners get 3, edges 5, interior cells 8.
pub fn moore_neighbors(x: usize, y: usize, size: usize) -> Vec<Coord> {
    let mut out = Vec::with_capacity(MOORE_OFFSETS.len());
    for &(dx, dy) in &MOORE_OFFSETS {
        let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
            continue;
        };
        if nx < size && ny < size {
            out.push(Coord::new(nx, ny));
        }
    }
    out
}
