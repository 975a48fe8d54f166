//! Wall mask compression for the renderer.
//!
//! Merges the wall cells of a tile map into rectangles so the renderer can
//! build one box mesh per rectangle instead of one per cell.
//!
//! The merge is greedy, not globally minimal: scan rows top to bottom, grow
//! each unclaimed wall cell rightwards as far as it goes, then grow that span
//! downwards while the whole next row segment is unclaimed wall. The output is
//! lossless and non-overlapping, but an irregular mask can produce more
//! rectangles than a maximal-rectangle decomposition would. Callers that need
//! the minimum mesh count cannot rely on this; a better decomposition can be
//! swapped in behind the same signature.

use serde::{Deserialize, Serialize};

use crate::constants::tiles;
use crate::raster::grid_to_world;

/// One merged block of wall cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallRect {
    /// Top-left cell.
    pub x: usize,
    pub z: usize,
    /// Span in cells.
    pub w: usize,
    pub d: usize,
    /// World-space center of the block.
    pub center: [f32; 2],
    /// World-space size of the block.
    pub size: [f32; 2],
}

impl WallRect {
    pub fn area(&self) -> usize {
        self.w * self.d
    }

    pub fn contains_cell(&self, x: usize, z: usize) -> bool {
        x >= self.x && x < self.x + self.w && z >= self.z && z < self.z + self.d
    }
}

/// Merge the wall cells of `map` (indexed `[z][x]`) into rectangles.
///
/// Every wall cell is covered even when rows differ in length. World
/// positions assume a square grid of `map.len()` cells per side.
pub fn merge_walls(map: &[Vec<u8>], tile_size: f32) -> Vec<WallRect> {
    let grid_size = map.len();
    let mut rects = Vec::new();

    // Cells already claimed by an emitted rectangle
    let mut claimed: Vec<Vec<bool>> = map.iter().map(|row| vec![false; row.len()]).collect();
    let open = |claimed: &[Vec<bool>], x: usize, z: usize| {
        map[z].get(x) == Some(&tiles::WALL) && claimed[z].get(x) == Some(&false)
    };

    for z in 0..grid_size {
        for x in 0..map[z].len() {
            if !open(&claimed, x, z) {
                continue;
            }

            let mut span_length = 1;
            while open(&claimed, x + span_length, z) {
                span_length += 1;
            }

            let mut span_depth = 1;
            while z + span_depth < grid_size
                && (x..x + span_length).all(|xx| open(&claimed, xx, z + span_depth))
            {
                span_depth += 1;
            }

            for row in &mut claimed[z..z + span_depth] {
                for cell in &mut row[x..x + span_length] {
                    *cell = true;
                }
            }

            rects.push(to_world(x, z, span_length, span_depth, tile_size, grid_size));
        }
    }

    rects
}

fn to_world(
    x: usize,
    z: usize,
    w: usize,
    d: usize,
    tile_size: f32,
    grid_size: usize,
) -> WallRect {
    // Midpoint of the first and last cell centers
    let world = |cell| grid_to_world(cell, tile_size, grid_size);
    let cx = (world(x) + world(x + w - 1)) / 2.0;
    let cz = (world(z) + world(z + d - 1)) / 2.0;
    WallRect {
        x,
        z,
        w,
        d,
        center: [cx, cz],
        size: [w as f32 * tile_size, d as f32 * tile_size],
    }
}
