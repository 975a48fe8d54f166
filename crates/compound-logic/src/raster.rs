//! World-space layout → tile grid rasterization.
//!
//! The renderer places tile `c` at `(c − n/2 + 1)·tile`, so [`world_to_grid`]
//! must stay the exact inverse of [`grid_to_world`]; any drift between the two
//! shows up as walls and props misaligned by a tile.
//!
//! Grids are indexed `[z][x]`.

use serde::{Deserialize, Serialize};

use crate::constants::{assets, tiles};
use crate::generation::CompoundLayout;
use crate::geometry::{Footprint, Rect};

/// Tile map plus asset overlay, both `grid_size × grid_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLevel {
    pub grid_size: usize,
    pub map: Vec<Vec<u8>>,
    pub assets: Vec<Vec<u8>>,
    pub needs_reload: bool,
}

impl GridLevel {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            map: vec![vec![tiles::GROUND; grid_size]; grid_size],
            assets: vec![vec![assets::NONE; grid_size]; grid_size],
            needs_reload: false,
        }
    }

    pub fn count_tiles(&self, value: u8) -> usize {
        self.map.iter().flatten().filter(|&&v| v == value).count()
    }

    pub fn count_assets(&self, value: u8) -> usize {
        self.assets.iter().flatten().filter(|&&v| v == value).count()
    }
}

/// Map one world coordinate to its grid cell, clamped into the grid.
pub fn world_to_grid(world: f32, tile_size: f32, grid_size: usize) -> usize {
    let cell = (world / tile_size + grid_size as f32 / 2.0 - 1.0).round();
    cell.clamp(0.0, grid_size.saturating_sub(1) as f32) as usize
}

/// World coordinate of a cell center.
pub fn grid_to_world(cell: usize, tile_size: f32, grid_size: usize) -> f32 {
    (cell as f32 - grid_size as f32 / 2.0 + 1.0) * tile_size
}

/// Inclusive cell range covered by `rect` as `(x0, z0, x1, z1)`.
pub fn rect_cells(rect: &Rect, tile_size: f32, grid_size: usize) -> (usize, usize, usize, usize) {
    let x0 = world_to_grid(rect.min_x(), tile_size, grid_size);
    let x1 = world_to_grid(rect.max_x(), tile_size, grid_size);
    let z0 = world_to_grid(rect.min_z(), tile_size, grid_size);
    let z1 = world_to_grid(rect.max_z(), tile_size, grid_size);
    (x0.min(x1), z0.min(z1), x0.max(x1), z0.max(z1))
}

/// Paint `value` over every cell between the rasterized corners of `rect`.
pub fn fill_rect(grid: &mut [Vec<u8>], rect: &Rect, tile_size: f32, value: u8) {
    let grid_size = grid.len();
    if grid_size == 0 {
        return;
    }
    let (x0, z0, x1, z1) = rect_cells(rect, tile_size, grid_size);
    for row in &mut grid[z0..=z1] {
        for cell in &mut row[x0..=x1] {
            *cell = value;
        }
    }
}

/// Rasterize a layout. Pure: the same layout always yields the same grid.
///
/// Tiles are painted walls → buildings → pathways, later shapes winning.
/// Assets keep the first prop written to a cell (lamps, then benches, then
/// trees).
pub fn rasterize(layout: &CompoundLayout, grid_size: usize, tile_size: f32) -> GridLevel {
    let mut level = GridLevel::new(grid_size);
    if grid_size == 0 {
        return level;
    }

    for shape in layout.shapes() {
        fill_rect(&mut level.map, &shape.rect(), tile_size, shape.tile_value());
    }

    let lamps = layout.props.lamps.iter().map(|l| (l.pos, assets::LAMP));
    let benches = layout.props.benches.iter().map(|b| (b.pos, assets::BENCH));
    let trees = layout
        .props
        .trees
        .iter()
        .map(|t| (t.pos, assets::TREE_BASE + t.variant % assets::TREE_VARIANTS));
    for ([x, z], value) in lamps.chain(benches).chain(trees) {
        let gx = world_to_grid(x, tile_size, grid_size);
        let gz = world_to_grid(z, tile_size, grid_size);
        let cell = &mut level.assets[gz][gx];
        if *cell == assets::NONE {
            *cell = value;
        }
    }

    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::perimeter::generate_perimeter;
    use crate::geometry::{
        Building, BuildingKind, Lamp, Orientation, Pathway, Side, Tree, Wall,
    };

    #[test]
    fn grid_world_round_trip() {
        for n in [1usize, 2, 7, 29, 30] {
            for cell in 0..n {
                let world = grid_to_world(cell, 5.0, n);
                assert_eq!(world_to_grid(world, 5.0, n), cell, "n={n} cell={cell}");
            }
        }
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(world_to_grid(-1000.0, 5.0, 29), 0);
        assert_eq!(world_to_grid(1000.0, 5.0, 29), 28);
        assert_eq!(world_to_grid(0.0, 5.0, 29), 14);
    }

    #[test]
    fn fill_rect_covers_inclusive_corners() {
        let mut grid = vec![vec![0u8; 10]; 10];
        // Corners land on cells 4 and 6 in x, 4 and 5 in z
        fill_rect(&mut grid, &Rect::new(5.0, 2.5, 10.0, 5.0), 5.0, 2);
        let filled: Vec<(usize, usize)> = (0..10)
            .flat_map(|z| (0..10).map(move |x| (x, z)))
            .filter(|&(x, z)| grid[z][x] == 2)
            .collect();
        assert_eq!(filled, vec![(4, 4), (5, 4), (6, 4), (4, 5), (5, 5), (6, 5)]);
    }

    #[test]
    fn perimeter_rasterizes_to_border() {
        let perimeter = generate_perimeter(145.0, 16.0, Side::West);
        let layout = CompoundLayout {
            size: 145.0,
            perimeter,
            ..CompoundLayout::empty(145.0)
        };
        let level = rasterize(&layout, 29, 5.0);
        for i in 0..29 {
            assert_eq!(level.map[0][i], tiles::WALL, "north row");
            assert_eq!(level.map[28][i], tiles::WALL, "south row");
            assert_eq!(level.map[i][28], tiles::WALL, "east column");
        }
        let west: Vec<u8> = (0..29).map(|z| level.map[z][0]).collect();
        let open: Vec<usize> = (0..29).filter(|&z| west[z] != tiles::WALL).collect();
        assert_eq!(open, vec![13, 14]);
    }

    #[test]
    fn first_asset_wins() {
        let mut layout = CompoundLayout::empty(145.0);
        layout.props.lamps.push(Lamp { pos: [0.0, 0.0] });
        layout.props.trees.push(Tree {
            pos: [1.0, 1.0],
            variant: 2,
        });
        layout.props.trees.push(Tree {
            pos: [20.0, 20.0],
            variant: 1,
        });
        let level = rasterize(&layout, 29, 5.0);
        assert_eq!(level.assets[14][14], assets::LAMP);
        assert_eq!(level.assets[18][18], assets::TREE_BASE + 1);
        assert_eq!(level.count_assets(assets::NONE), 29 * 29 - 2);
    }

    #[test]
    fn later_shapes_paint_over_earlier() {
        let mut layout = CompoundLayout::empty(145.0);
        // Wall covers cells 13..=14, building 12..=16, pathway x 12..=15 z 13..=14
        layout.perimeter.walls.push(Wall {
            id: "wall-inner".into(),
            rect: Rect::new(0.0, 0.0, 4.0, 4.0),
            height: 3.0,
        });
        layout.buildings.push(Building {
            id: "building-0".into(),
            rect: Rect::new(0.0, 0.0, 20.0, 20.0),
            height: 12.0,
            kind: BuildingKind::Admin,
        });
        layout.pathways.push(Pathway {
            id: "path-0".into(),
            rect: Rect::new(0.0, 0.0, 12.0, 4.0),
            orientation: Orientation::Horizontal,
        });
        let level = rasterize(&layout, 29, 5.0);

        for z in 12..=16 {
            for x in 12..=16 {
                let on_path = (12..=15).contains(&x) && (13..=14).contains(&z);
                let expected = if on_path { tiles::PATH } else { tiles::WALL };
                assert_eq!(level.map[z][x], expected, "cell ({x}, {z})");
            }
        }
        assert_eq!(level.map[14][14], tiles::PATH);
        assert_eq!(level.map[16][16], tiles::WALL);
        assert_eq!(level.map[11][11], tiles::GROUND);
        assert_eq!(level.count_tiles(tiles::WALL), 25 - 8);
        assert_eq!(level.count_tiles(tiles::PATH), 8);
    }

    #[test]
    fn empty_grid_is_harmless() {
        let level = rasterize(&CompoundLayout::empty(10.0), 0, 5.0);
        assert!(level.map.is_empty());
    }
}
