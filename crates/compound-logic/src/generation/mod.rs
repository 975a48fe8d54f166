//! Generation - procedural creation of compound levels.
//!
//! Pipeline: perimeter → buildings → pathways → props → guards, all in world
//! space, then [`crate::raster::rasterize`] turns the layout into grids.
//! Every random choice draws from one seeded `ChaCha8Rng`, so a level is fully
//! determined by its options and seed.

mod buildings;
mod guards;
mod pathways;
pub(crate) mod perimeter;
mod props;

pub use buildings::*;
pub use guards::*;
pub use pathways::*;
pub use perimeter::*;
pub use props::*;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::constants::guards::OBJECTIVE;
use crate::geometry::{Building, Gate, Pathway, Props, Rect, Shape, Side, Vec3};
use crate::options::GenerationOptions;
use crate::raster::{rasterize, GridLevel};

/// Height the player spawns at, just above the ground plane.
const PLAYER_SPAWN_HEIGHT: f32 = 0.2;
/// How far outside the gate the player spawns.
const PLAYER_SPAWN_DISTANCE: f32 = 5.0;

/// World-space compound, before rasterization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundLayout {
    /// Side length in world units.
    pub size: f32,
    pub perimeter: Perimeter,
    pub buildings: Vec<Building>,
    /// Buildings requested but not placed.
    pub rejected_buildings: u32,
    pub pathways: Vec<Pathway>,
    pub props: Props,
}

impl CompoundLayout {
    /// A layout with nothing in it but a zero-width west gate.
    pub fn empty(size: f32) -> Self {
        Self {
            size,
            perimeter: Perimeter {
                walls: Vec::new(),
                gate: Gate {
                    rect: Rect::new(-size / 2.0, 0.0, 0.0, 0.0),
                    side: Side::West,
                },
            },
            buildings: Vec::new(),
            rejected_buildings: 0,
            pathways: Vec::new(),
            props: Props::default(),
        }
    }

    /// Tile-painting shapes in paint order: walls, buildings, pathways.
    pub fn shapes(&self) -> impl Iterator<Item = Shape<'_>> {
        self.perimeter
            .walls
            .iter()
            .map(Shape::Wall)
            .chain(self.buildings.iter().map(Shape::Building))
            .chain(self.pathways.iter().map(Shape::Pathway))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStart {
    pub pos: Vec3,
    pub rotation_deg: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub pos: [f32; 2],
}

/// Everything a level load needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub grid: GridLevel,
    pub tile_size: f32,
    pub player_start: PlayerStart,
    pub guards: Vec<GuardSpawn>,
    pub objective: Objective,
    pub layout: CompoundLayout,
    /// Seed actually used, so any level can be regenerated.
    pub seed: u64,
}

/// Build the world-space layout for `options` from `rng`.
pub fn generate_layout(options: &GenerationOptions, rng: &mut impl Rng) -> CompoundLayout {
    let size = options.world_size();

    let perimeter = generate_perimeter(size, options.gate_width, options.gate_side);
    let placement = place_buildings(options.building_count, size, rng);
    let pathways = build_pathways(&placement.placed, size, &perimeter.gate);
    let props = scatter_props(&pathways, size, options.density, rng);

    CompoundLayout {
        size,
        perimeter,
        buildings: placement.placed,
        rejected_buildings: placement.rejected,
        pathways,
        props,
    }
}

/// Generate a complete compound level.
///
/// Never fails: buildings that cannot be placed are counted in
/// `layout.rejected_buildings`, out-of-grid coordinates are clamped.
pub fn generate_compound(options: &GenerationOptions) -> GeneratedLevel {
    let seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let layout = generate_layout(options, &mut rng);
    let gate = layout.perimeter.gate;
    let guards = place_guards(&layout.buildings, layout.size, &gate, OBJECTIVE);

    let [ox, oz] = gate.side.outward();
    let player_start = PlayerStart {
        pos: Vec3::new(
            gate.rect.pos[0] + ox * PLAYER_SPAWN_DISTANCE,
            PLAYER_SPAWN_HEIGHT,
            gate.rect.pos[1] + oz * PLAYER_SPAWN_DISTANCE,
        ),
        rotation_deg: gate.side.inward_heading_deg(),
    };

    let grid = rasterize(&layout, options.grid_size, options.tile_size);

    log::info!(
        "generated {}x{} compound (seed {}): {} buildings ({} rejected), {} pathways, {} guards",
        options.grid_size,
        options.grid_size,
        seed,
        layout.buildings.len(),
        layout.rejected_buildings,
        layout.pathways.len(),
        guards.len()
    );

    GeneratedLevel {
        grid,
        tile_size: options.tile_size,
        player_start,
        guards,
        objective: Objective { pos: OBJECTIVE },
        layout,
        seed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> GenerationOptions {
        GenerationOptions {
            seed: Some(seed),
            ..GenerationOptions::default()
        }
    }

    #[test]
    fn same_seed_same_level() {
        assert_eq!(generate_compound(&seeded(42)), generate_compound(&seeded(42)));
    }

    #[test]
    fn missing_seed_is_reported() {
        let level = generate_compound(&GenerationOptions::default());
        let again = generate_compound(&seeded(level.seed));
        assert_eq!(level, again);
    }

    #[test]
    fn player_starts_outside_west_gate_facing_in() {
        let level = generate_compound(&seeded(1));
        assert_eq!(level.player_start.pos, Vec3::new(-77.5, 0.2, 0.0));
        assert_eq!(level.player_start.rotation_deg, 90.0);
    }

    #[test]
    fn shapes_in_paint_order() {
        let level = generate_compound(&seeded(2));
        let ids: Vec<&str> = level.layout.shapes().map(|s| s.id()).collect();
        assert_eq!(ids.first(), Some(&"wall-north"));
        let first_path = ids.iter().position(|id| id.starts_with("path-")).unwrap();
        assert!(ids[..first_path]
            .iter()
            .all(|id| id.starts_with("wall-") || id.starts_with("building-")));
        assert!(ids[first_path..].iter().all(|id| id.starts_with("path-")));
    }

    #[test]
    fn layout_counts_add_up() {
        let level = generate_compound(&seeded(3));
        let layout = &level.layout;
        assert_eq!(
            layout.buildings.len() as u32 + layout.rejected_buildings,
            3
        );
        assert_eq!(layout.pathways.len(), 5 + layout.buildings.len());
    }
}
