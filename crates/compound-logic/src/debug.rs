//! Text dumps of generated levels for logs and the simtest harness.

use crate::constants::{assets, tiles};
use crate::generation::{GeneratedLevel, GuardKind};
use crate::raster::{world_to_grid, GridLevel};

const RULE: &str = "═";

fn cell_glyph(tile: u8, asset: u8) -> &'static str {
    match asset {
        assets::LAMP => "💡",
        assets::BENCH => "🪑",
        a if a >= assets::TREE_BASE => "🌳",
        _ => match tile {
            tiles::PATH => "··",
            tiles::WALL => "██",
            _ => "  ",
        },
    }
}

/// Render the tile map with its asset overlay, two characters per cell.
pub fn grid_to_ascii(level: &GridLevel) -> String {
    let n = level.grid_size;
    let rule = RULE.repeat(n * 2);

    let mut dump = format!("PROCEDURAL LEVEL ({}x{})\n", n, n);
    dump.push_str(&rule);
    dump.push('\n');
    for (tiles_row, assets_row) in level.map.iter().zip(&level.assets) {
        for (&tile, &asset) in tiles_row.iter().zip(assets_row) {
            dump.push_str(cell_glyph(tile, asset));
        }
        dump.push('\n');
    }
    dump.push_str(&rule);
    dump.push('\n');

    dump.push_str("\nLEGEND:\n");
    dump.push_str(&format!("  ██ = Wall (value {})\n", tiles::WALL));
    dump.push_str(&format!("  ·· = Pathway (value {})\n", tiles::PATH));
    dump.push_str(&format!("     = Ground (value {})\n", tiles::GROUND));
    dump.push_str(&format!("  💡 = Lamp (asset {})\n", assets::LAMP));
    dump.push_str(&format!("  🪑 = Bench (asset {})\n", assets::BENCH));
    dump.push_str(&format!(
        "  🌳 = Tree (assets {}-{})\n",
        assets::TREE_BASE,
        assets::TREE_BASE + assets::TREE_VARIANTS - 1
    ));
    dump
}

/// Render the level map with guards, the objective and the player start drawn
/// over the tile and asset cells.
///
/// Markers later in the list win a shared cell: guards, then the objective,
/// then the player start.
pub fn level_to_ascii(level: &GeneratedLevel) -> String {
    let n = level.grid.grid_size;
    let rule = RULE.repeat(n * 2);

    let mut cells: Vec<Vec<&str>> = level
        .grid
        .map
        .iter()
        .zip(&level.grid.assets)
        .map(|(tiles_row, assets_row)| {
            tiles_row
                .iter()
                .zip(assets_row)
                .map(|(&tile, &asset)| cell_glyph(tile, asset))
                .collect()
        })
        .collect();

    let mut mark = |x: f32, z: f32, glyph: &'static str| {
        if n == 0 {
            return;
        }
        let gx = world_to_grid(x, level.tile_size, n);
        let gz = world_to_grid(z, level.tile_size, n);
        cells[gz][gx] = glyph;
    };
    for guard in &level.guards {
        let glyph = match guard.kind {
            GuardKind::Stationary { .. } => "🧍",
            GuardKind::Patrol { .. } => "🚶",
        };
        mark(guard.start_pos.x, guard.start_pos.z, glyph);
    }
    let [ox, oz] = level.objective.pos;
    mark(ox, oz, "★ ");
    let start = level.player_start.pos;
    mark(start.x, start.z, "👤");

    let mut dump = format!("LEVEL MAP ({}x{}, seed {})\n", n, n, level.seed);
    dump.push_str(&rule);
    dump.push('\n');
    for row in &cells {
        dump.push_str(&row.concat());
        dump.push('\n');
    }
    dump.push_str(&rule);
    dump.push('\n');

    dump.push_str("\nMARKERS:\n");
    dump.push_str("  🧍 = Stationary guard\n");
    dump.push_str("  🚶 = Patrol guard\n");
    dump.push_str("  ★  = Objective\n");
    dump.push_str("  👤 = Player start\n");
    dump
}

/// Human-readable counts and listings for a generated level.
pub fn level_summary(level: &GeneratedLevel) -> String {
    let layout = &level.layout;
    let patrols = level.guards.iter().filter(|g| g.is_patrol()).count();
    let stationary = level.guards.len() - patrols;

    let mut out = format!("LEVEL SUMMARY (seed {})\n", level.seed);
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    out.push_str(&format!(
        "Compound: {}x{} units, {}x{} tiles\n",
        layout.size, layout.size, level.grid.grid_size, level.grid.grid_size
    ));
    out.push_str(&format!(
        "Buildings: {} placed, {} rejected\n",
        layout.buildings.len(),
        layout.rejected_buildings
    ));
    out.push_str(&format!("Pathways: {}\n", layout.pathways.len()));
    out.push_str(&format!("Guards: {}\n", level.guards.len()));
    out.push_str(&format!("  - Stationary: {}\n", stationary));
    out.push_str(&format!("  - Patrol: {}\n", patrols));
    out.push_str("Props:\n");
    out.push_str(&format!("  - Trees: {}\n", layout.props.trees.len()));
    out.push_str(&format!("  - Lamps: {}\n", layout.props.lamps.len()));
    out.push_str(&format!("  - Benches: {}\n", layout.props.benches.len()));

    out.push_str("\nBUILDINGS:\n");
    for (i, b) in layout.buildings.iter().enumerate() {
        out.push_str(&format!("  {}. {} ({})\n", i + 1, b.id, b.kind.name()));
        out.push_str(&format!(
            "     Position: [{}, {}]  Size: {}x{}  Height: {}\n",
            b.rect.pos[0], b.rect.pos[1], b.rect.size[0], b.rect.size[1], b.height
        ));
    }

    out.push_str("\nGUARDS:\n");
    for (i, g) in level.guards.iter().enumerate() {
        match &g.kind {
            GuardKind::Stationary { rotation_deg } => {
                out.push_str(&format!("  {}. {} (stationary)\n", i + 1, g.id));
                out.push_str(&format!(
                    "     Start: [{}, {}]  Rotation: {}°\n",
                    g.start_pos.x, g.start_pos.z, rotation_deg
                ));
            }
            GuardKind::Patrol { route } => {
                out.push_str(&format!("  {}. {} (patrol)\n", i + 1, g.id));
                out.push_str(&format!(
                    "     Start: [{}, {}]  Waypoints: {}\n",
                    g.start_pos.x,
                    g.start_pos.z,
                    route.len()
                ));
            }
        }
    }

    out.push_str(&format!(
        "\nOBJECTIVE: [{}, {}]\n",
        level.objective.pos[0], level.objective.pos[1]
    ));
    let start = &level.player_start;
    out.push_str(&format!(
        "PLAYER START: [{}, {}]  Rotation: {}°\n",
        start.pos.x, start.pos.z, start.rotation_deg
    ));
    out
}
