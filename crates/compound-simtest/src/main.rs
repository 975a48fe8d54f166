//! Compound Headless Generation Harness
//!
//! Generates levels for the reference option sets, prints their ASCII maps
//! and summaries, checks layout properties, then runs a short patrol
//! simulation. No renderer involved.
//!
//! Usage:
//!   cargo run -p compound-simtest
//!   cargo run -p compound-simtest -- --verbose
//!   cargo run -p compound-simtest -- --seed 42 --json

use compound_core::prelude::*;
use compound_logic::constants::buildings::SPACING;
use compound_logic::constants::{assets, tiles};
use compound_logic::debug::{grid_to_ascii, level_summary, level_to_ascii};
use compound_logic::generation::{generate_compound, GeneratedLevel, GuardKind};
use compound_logic::geometry::Side;
use compound_logic::options::{presets, validate_options, GenerationOptions, OptionsError};
use compound_logic::raster::world_to_grid;
use compound_logic::walls::merge_walls;

/// Simulated time for the patrol run.
const PATROL_SECONDS: u32 = 30;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Args {
    verbose: bool,
    json: bool,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        verbose: false,
        json: false,
        seed: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--verbose" => args.verbose = true,
            "--json" => args.json = true,
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|e| format!("invalid seed {:?}: {}", value, e))?;
                args.seed = Some(seed);
            }
            other => return Err(format!("unknown argument {:?}", other)),
        }
    }
    Ok(args)
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("compound-simtest: {}", e);
            eprintln!("usage: compound-simtest [--verbose] [--seed N] [--json]");
            std::process::exit(2);
        }
    };

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    println!("=== Compound Generation Harness ===\n");

    let mut results = Vec::new();

    // 1. Option validation
    results.extend(validate_option_checks(args.verbose));

    // 2. Reference layouts
    for (i, (name, options)) in presets().into_iter().enumerate() {
        let options = GenerationOptions {
            seed: args.seed.map(|s| s.wrapping_add(i as u64)),
            ..options
        };
        results.extend(validate_layout(name, &options, args.verbose));
    }

    // 3. Every gate side
    results.extend(validate_gate_sides(args.seed, args.verbose));

    // 4. Patrol simulation
    results.extend(validate_patrols(args.seed, args.verbose));

    // 5. JSON dump
    if args.json {
        results.extend(dump_json(args.seed));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Options ──────────────────────────────────────────────────────────

fn validate_option_checks(verbose: bool) -> Vec<TestResult> {
    println!("--- Options ---");
    let mut results = Vec::new();

    for (name, options) in presets() {
        let errors = options.validate();
        results.push(TestResult {
            name: format!("options_{}_valid", name.replace(' ', "_")),
            passed: errors.is_empty(),
            detail: if errors.is_empty() {
                format!("grid {}, {} buildings", options.grid_size, options.building_count)
            } else {
                join_errors(&errors)
            },
        });
    }

    let broken = GenerationOptions {
        grid_size: 0,
        tile_size: -1.0,
        density: -0.5,
        ..GenerationOptions::default()
    };
    let errors = validate_options(&broken);
    if verbose {
        for e in &errors {
            println!("  rejected: {}", e);
        }
    }
    results.push(TestResult {
        name: "options_reject_nonsense".into(),
        passed: errors.contains(&OptionsError::EmptyGrid)
            && errors.contains(&OptionsError::TileSizeNotPositive(-1.0))
            && errors.contains(&OptionsError::DensityNegative(-0.5)),
        detail: format!("{} problems reported", errors.len()),
    });

    results
}

fn join_errors(errors: &[OptionsError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// ── 2. Layouts ──────────────────────────────────────────────────────────

fn validate_layout(name: &str, options: &GenerationOptions, verbose: bool) -> Vec<TestResult> {
    println!("--- {} ---", name);
    let mut results = Vec::new();
    let prefix = name.replace(' ', "_");

    let level = generate_compound(options);
    log::info!(
        "{}: seed {}, {} buildings placed, {} rejected, {} guards",
        name,
        level.seed,
        level.layout.buildings.len(),
        level.layout.rejected_buildings,
        level.guards.len()
    );
    println!("{}", level_to_ascii(&level));
    println!("{}", level_summary(&level));

    let n = options.grid_size;
    let map = &level.grid.map;
    let grid_assets = &level.grid.assets;

    let square = map.len() == n
        && grid_assets.len() == n
        && map.iter().chain(grid_assets).all(|row| row.len() == n);
    results.push(TestResult {
        name: format!("{}_grid_dims", prefix),
        passed: square,
        detail: format!("{}x{} tiles and assets", n, n),
    });

    let max_asset = assets::TREE_BASE + assets::TREE_VARIANTS - 1;
    let bad_tiles = map.iter().flatten().filter(|&&v| v > tiles::WALL).count();
    let bad_assets = grid_assets.iter().flatten().filter(|&&v| v > max_asset).count();
    results.push(TestResult {
        name: format!("{}_cell_values", prefix),
        passed: bad_tiles == 0 && bad_assets == 0,
        detail: format!(
            "{} walls, {} paths, {} assets ({} bad tiles, {} bad assets)",
            level.grid.count_tiles(tiles::WALL),
            level.grid.count_tiles(tiles::PATH),
            (n * n).saturating_sub(level.grid.count_assets(assets::NONE)),
            bad_tiles,
            bad_assets
        ),
    });

    results.push(gate_gap_result(&prefix, &level, options));

    let placed = &level.layout.buildings;
    let mut too_close = Vec::new();
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            if a.rect.expand(SPACING / 2.0).overlaps(&b.rect.expand(SPACING / 2.0)) {
                too_close.push(format!("{}/{}", a.id, b.id));
            }
        }
    }
    results.push(TestResult {
        name: format!("{}_building_spacing", prefix),
        passed: too_close.is_empty()
            && placed.len() as u32 + level.layout.rejected_buildings == options.building_count,
        detail: if too_close.is_empty() {
            format!(
                "{} placed, {} rejected",
                placed.len(),
                level.layout.rejected_buildings
            )
        } else {
            format!("overlapping: {}", too_close.join(", "))
        },
    });

    let expected_guards = 2 + placed.len().min(1) + 3;
    results.push(TestResult {
        name: format!("{}_guard_count", prefix),
        passed: level.guards.len() == expected_guards,
        detail: format!("{} guards, expected {}", level.guards.len(), expected_guards),
    });

    let again = generate_compound(&GenerationOptions {
        seed: Some(level.seed),
        ..options.clone()
    });
    results.push(TestResult {
        name: format!("{}_reproducible", prefix),
        passed: again == level,
        detail: format!("seed {}", level.seed),
    });

    let rects = merge_walls(map, level.tile_size);
    let mut coverage_errors = 0;
    for (z, row) in map.iter().enumerate() {
        for (x, &tile) in row.iter().enumerate() {
            let covering = rects.iter().filter(|r| r.contains_cell(x, z)).count();
            if covering != usize::from(tile == tiles::WALL) {
                coverage_errors += 1;
            }
        }
    }
    results.push(TestResult {
        name: format!("{}_wall_merge", prefix),
        passed: coverage_errors == 0 && rects.len() <= level.grid.count_tiles(tiles::WALL),
        detail: format!(
            "{} wall cells → {} rects, {} coverage errors",
            level.grid.count_tiles(tiles::WALL),
            rects.len(),
            coverage_errors
        ),
    });

    if verbose {
        for r in &rects {
            println!(
                "  wall block at ({}, {}) {}x{} cells",
                r.x, r.z, r.w, r.d
            );
        }
    }

    for r in results.iter().filter(|r| !r.passed) {
        log::warn!("{}: {} failed ({})", name, r.name, r.detail);
    }
    results
}

/// Cells along the compound edge on `side`.
fn edge_cells(level: &GeneratedLevel, side: Side) -> Vec<u8> {
    let map = &level.grid.map;
    let n = level.grid.grid_size;
    match side {
        Side::North => map[0].clone(),
        Side::South => map[n - 1].clone(),
        Side::West => map.iter().map(|row| row[0]).collect(),
        Side::East => map.iter().map(|row| row[n - 1]).collect(),
    }
}

/// Maximal runs of non-wall cells as `(start, length)`.
fn open_runs(cells: &[u8]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &v) in cells.iter().enumerate() {
        match (v != tiles::WALL, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, cells.len() - s));
    }
    runs
}

fn gate_gap_result(prefix: &str, level: &GeneratedLevel, options: &GenerationOptions) -> TestResult {
    let n = options.grid_size;
    let low = world_to_grid(-options.gate_width / 2.0, options.tile_size, n);
    let high = world_to_grid(options.gate_width / 2.0, options.tile_size, n);
    let expected = high.saturating_sub(low + 1);

    let mut problems = Vec::new();
    for side in Side::ALL {
        let runs = open_runs(&edge_cells(level, side));
        if side == options.gate_side {
            if runs.len() != 1 || runs[0].1 != expected {
                problems.push(format!("{} gate runs {:?}", side.name(), runs));
            }
        } else if !runs.is_empty() {
            problems.push(format!("{} wall open at {:?}", side.name(), runs));
        }
    }

    TestResult {
        name: format!("{}_perimeter_gap", prefix),
        passed: problems.is_empty(),
        detail: if problems.is_empty() {
            format!(
                "one {}-cell gap on the {} edge",
                expected,
                options.gate_side.name()
            )
        } else {
            problems.join("; ")
        },
    }
}

// ── 3. Gate sides ───────────────────────────────────────────────────────

fn validate_gate_sides(seed: Option<u64>, verbose: bool) -> Vec<TestResult> {
    println!("--- Gate Sides ---");
    let mut results = Vec::new();

    for side in Side::ALL {
        let options = GenerationOptions {
            gate_side: side,
            seed,
            ..GenerationOptions::default()
        };
        let level = generate_compound(&options);
        if verbose {
            println!("{}", grid_to_ascii(&level.grid));
        }
        results.push(gate_gap_result(&format!("gate_{}", side.name()), &level, &options));
    }

    results
}

// ── 4. Patrols ──────────────────────────────────────────────────────────

fn validate_patrols(seed: Option<u64>, verbose: bool) -> Vec<TestResult> {
    println!("--- Patrol Simulation ---");
    let mut results = Vec::new();

    let mut session = LevelSession::new();
    let options = GenerationOptions {
        seed,
        ..GenerationOptions::default()
    };
    let seed = match session.generate(&options) {
        Ok(seed) => seed,
        Err(e) => {
            results.push(TestResult {
                name: "patrol_load".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };
    let level = match session.level() {
        Some(level) => level.clone(),
        None => return results,
    };

    results.push(TestResult {
        name: "patrol_load".into(),
        passed: session.guard_count() == level.guards.len(),
        detail: format!("seed {}, {} guards spawned", seed, session.guard_count()),
    });

    let start = session.guards();
    let mut off_route = Vec::new();
    for second in 1..=PATROL_SECONDS {
        session.update(1.0);
        for guard in session.guards() {
            if guard.mode.is_some() && !within_route(&level, &guard) {
                off_route.push(format!("{}@{}s", guard.id, second));
            }
        }
        if verbose && second % 10 == 0 {
            for g in session.guards().iter().filter(|g| g.mode.is_some()) {
                println!(
                    "  t={:>2}s {:<13} ({:>7.2}, {:>7.2}) {:?}",
                    second, g.id, g.position.x, g.position.z, g.mode
                );
            }
        }
    }

    results.push(TestResult {
        name: "patrol_tick_count".into(),
        passed: session.tick_count() == u64::from(PATROL_SECONDS) * 60,
        detail: format!("{} ticks in {}s", session.tick_count(), PATROL_SECONDS),
    });

    results.push(TestResult {
        name: "patrol_stays_on_route".into(),
        passed: off_route.is_empty(),
        detail: if off_route.is_empty() {
            "all patrols within their route bounds".into()
        } else {
            format!("off route: {}", off_route.join(", "))
        },
    });

    let end = session.guards();
    let moved = end
        .iter()
        .zip(&start)
        .filter(|(e, s)| e.mode.is_some() && e.position != s.position)
        .count();
    let posts_fixed = end
        .iter()
        .zip(&start)
        .filter(|(e, _)| e.mode.is_none())
        .all(|(e, s)| e.position == s.position && e.rotation_deg == s.rotation_deg);
    results.push(TestResult {
        name: "patrol_movement".into(),
        passed: moved == 3 && posts_fixed,
        detail: format!("{} patrols moved, stationary posts held: {}", moved, posts_fixed),
    });

    results
}

fn within_route(level: &GeneratedLevel, guard: &GuardState) -> bool {
    let route = level.guards.iter().find_map(|g| match &g.kind {
        GuardKind::Patrol { route } if g.id == guard.id => Some(route),
        _ => None,
    });
    let Some(route) = route else {
        return false;
    };
    let p = guard.position;
    let (x0, x1) = route
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), w| (lo.min(w.x), hi.max(w.x)));
    let (z0, z1) = route
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), w| (lo.min(w.z), hi.max(w.z)));
    let eps = 1e-3;
    p.x >= x0 - eps && p.x <= x1 + eps && p.z >= z0 - eps && p.z <= z1 + eps
}

// ── 5. JSON ─────────────────────────────────────────────────────────────

fn dump_json(seed: Option<u64>) -> Vec<TestResult> {
    println!("--- JSON Output ---");
    let mut session = LevelSession::new();
    let dumped = session
        .generate(&GenerationOptions {
            seed,
            ..GenerationOptions::default()
        })
        .and_then(|_| session.to_json());

    match dumped {
        Ok(json) => {
            println!("{}", json);
            vec![TestResult {
                name: "json_dump".into(),
                passed: true,
                detail: format!("{} bytes", json.len()),
            }]
        }
        Err(e) => vec![TestResult {
            name: "json_dump".into(),
            passed: false,
            detail: e.to_string(),
        }],
    }
}
