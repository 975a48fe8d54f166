//! Perimeter walls with a single gate opening.

use serde::{Deserialize, Serialize};

use crate::constants::perimeter::{WALL_HEIGHT, WALL_THICKNESS};
use crate::geometry::{Gate, Rect, Side, Wall};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perimeter {
    pub walls: Vec<Wall>,
    pub gate: Gate,
}

/// Enclose an `size × size` square centered on the origin.
///
/// Walls sit flush with the inside of the square. The wall on `gate_side` is
/// split into two collinear segments leaving a centered gap of `gate_width`.
/// A gate at least as wide as the side is not rejected here; it yields
/// degenerate (zero or negative length) segments.
pub fn generate_perimeter(size: f32, gate_width: f32, gate_side: Side) -> Perimeter {
    let half = size / 2.0;
    let mut walls = Vec::with_capacity(5);

    for side in Side::ALL {
        let [ox, oz] = side.outward();
        // Wall centerline, just inside the square's edge
        let inset = half - WALL_THICKNESS / 2.0;
        let (cx, cz) = (ox * inset, oz * inset);

        if side != gate_side {
            walls.push(Wall {
                id: format!("wall-{}", side.name()),
                rect: wall_rect(side, cx, cz, size),
                height: WALL_HEIGHT,
            });
            continue;
        }

        let segment = half - gate_width / 2.0;
        let offset = gate_width / 2.0 + segment / 2.0;
        let (low_name, high_name) = if side.runs_along_x() {
            ("west", "east")
        } else {
            ("north", "south")
        };
        for (name, sign) in [(low_name, -1.0), (high_name, 1.0)] {
            let (x, z) = if side.runs_along_x() {
                (sign * offset, cz)
            } else {
                (cx, sign * offset)
            };
            walls.push(Wall {
                id: format!("wall-{}-{}", side.name(), name),
                rect: wall_rect(side, x, z, segment),
                height: WALL_HEIGHT,
            });
        }
    }

    let [ox, oz] = gate_side.outward();
    let gate_rect = if gate_side.runs_along_x() {
        Rect::new(ox * half, oz * half, gate_width, WALL_THICKNESS)
    } else {
        Rect::new(ox * half, oz * half, WALL_THICKNESS, gate_width)
    };

    Perimeter {
        walls,
        gate: Gate {
            rect: gate_rect,
            side: gate_side,
        },
    }
}

fn wall_rect(side: Side, x: f32, z: f32, length: f32) -> Rect {
    if side.runs_along_x() {
        Rect::new(x, z, length, WALL_THICKNESS)
    } else {
        Rect::new(x, z, WALL_THICKNESS, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall<'a>(p: &'a Perimeter, id: &str) -> &'a Wall {
        p.walls
            .iter()
            .find(|w| w.id == id)
            .unwrap_or_else(|| panic!("missing wall {id}"))
    }

    #[test]
    fn west_gate_layout() {
        let p = generate_perimeter(145.0, 16.0, Side::West);
        assert_eq!(p.walls.len(), 5);

        let north = wall(&p, "wall-north");
        assert_eq!(north.rect, Rect::new(0.0, -70.5, 145.0, 4.0));
        assert_eq!(north.height, 8.0);

        let east = wall(&p, "wall-east");
        assert_eq!(east.rect, Rect::new(70.5, 0.0, 4.0, 145.0));

        let wn = wall(&p, "wall-west-north");
        assert_eq!(wn.rect.size, [4.0, 64.5]);
        assert_eq!(wn.rect.pos, [-70.5, -40.25]);
        assert_eq!(wn.rect.max_z(), -8.0);

        let ws = wall(&p, "wall-west-south");
        assert_eq!(ws.rect.min_z(), 8.0);
        assert_eq!(ws.rect.max_z(), 72.5);

        assert_eq!(p.gate.rect.pos, [-72.5, 0.0]);
        assert_eq!(p.gate.width(), 16.0);
        assert_eq!(p.gate.side, Side::West);
    }

    #[test]
    fn gate_gap_matches_gate_width_on_every_side() {
        for side in Side::ALL {
            let p = generate_perimeter(100.0, 12.0, side);
            let split: Vec<&Wall> = p
                .walls
                .iter()
                .filter(|w| w.id.starts_with(&format!("wall-{}-", side.name())))
                .collect();
            assert_eq!(split.len(), 2, "{side:?} should be split");
            let gap = if side.runs_along_x() {
                split[1].rect.min_x() - split[0].rect.max_x()
            } else {
                split[1].rect.min_z() - split[0].rect.max_z()
            };
            assert!((gap - 12.0).abs() < 1e-4, "{side:?} gap {gap}");
        }
    }

    #[test]
    fn split_segments_reach_the_corners() {
        let p = generate_perimeter(100.0, 10.0, Side::North);
        let w = wall(&p, "wall-north-west");
        let e = wall(&p, "wall-north-east");
        assert_eq!(w.rect.min_x(), -50.0);
        assert_eq!(e.rect.max_x(), 50.0);
        assert_eq!(w.rect.pos[1], -48.0);
    }
}
