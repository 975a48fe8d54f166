//! Guard placement: fixed posts plus perimeter patrols.
//!
//! The topology is fixed, only the building post follows the random layout:
//!
//! | Guard | Kind | Position |
//! |-------|------|----------|
//! | `guard-gate` | stationary | inside the gate, past the safe zone, facing out |
//! | `guard-objective` | stationary | next to the objective |
//! | `guard-building-1` | stationary | beside the first building, if any |
//! | `patrol-north` | patrol | rectangle on the north inner loop |
//! | `patrol-east` | patrol | back and forth on the east inner loop |
//! | `patrol-south` | patrol | rectangle on the south inner loop |

use serde::{Deserialize, Serialize};

use crate::constants::guards::{PATROL_LOOP_DEPTH, SAFE_ZONE_RADIUS};
use crate::constants::pathways::PERIMETER_OFFSET;
use crate::geometry::{Building, Gate, Vec3};

/// What a guard does once the level is live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GuardKind {
    Stationary { rotation_deg: f32 },
    Patrol { route: Vec<Vec3> },
}

/// Generation-time guard record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardSpawn {
    pub id: String,
    pub start_pos: Vec3,
    pub kind: GuardKind,
}

impl GuardSpawn {
    pub fn is_patrol(&self) -> bool {
        matches!(self.kind, GuardKind::Patrol { .. })
    }
}

pub fn place_guards(
    buildings: &[Building],
    compound_size: f32,
    gate: &Gate,
    objective: [f32; 2],
) -> Vec<GuardSpawn> {
    let mut guards = Vec::with_capacity(6);

    let [ox, oz] = gate.side.outward();
    guards.push(GuardSpawn {
        id: "guard-gate".into(),
        start_pos: Vec3::new(
            gate.rect.pos[0] - ox * SAFE_ZONE_RADIUS,
            0.0,
            gate.rect.pos[1] - oz * SAFE_ZONE_RADIUS,
        ),
        kind: GuardKind::Stationary {
            rotation_deg: (gate.side.inward_heading_deg() + 180.0) % 360.0,
        },
    });

    guards.push(GuardSpawn {
        id: "guard-objective".into(),
        start_pos: Vec3::new(objective[0] + 5.0, 0.0, objective[1] - 5.0),
        kind: GuardKind::Stationary {
            rotation_deg: 225.0,
        },
    });

    // Only the first building is guarded
    if let Some(building) = buildings.first() {
        guards.push(GuardSpawn {
            id: "guard-building-1".into(),
            start_pos: Vec3::new(building.rect.pos[0] - 10.0, 0.0, building.rect.pos[1] + 5.0),
            kind: GuardKind::Stationary { rotation_deg: 0.0 },
        });
    }

    let half = compound_size / 2.0;
    let quarter = compound_size / 4.0;
    let north = -half + PERIMETER_OFFSET;
    let south = half - PERIMETER_OFFSET;
    let east = half - PERIMETER_OFFSET;

    let routes = [
        (
            "patrol-north",
            vec![
                Vec3::new(-quarter, 0.0, north),
                Vec3::new(quarter, 0.0, north),
                Vec3::new(quarter, 0.0, north + PATROL_LOOP_DEPTH),
                Vec3::new(-quarter, 0.0, north + PATROL_LOOP_DEPTH),
            ],
        ),
        (
            "patrol-east",
            vec![
                Vec3::new(east, 0.0, -quarter),
                Vec3::new(east, 0.0, quarter),
            ],
        ),
        (
            "patrol-south",
            vec![
                Vec3::new(-quarter, 0.0, south),
                Vec3::new(quarter, 0.0, south),
                Vec3::new(quarter, 0.0, south - PATROL_LOOP_DEPTH),
                Vec3::new(-quarter, 0.0, south - PATROL_LOOP_DEPTH),
            ],
        ),
    ];
    for (id, route) in routes {
        guards.push(GuardSpawn {
            id: id.into(),
            start_pos: route[0],
            kind: GuardKind::Patrol { route },
        });
    }

    guards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::perimeter::generate_perimeter;
    use crate::geometry::{BuildingKind, Rect, Side};

    fn building() -> Building {
        Building {
            id: "building-1".into(),
            rect: Rect::new(20.0, -10.0, 18.0, 18.0),
            height: 12.0,
            kind: BuildingKind::Admin,
        }
    }

    #[test]
    fn fixed_topology_with_one_building_post() {
        let gate = generate_perimeter(145.0, 16.0, Side::West).gate;
        let guards = place_guards(&[building(), building()], 145.0, &gate, [0.0, -5.0]);
        let ids: Vec<&str> = guards.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "guard-gate",
                "guard-objective",
                "guard-building-1",
                "patrol-north",
                "patrol-east",
                "patrol-south"
            ]
        );
    }

    #[test]
    fn no_buildings_no_building_post() {
        let gate = generate_perimeter(145.0, 16.0, Side::West).gate;
        let guards = place_guards(&[], 145.0, &gate, [0.0, -5.0]);
        assert_eq!(guards.len(), 5);
    }

    #[test]
    fn gate_guard_inside_safe_zone_facing_out() {
        let gate = generate_perimeter(145.0, 16.0, Side::West).gate;
        let guards = place_guards(&[], 145.0, &gate, [0.0, -5.0]);
        let g = &guards[0];
        assert_eq!(g.start_pos, Vec3::new(-47.5, 0.0, 0.0));
        assert_eq!(g.kind, GuardKind::Stationary { rotation_deg: 270.0 });
    }

    #[test]
    fn objective_and_building_posts() {
        let gate = generate_perimeter(145.0, 16.0, Side::West).gate;
        let guards = place_guards(&[building()], 145.0, &gate, [0.0, -5.0]);
        assert_eq!(guards[1].start_pos, Vec3::new(5.0, 0.0, -10.0));
        assert_eq!(guards[2].start_pos, Vec3::new(10.0, 0.0, -5.0));
    }

    #[test]
    fn patrol_routes_start_at_first_waypoint() {
        let gate = generate_perimeter(145.0, 16.0, Side::West).gate;
        let guards = place_guards(&[], 145.0, &gate, [0.0, -5.0]);
        for g in guards.iter().filter(|g| g.is_patrol()) {
            match &g.kind {
                GuardKind::Patrol { route } => {
                    assert!(route.len() >= 2, "{} route too short", g.id);
                    assert_eq!(route[0], g.start_pos);
                }
                other => panic!("expected patrol, got {other:?}"),
            }
        }
        match &guards[2].kind {
            GuardKind::Patrol { route } => {
                assert_eq!(route[0], Vec3::new(-36.25, 0.0, -57.5));
                assert_eq!(route[2], Vec3::new(36.25, 0.0, -47.5));
            }
            other => panic!("expected north patrol, got {other:?}"),
        }
    }
}
