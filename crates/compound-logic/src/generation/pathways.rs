//! Deterministic pathway network: gate entry, inner perimeter loop, and one
//! connector per building.
//!
//! Paths are not routed around buildings. Overlaps are settled by paint order
//! during rasterization.

use crate::constants::pathways::{CONNECTOR_LENGTH, PERIMETER_OFFSET, WIDTH};
use crate::geometry::{Building, Gate, Orientation, Pathway, Rect, Side};

pub fn build_pathways(buildings: &[Building], compound_size: f32, gate: &Gate) -> Vec<Pathway> {
    let half = compound_size / 2.0;
    let mut pathways = Vec::with_capacity(5 + buildings.len());

    // Gate to center, along the gate side's normal
    let [ox, oz] = gate.side.outward();
    let entry = if gate.side.runs_along_x() {
        Pathway {
            id: "path-entry".into(),
            rect: Rect::new(ox * half / 2.0, oz * half / 2.0, WIDTH, half),
            orientation: Orientation::Vertical,
        }
    } else {
        Pathway {
            id: "path-entry".into(),
            rect: Rect::new(ox * half / 2.0, oz * half / 2.0, half, WIDTH),
            orientation: Orientation::Horizontal,
        }
    };
    pathways.push(entry);

    // Inner loop
    let loop_length = compound_size - 2.0 * PERIMETER_OFFSET;
    let inset = half - PERIMETER_OFFSET;
    for side in Side::ALL {
        let [sx, sz] = side.outward();
        let (rect, orientation) = if side.runs_along_x() {
            (
                Rect::new(0.0, sz * inset, loop_length, WIDTH),
                Orientation::Horizontal,
            )
        } else {
            (
                Rect::new(sx * inset, 0.0, WIDTH, loop_length),
                Orientation::Vertical,
            )
        };
        pathways.push(Pathway {
            id: format!("path-perimeter-{}", side.name()),
            rect,
            orientation,
        });
    }

    for (idx, building) in buildings.iter().enumerate() {
        pathways.push(Pathway {
            id: format!("path-building-{}", idx + 1),
            rect: Rect::new(
                building.rect.pos[0],
                building.rect.pos[1],
                CONNECTOR_LENGTH,
                WIDTH,
            ),
            orientation: Orientation::Horizontal,
        });
    }

    log::debug!("built {} pathways", pathways.len());
    pathways
}
