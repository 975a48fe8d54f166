//! Random building placement with spacing-based rejection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::buildings::{
    HEIGHT_RANGE, MARGIN, MAX_ATTEMPTS, MAX_SIZE, MIN_HEIGHT, MIN_SIZE, SPACING,
};
use crate::geometry::{Building, BuildingKind, Rect};

/// Result of a placement run. `placed.len() + rejected` equals the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingPlacement {
    pub placed: Vec<Building>,
    /// Buildings dropped after exhausting their attempts.
    pub rejected: u32,
}

/// Place up to `count` buildings inside a compound of side `compound_size`.
///
/// Each building gets [`MAX_ATTEMPTS`] tries at a random size and center;
/// a candidate is accepted when its footprint, grown by [`SPACING`], stays
/// clear of every building accepted so far. Positions and sizes are rounded
/// to whole world units.
pub fn place_buildings(count: u32, compound_size: f32, rng: &mut impl Rng) -> BuildingPlacement {
    let mut result = BuildingPlacement::default();

    for i in 0..count as usize {
        let mut accepted = None;

        for _ in 0..MAX_ATTEMPTS {
            let width = MIN_SIZE + rng.gen::<f32>() * (MAX_SIZE - MIN_SIZE);
            let depth = MIN_SIZE + rng.gen::<f32>() * (MAX_SIZE - MIN_SIZE);
            let height = MIN_HEIGHT + rng.gen::<f32>() * HEIGHT_RANGE;

            let x = (rng.gen::<f32>() - 0.5) * (compound_size - MARGIN * 2.0 - width);
            let z = (rng.gen::<f32>() - 0.5) * (compound_size - MARGIN * 2.0 - depth);

            let rect = Rect::new(x.round(), z.round(), width.round(), depth.round());
            if is_clear(&rect, &result.placed) {
                accepted = Some(Building {
                    id: format!("building-{}", i + 1),
                    rect,
                    height: height.round(),
                    kind: BuildingKind::for_index(i),
                });
                break;
            }
        }

        match accepted {
            Some(building) => result.placed.push(building),
            None => {
                log::debug!(
                    "building-{} dropped after {} placement attempts",
                    i + 1,
                    MAX_ATTEMPTS
                );
                result.rejected += 1;
            }
        }
    }

    result
}

fn is_clear(candidate: &Rect, placed: &[Building]) -> bool {
    let grown = candidate.expand(SPACING / 2.0);
    placed
        .iter()
        .all(|b| !grown.overlaps(&b.rect.expand(SPACING / 2.0)))
}
