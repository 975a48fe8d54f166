//! Prop scattering: trees in the open, lamps along paths, benches beside them.

use rand::Rng;

use crate::constants::assets::TREE_VARIANTS;
use crate::constants::props::{
    BENCHES_PER_DENSITY, BENCH_JITTER, LAMP_INTERVAL, LAMP_SIDE_OFFSET, TREES_PER_DENSITY,
    TREE_SPREAD,
};
use crate::geometry::{Bench, Lamp, Orientation, Pathway, Props, Tree};

/// Scatter props for a compound of side `compound_size`.
///
/// Trees ignore buildings and paths; the asset grid keeps whichever prop
/// lands on a cell first. Lamps are deterministic, benches pick a random
/// pathway each.
pub fn scatter_props(
    pathways: &[Pathway],
    compound_size: f32,
    density: f32,
    rng: &mut impl Rng,
) -> Props {
    let mut props = Props::default();

    let tree_count = (TREES_PER_DENSITY * density).round().max(0.0) as usize;
    let spread = compound_size * TREE_SPREAD;
    for i in 0..tree_count {
        let x = (rng.gen::<f32>() - 0.5) * spread;
        let z = (rng.gen::<f32>() - 0.5) * spread;
        props.trees.push(Tree {
            pos: [x.round(), z.round()],
            variant: (i % TREE_VARIANTS as usize) as u8,
        });
    }

    for pathway in pathways {
        props.lamps.extend(lamps_along(pathway));
    }

    let bench_count = (BENCHES_PER_DENSITY * density).round().max(0.0) as usize;
    if !pathways.is_empty() {
        for _ in 0..bench_count {
            let pathway = &pathways[rng.gen_range(0..pathways.len())];
            let offset = (rng.gen::<f32>() - 0.5) * 2.0 * BENCH_JITTER;
            props.benches.push(Bench {
                pos: [pathway.rect.pos[0] + offset, pathway.rect.pos[1] + offset],
                rotation_deg: rng.gen_range(0..4u16) * 90,
            });
        }
    }

    log::debug!(
        "scattered {} trees, {} lamps, {} benches",
        props.trees.len(),
        props.lamps.len(),
        props.benches.len()
    );
    props
}

/// Lamps every [`LAMP_INTERVAL`] units from the start of the pathway's long
/// axis, set [`LAMP_SIDE_OFFSET`] to one side.
pub fn lamps_along(pathway: &Pathway) -> Vec<Lamp> {
    let count = (pathway.length() / LAMP_INTERVAL).floor() as usize;
    let [px, pz] = pathway.rect.pos;
    (0..count)
        .map(|i| {
            let along = i as f32 * LAMP_INTERVAL;
            let pos = match pathway.orientation {
                Orientation::Horizontal => {
                    [px - pathway.rect.size[0] / 2.0 + along, pz + LAMP_SIDE_OFFSET]
                }
                Orientation::Vertical => {
                    [px + LAMP_SIDE_OFFSET, pz - pathway.rect.size[1] / 2.0 + along]
                }
            };
            Lamp { pos }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn path(orientation: Orientation, w: f32, d: f32) -> Pathway {
        Pathway {
            id: "p".into(),
            rect: Rect::new(0.0, 0.0, w, d),
            orientation,
        }
    }

    #[test]
    fn lamp_spacing_horizontal() {
        let lamps = lamps_along(&path(Orientation::Horizontal, 115.0, 4.0));
        assert_eq!(lamps.len(), 5);
        assert_eq!(lamps[0].pos, [-57.5, 3.0]);
        assert_eq!(lamps[1].pos, [-37.5, 3.0]);
    }

    #[test]
    fn lamp_spacing_vertical() {
        let lamps = lamps_along(&path(Orientation::Vertical, 4.0, 40.0));
        assert_eq!(lamps.len(), 2);
        assert_eq!(lamps[0].pos, [3.0, -20.0]);
        assert_eq!(lamps[1].pos, [3.0, 0.0]);
    }

    #[test]
    fn short_path_gets_no_lamps() {
        assert!(lamps_along(&path(Orientation::Horizontal, 12.0, 4.0)).is_empty());
    }

    #[test]
    fn density_scales_counts() {
        let paths = vec![path(Orientation::Horizontal, 115.0, 4.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let props = scatter_props(&paths, 145.0, 1.0, &mut rng);
        assert_eq!(props.trees.len(), 10);
        assert_eq!(props.benches.len(), 4);

        let sparse = scatter_props(&paths, 145.0, 0.7, &mut rng);
        assert_eq!(sparse.trees.len(), 7);
        assert_eq!(sparse.benches.len(), 3);
    }

    #[test]
    fn trees_stay_in_spread_and_cycle_variants() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let props = scatter_props(&[], 145.0, 1.0, &mut rng);
        let limit = 145.0 * TREE_SPREAD / 2.0 + 0.5;
        for (i, tree) in props.trees.iter().enumerate() {
            assert!(tree.pos[0].abs() <= limit && tree.pos[1].abs() <= limit);
            assert_eq!(tree.variant as usize, i % 3);
        }
        assert!(props.benches.is_empty(), "no pathways, no benches");
    }

    #[test]
    fn benches_snap_rotation_and_stay_near_a_path() {
        let paths = vec![path(Orientation::Horizontal, 40.0, 4.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let props = scatter_props(&paths, 145.0, 3.0, &mut rng);
        for bench in &props.benches {
            assert!([0, 90, 180, 270].contains(&bench.rotation_deg));
            assert!(bench.pos[0].abs() <= BENCH_JITTER);
            assert_eq!(bench.pos[0], bench.pos[1]);
        }
    }
}
