//! Systems - per-tick logic over guard entities.

use compound_logic::patrol::{Guard, PatrolParams};
use hecs::World;

/// Advance every patrolling guard by one tick.
///
/// Guards share no state, so iteration order does not affect the result.
pub fn patrol_system(world: &mut World, params: &PatrolParams) {
    for (_entity, guard) in world.query_mut::<&mut Guard>() {
        guard.tick(params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compound_logic::geometry::Vec3;
    use compound_logic::patrol::GuardMode;

    #[test]
    fn ticks_every_patrol() {
        let mut world = World::new();
        let route = vec![Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)];
        let a = world.spawn((Guard::new("a", Vec3::ZERO, route.clone()).unwrap(),));
        let b = world.spawn((Guard::new("b", Vec3::ZERO, route).unwrap(),));

        let params = PatrolParams::default();
        for _ in 0..=params.dwell_ticks {
            patrol_system(&mut world, &params);
        }

        for entity in [a, b] {
            let guard = world.get::<&Guard>(entity).unwrap();
            assert_eq!(guard.mode, GuardMode::Walk);
        }
    }

    #[test]
    fn empty_world_is_fine() {
        let mut world = World::new();
        patrol_system(&mut world, &PatrolParams::default());
        assert_eq!(world.len(), 0);
    }
}
