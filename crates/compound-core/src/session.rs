//! Level session - main entry point for running a generated compound.
//!
//! A session owns the ECS world for one loaded level. Guards become entities
//! on [`LevelSession::load`]; [`LevelSession::update`] turns real time into
//! whole patrol ticks at a fixed rate.

use compound_logic::constants::patrol::BASE_TICK_RATE;
use compound_logic::generation::{generate_compound, GeneratedLevel, GuardKind};
use compound_logic::geometry::Vec3;
use compound_logic::options::GenerationOptions;
use compound_logic::patrol::{Guard, GuardMode, PatrolParams};
use compound_logic::walls::{merge_walls, WallRect};
use hecs::World;
use serde::{Deserialize, Serialize};

use crate::components::{GuardTag, SpawnOrder, StationaryPost};
use crate::error::SessionError;
use crate::systems::patrol_system;

/// Absorbs f32 → f64 rounding when converting elapsed time to ticks.
const TICK_EPSILON: f64 = 1e-6;

/// Snapshot of one guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardState {
    pub id: String,
    pub position: Vec3,
    pub rotation_deg: f32,
    /// `None` for stationary guards.
    pub mode: Option<GuardMode>,
    /// Waypoint being walked to, patrols only.
    pub target: Option<Vec3>,
}

#[derive(Serialize)]
struct SessionDump<'a> {
    tick_rate: f32,
    ticks: u64,
    level: Option<&'a GeneratedLevel>,
    walls: &'a [WallRect],
    guards: Vec<GuardState>,
}

/// Runtime state for one loaded level
pub struct LevelSession {
    /// ECS world containing the guard entities
    pub world: World,
    level: Option<GeneratedLevel>,
    /// Merged wall blocks of the loaded level
    walls: Vec<WallRect>,

    // Fixed-step timing
    tick_rate: f32,
    params: PatrolParams,
    elapsed: f64,
    ticks: u64,
}

impl LevelSession {
    /// Empty session ticking at the nominal 60 Hz.
    pub fn new() -> Self {
        Self {
            world: World::new(),
            level: None,
            walls: Vec::new(),
            tick_rate: BASE_TICK_RATE,
            params: PatrolParams::default(),
            elapsed: 0.0,
            ticks: 0,
        }
    }

    /// Empty session ticking `tick_rate` times per second. Patrol speed and
    /// dwell are rescaled so guards behave the same in seconds.
    pub fn with_tick_rate(tick_rate: f32) -> Result<Self, SessionError> {
        let params =
            PatrolParams::for_tick_rate(tick_rate).ok_or(SessionError::InvalidTickRate(tick_rate))?;
        Ok(Self {
            tick_rate,
            params,
            ..Self::new()
        })
    }

    /// Generate a fresh level and load it. Returns the seed used.
    pub fn generate(&mut self, options: &GenerationOptions) -> Result<u64, SessionError> {
        let level = generate_compound(options);
        let seed = level.seed;
        self.load(level)?;
        Ok(seed)
    }

    /// Replace the current level.
    ///
    /// Every guard is built before the world is touched, so a rejected
    /// patrol route leaves the previous level running.
    pub fn load(&mut self, mut level: GeneratedLevel) -> Result<(), SessionError> {
        let mut posts = Vec::new();
        let mut patrols = Vec::new();

        for (order, spawn) in level.guards.iter().enumerate() {
            let tag = GuardTag {
                id: spawn.id.clone(),
            };
            match &spawn.kind {
                GuardKind::Stationary { rotation_deg } => posts.push((
                    tag,
                    SpawnOrder(order),
                    StationaryPost {
                        position: spawn.start_pos,
                        rotation_deg: *rotation_deg,
                    },
                )),
                GuardKind::Patrol { route } => {
                    let guard = Guard::new(spawn.id.clone(), spawn.start_pos, route.clone())
                        .map_err(|e| {
                            log::warn!("guard {} rejected: {}", spawn.id, e);
                            e
                        })?;
                    patrols.push((tag, SpawnOrder(order), guard));
                }
            }
        }

        self.world.clear();
        let patrol_count = patrols.len();
        for bundle in posts {
            self.world.spawn(bundle);
        }
        for bundle in patrols {
            self.world.spawn(bundle);
        }

        self.walls = merge_walls(&level.grid.map, level.tile_size);
        level.grid.needs_reload = true;
        self.elapsed = 0.0;
        self.ticks = 0;

        log::info!(
            "loaded level (seed {}): {} guards ({} patrolling), {} wall blocks",
            level.seed,
            level.guards.len(),
            patrol_count,
            self.walls.len()
        );
        self.level = Some(level);
        Ok(())
    }

    /// Advance by `delta_seconds` of real time. Returns the number of ticks run.
    pub fn update(&mut self, delta_seconds: f32) -> u64 {
        if !(delta_seconds.is_finite() && delta_seconds > 0.0) {
            return 0;
        }
        self.elapsed += delta_seconds as f64;
        let due = (self.elapsed * self.tick_rate as f64 + TICK_EPSILON).floor() as u64;
        let run = due.saturating_sub(self.ticks);
        for _ in 0..run {
            patrol_system(&mut self.world, &self.params);
        }
        self.ticks += run;
        run
    }

    /// All guards in spawn order.
    pub fn guards(&self) -> Vec<GuardState> {
        let mut states = Vec::new();
        let mut query = self.world.query::<(
            &GuardTag,
            &SpawnOrder,
            Option<&Guard>,
            Option<&StationaryPost>,
        )>();
        for (_entity, (tag, order, patrol, post)) in query.iter() {
            let state = match (patrol, post) {
                (Some(guard), _) => GuardState {
                    id: tag.id.clone(),
                    position: guard.position,
                    rotation_deg: guard.rotation.to_degrees(),
                    mode: Some(guard.mode),
                    target: Some(guard.target()),
                },
                (None, Some(post)) => GuardState {
                    id: tag.id.clone(),
                    position: post.position,
                    rotation_deg: post.rotation_deg,
                    mode: None,
                    target: None,
                },
                (None, None) => continue,
            };
            states.push((*order, state));
        }
        states.sort_by_key(|(order, _)| *order);
        states.into_iter().map(|(_, state)| state).collect()
    }

    /// Debug dump of the level, merged walls and guard states.
    pub fn to_json(&self) -> Result<String, SessionError> {
        let dump = SessionDump {
            tick_rate: self.tick_rate,
            ticks: self.ticks,
            level: self.level.as_ref(),
            walls: &self.walls,
            guards: self.guards(),
        };
        Ok(serde_json::to_string_pretty(&dump)?)
    }

    /// Report and clear the reload flag set by [`Self::load`].
    pub fn take_reload(&mut self) -> bool {
        match self.level.as_mut() {
            Some(level) => std::mem::replace(&mut level.grid.needs_reload, false),
            None => false,
        }
    }

    pub fn level(&self) -> Option<&GeneratedLevel> {
        self.level.as_ref()
    }

    pub fn wall_rects(&self) -> &[WallRect] {
        &self.walls
    }

    pub fn guard_count(&self) -> usize {
        self.world.query::<&GuardTag>().iter().count()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn tick_rate(&self) -> f32 {
        self.tick_rate
    }
}

impl Default for LevelSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compound_logic::patrol::RouteError;

    fn seeded(seed: u64) -> GenerationOptions {
        GenerationOptions {
            seed: Some(seed),
            ..GenerationOptions::default()
        }
    }

    fn patrols(session: &LevelSession) -> Vec<GuardState> {
        session
            .guards()
            .into_iter()
            .filter(|g| g.mode.is_some())
            .collect()
    }

    #[test]
    fn test_session_creation() {
        let session = LevelSession::new();
        assert_eq!(session.guard_count(), 0);
        assert_eq!(session.tick_count(), 0);
        assert!(session.level().is_none());
    }

    #[test]
    fn test_generate_spawns_guards_in_order() {
        let mut session = LevelSession::new();
        let seed = session.generate(&seeded(42)).unwrap();
        assert_eq!(seed, 42);

        let level = session.level().unwrap();
        let expected: Vec<String> = level.guards.iter().map(|g| g.id.clone()).collect();
        let actual: Vec<String> = session.guards().into_iter().map(|g| g.id).collect();
        assert_eq!(actual, expected);
        assert_eq!(session.guard_count(), expected.len());
        assert_eq!(patrols(&session).len(), 3);
        assert!(!session.wall_rects().is_empty());
    }

    #[test]
    fn test_one_second_is_sixty_ticks() {
        let mut session = LevelSession::new();
        session.generate(&seeded(1)).unwrap();

        assert_eq!(session.update(1.0), 60);
        assert!(patrols(&session)
            .iter()
            .all(|g| g.mode == Some(GuardMode::Idle)));

        assert_eq!(session.update(1.0 / 60.0), 1);
        assert!(patrols(&session)
            .iter()
            .all(|g| g.mode == Some(GuardMode::Walk)));
    }

    #[test]
    fn test_small_deltas_accumulate() {
        let mut session = LevelSession::new();
        session.generate(&seeded(1)).unwrap();
        let mut ran = 0;
        for _ in 0..120 {
            ran += session.update(1.0 / 120.0);
        }
        assert_eq!(ran, 60);
        assert_eq!(session.tick_count(), 60);
        assert_eq!(session.update(0.0), 0);
        assert_eq!(session.update(-1.0), 0);
    }

    #[test]
    fn test_tick_rate_keeps_dwell_in_seconds() {
        let mut session = LevelSession::with_tick_rate(30.0).unwrap();
        session.generate(&seeded(1)).unwrap();
        assert_eq!(session.update(1.0), 30);
        assert!(patrols(&session)
            .iter()
            .all(|g| g.mode == Some(GuardMode::Idle)));
        session.update(1.0 / 30.0);
        assert!(patrols(&session)
            .iter()
            .all(|g| g.mode == Some(GuardMode::Walk)));
    }

    #[test]
    fn test_bad_tick_rate() {
        assert!(matches!(
            LevelSession::with_tick_rate(0.0),
            Err(SessionError::InvalidTickRate(_))
        ));
        assert!(LevelSession::with_tick_rate(f32::NAN).is_err());
    }

    #[test]
    fn test_stationary_guards_hold_position() {
        let mut session = LevelSession::new();
        session.generate(&seeded(9)).unwrap();
        let before: Vec<GuardState> = session
            .guards()
            .into_iter()
            .filter(|g| g.mode.is_none())
            .collect();
        for _ in 0..10 {
            session.update(1.0);
        }
        let after: Vec<GuardState> = session
            .guards()
            .into_iter()
            .filter(|g| g.mode.is_none())
            .collect();
        assert_eq!(before, after);
        assert_eq!(after[0].id, "guard-gate");
    }

    #[test]
    fn test_rejected_route_keeps_previous_level() {
        let mut session = LevelSession::new();
        session.generate(&seeded(3)).unwrap();
        let count = session.guard_count();

        let mut broken = generate_compound(&seeded(4));
        let patrol = broken.guards.iter_mut().find(|g| g.is_patrol()).unwrap();
        patrol.kind = GuardKind::Patrol {
            route: vec![Vec3::ZERO],
        };

        let err = session.load(broken).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Route(RouteError::TooFewWaypoints(1))
        ));
        assert_eq!(session.guard_count(), count);
        assert_eq!(session.level().unwrap().seed, 3);
    }

    #[test]
    fn test_reload_flag() {
        let mut session = LevelSession::new();
        assert!(!session.take_reload());
        session.generate(&seeded(5)).unwrap();
        assert!(session.take_reload());
        assert!(!session.take_reload());
    }

    #[test]
    fn test_json_dump() {
        let mut session = LevelSession::new();
        session.generate(&seeded(6)).unwrap();
        session.update(0.5);

        let json = session.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ticks"], 30);
        assert_eq!(value["level"]["seed"], 6);
        assert_eq!(
            value["guards"].as_array().unwrap().len(),
            session.guard_count()
        );
        assert_eq!(value["guards"][0]["id"], "guard-gate");
    }
}
