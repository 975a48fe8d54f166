//! Guard patrol state machine.
//!
//! Each guard alternates between two modes:
//!
//! - **idle**: counts dwell ticks, then starts walking.
//! - **walk**: heads for the current waypoint at a fixed speed, snapping onto
//!   it when close enough, then goes idle again.
//!
//! The route itself never changes. Walking off either end of it flips the
//! travel direction and targets the neighbour of the waypoint just reached,
//! so a guard ping-pongs along its route without ever re-targeting the point
//! it is standing on.
//!
//! ```
//! use compound_logic::geometry::Vec3;
//! use compound_logic::patrol::{Guard, GuardMode, PatrolParams};
//!
//! let route = vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)];
//! let mut guard = Guard::new("g", route[0], route).unwrap();
//! let params = PatrolParams::default();
//! for _ in 0..=params.dwell_ticks {
//!     guard.tick(&params);
//! }
//! assert_eq!(guard.mode, GuardMode::Walk);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::patrol::{ARRIVE_RADIUS, BASE_TICK_RATE, DWELL_TICKS, WALK_SPEED};
use crate::geometry::Vec3;

/// Tuning for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolParams {
    /// World units walked per tick.
    pub speed: f32,
    /// Distance under which a waypoint counts as reached.
    pub arrive_radius: f32,
    /// Ticks spent idle at each waypoint.
    pub dwell_ticks: u32,
}

impl Default for PatrolParams {
    fn default() -> Self {
        Self {
            speed: WALK_SPEED,
            arrive_radius: ARRIVE_RADIUS,
            dwell_ticks: DWELL_TICKS,
        }
    }
}

impl PatrolParams {
    /// Params giving the same walking speed and dwell time in seconds when
    /// ticked `tick_rate` times per second.
    ///
    /// Returns `None` unless `tick_rate` is finite and positive.
    pub fn for_tick_rate(tick_rate: f32) -> Option<Self> {
        if !tick_rate.is_finite() || tick_rate <= 0.0 {
            return None;
        }
        let scale = BASE_TICK_RATE / tick_rate;
        Some(Self {
            speed: WALK_SPEED * scale,
            arrive_radius: ARRIVE_RADIUS,
            dwell_ticks: (DWELL_TICKS as f32 / scale).round() as u32,
        })
    }
}

/// Construction failures for [`Route`] and [`Guard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Patrols need somewhere to go and somewhere to come back to.
    TooFewWaypoints(usize),
}

impl std::fmt::Display for RouteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteError::TooFewWaypoints(n) => {
                write!(f, "patrol route needs at least 2 waypoints, got {}", n)
            }
        }
    }
}

impl std::error::Error for RouteError {}

/// Immutable waypoint list with at least two entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec3>", into = "Vec<Vec3>")]
pub struct Route(Vec<Vec3>);

impl TryFrom<Vec<Vec3>> for Route {
    type Error = RouteError;

    fn try_from(waypoints: Vec<Vec3>) -> Result<Self, Self::Error> {
        Route::new(waypoints)
    }
}

impl From<Route> for Vec<Vec3> {
    fn from(route: Route) -> Self {
        route.0
    }
}

impl Route {
    pub fn new(waypoints: Vec<Vec3>) -> Result<Self, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints(waypoints.len()));
        }
        Ok(Self(waypoints))
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed route.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardMode {
    Idle,
    Walk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

/// Runtime guard record, advanced once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guard {
    pub id: String,
    pub position: Vec3,
    /// Heading in radians, `atan2(dx, dz)`.
    pub rotation: f32,
    pub route: Route,
    /// Index of the waypoint being walked to.
    pub route_index: usize,
    pub direction: Direction,
    pub mode: GuardMode,
    /// Dwell counter while idle.
    pub frame: u32,
}

impl Guard {
    /// A guard idling at `position`, about to head for `route[0]`.
    pub fn new(
        id: impl Into<String>,
        position: Vec3,
        waypoints: Vec<Vec3>,
    ) -> Result<Self, RouteError> {
        Ok(Self {
            id: id.into(),
            position,
            rotation: 0.0,
            route: Route::new(waypoints)?,
            route_index: 0,
            direction: Direction::Forward,
            mode: GuardMode::Idle,
            frame: 0,
        })
    }

    pub fn target(&self) -> Vec3 {
        self.route.waypoints()[self.route_index]
    }

    /// Advance one simulation tick.
    pub fn tick(&mut self, params: &PatrolParams) {
        match self.mode {
            GuardMode::Idle => {
                if self.frame >= params.dwell_ticks {
                    self.mode = GuardMode::Walk;
                    self.frame = 0;
                } else {
                    self.frame += 1;
                }
            }
            GuardMode::Walk => self.walk(params),
        }
    }

    fn walk(&mut self, params: &PatrolParams) {
        let target = self.target();
        let dx = target.x - self.position.x;
        let dz = target.z - self.position.z;
        let distance = self.position.planar_distance(&target);

        self.rotation = dx.atan2(dz);

        if distance < params.arrive_radius {
            self.position = target;
            self.advance();
            self.mode = GuardMode::Idle;
            self.frame = 0;
        } else {
            let ratio = (params.speed / distance).min(1.0);
            self.position.x += dx * ratio;
            self.position.z += dz * ratio;
        }
    }

    /// Move `route_index` one step, bouncing off the ends.
    fn advance(&mut self) {
        let last = self.route.len() - 1;
        match self.direction {
            Direction::Forward if self.route_index >= last => {
                self.direction = Direction::Backward;
                self.route_index = last - 1;
            }
            Direction::Forward => self.route_index += 1,
            Direction::Backward if self.route_index == 0 => {
                self.direction = Direction::Forward;
                self.route_index = 1;
            }
            Direction::Backward => self.route_index -= 1,
        }
    }

    /// Waypoints in the order the guard will now visit them, starting with
    /// the current target. Same as reversing the route at each end and
    /// reading from `route_index` on.
    pub fn upcoming_waypoints(&self) -> Vec<Vec3> {
        let points = self.route.waypoints();
        match self.direction {
            Direction::Forward => points[self.route_index..].to_vec(),
            Direction::Backward => points[..=self.route_index].iter().rev().copied().collect(),
        }
    }
}
