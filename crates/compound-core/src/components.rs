//! Component definitions for runtime guard entities.
//!
//! Components are pure data. Patrolling guards carry the
//! [`compound_logic::patrol::Guard`] state machine directly; stationary
//! guards carry a [`StationaryPost`] and never move.

use compound_logic::geometry::Vec3;
use serde::{Deserialize, Serialize};

/// Marks an entity as a guard and names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardTag {
    pub id: String,
}

/// Position of the guard in the level's guard list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnOrder(pub usize);

/// A guard that holds one spot and one heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationaryPost {
    pub position: Vec3,
    pub rotation_deg: f32,
}
