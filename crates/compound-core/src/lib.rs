//! Compound Core - runtime session for generated compound levels.
//!
//! Loads a [`compound_logic::generation::GeneratedLevel`] into an ECS world
//! and runs its guards at a fixed tick rate.
//!
//! # Architecture
//!
//! The runtime uses an Entity Component System (ECS) via `hecs`:
//! - **Entities**: one per guard
//! - **Components**: [`GuardTag`](components::GuardTag), spawn order, and
//!   either a patrol state machine or a stationary post
//! - **Systems**: [`patrol_system`](systems::patrol_system), run once per tick
//!
//! # Example
//!
//! ```rust
//! use compound_core::prelude::*;
//! use compound_logic::options::GenerationOptions;
//!
//! let mut session = LevelSession::new();
//! session
//!     .generate(&GenerationOptions { seed: Some(7), ..Default::default() })
//!     .unwrap();
//!
//! // Half a second at 60 Hz
//! assert_eq!(session.update(0.5), 30);
//! assert_eq!(session.guards().len(), session.guard_count());
//! ```

pub mod components;
pub mod error;
pub mod session;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::error::SessionError;
    pub use crate::session::{GuardState, LevelSession};
}
