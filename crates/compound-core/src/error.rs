//! Session errors.

use compound_logic::patrol::RouteError;

#[derive(Debug)]
pub enum SessionError {
    /// A patrol guard's route could not be built.
    Route(RouteError),
    Json(serde_json::Error),
    /// Tick rate must be a positive, finite number of ticks per second.
    InvalidTickRate(f32),
}

impl From<RouteError> for SessionError {
    fn from(e: RouteError) -> Self {
        SessionError::Route(e)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(e: serde_json::Error) -> Self {
        SessionError::Json(e)
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Route(e) => write!(f, "Guard spawn rejected: {}", e),
            SessionError::Json(e) => write!(f, "Serialization error: {}", e),
            SessionError::InvalidTickRate(hz) => {
                write!(f, "Tick rate must be positive, got {}", hz)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Route(e) => Some(e),
            SessionError::Json(e) => Some(e),
            SessionError::InvalidTickRate(_) => None,
        }
    }
}
