//! Generation options and their validation.
//!
//! The generator itself never fails: it clamps and drops instead. Callers
//! that want to reject nonsense input up front run [`validate_options`] first,
//! which reports every problem at once.
//!
//! ```
//! use compound_logic::options::{validate_options, GenerationOptions};
//!
//! let mut options = GenerationOptions::default();
//! options.building_count = 4;
//! options.seed = Some(7);
//! assert!(validate_options(&options).is_empty());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::constants::perimeter::DEFAULT_GATE_WIDTH;
use crate::geometry::Side;

/// Inputs to [`crate::generation::generate_compound`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Tiles per grid side.
    pub grid_size: usize,
    /// World units per tile.
    pub tile_size: f32,
    /// Buildings requested; fewer may be placed.
    pub building_count: u32,
    /// Prop density multiplier (1.0 = 10 trees, 4 benches).
    pub density: f32,
    /// Width of the perimeter gate opening in world units.
    pub gate_width: f32,
    pub gate_side: Side,
    /// Seed for every random placement (None = draw one and report it).
    pub seed: Option<u64>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            grid_size: 29,
            tile_size: 5.0,
            building_count: 3,
            density: 1.0,
            gate_width: DEFAULT_GATE_WIDTH,
            gate_side: Side::West,
            seed: None,
        }
    }
}

impl GenerationOptions {
    /// Side length of the compound in world units.
    pub fn world_size(&self) -> f32 {
        self.grid_size as f32 * self.tile_size
    }

    /// Shorthand for [`validate_options`].
    pub fn validate(&self) -> Vec<OptionsError> {
        validate_options(self)
    }
}

/// Option validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// Grid must have at least one tile.
    EmptyGrid,
    TileSizeNotPositive(f32),
    DensityNegative(f32),
    GateWidthNotPositive(f32),
    /// Gate must be narrower than the compound side.
    GateTooWide { gate_width: f32, side_length: f32 },
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::EmptyGrid => write!(f, "grid size must be at least 1"),
            OptionsError::TileSizeNotPositive(t) => {
                write!(f, "tile size must be positive, got {}", t)
            }
            OptionsError::DensityNegative(d) => write!(f, "density must not be negative, got {}", d),
            OptionsError::GateWidthNotPositive(g) => {
                write!(f, "gate width must be positive, got {}", g)
            }
            OptionsError::GateTooWide {
                gate_width,
                side_length,
            } => write!(
                f,
                "gate width {} does not fit a compound side of {}",
                gate_width, side_length
            ),
        }
    }
}

impl std::error::Error for OptionsError {}

/// Validate generation options, returning all errors found.
pub fn validate_options(options: &GenerationOptions) -> Vec<OptionsError> {
    let mut errors = Vec::new();

    if options.grid_size == 0 {
        errors.push(OptionsError::EmptyGrid);
    }
    if !(options.tile_size > 0.0) {
        errors.push(OptionsError::TileSizeNotPositive(options.tile_size));
    }
    if !(options.density >= 0.0) {
        errors.push(OptionsError::DensityNegative(options.density));
    }
    if !(options.gate_width > 0.0) {
        errors.push(OptionsError::GateWidthNotPositive(options.gate_width));
    } else if options.gate_width >= options.world_size() {
        errors.push(OptionsError::GateTooWide {
            gate_width: options.gate_width,
            side_length: options.world_size(),
        });
    }

    errors
}

/// The three reference layouts the debug harness renders.
pub fn presets() -> Vec<(&'static str, GenerationOptions)> {
    vec![
        ("default compound", GenerationOptions::default()),
        (
            "small compound",
            GenerationOptions {
                grid_size: 21,
                building_count: 2,
                density: 0.7,
                ..GenerationOptions::default()
            },
        ),
        (
            "large compound",
            GenerationOptions {
                grid_size: 35,
                building_count: 4,
                density: 1.2,
                ..GenerationOptions::default()
            },
        ),
    ]
}

/// Random but valid options, reproducible from `seed`.
pub fn randomize_options(seed: u64) -> GenerationOptions {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    GenerationOptions {
        grid_size: rng.gen_range(21..=41),
        tile_size: 5.0,
        building_count: rng.gen_range(1..=5),
        density: rng.gen_range(0.5..1.5),
        gate_width: DEFAULT_GATE_WIDTH,
        gate_side: Side::ALL[rng.gen_range(0..Side::ALL.len())],
        seed: Some(seed),
    }
}
