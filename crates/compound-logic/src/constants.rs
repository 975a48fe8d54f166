//! Level constants: tile and asset codes plus placement tuning.
//!
//! Tile and asset ids are plain `u8` values shared with the renderer and the
//! debug fixtures, so they must stay bit-exact.

pub mod tiles {
    pub const GROUND: u8 = 0;
    pub const PATH: u8 = 1;
    pub const WALL: u8 = 2;
}

pub mod assets {
    pub const NONE: u8 = 0;
    pub const LAMP: u8 = 1;
    pub const BENCH: u8 = 2;
    /// First tree variant; variants occupy `TREE_BASE..TREE_BASE + TREE_VARIANTS`.
    pub const TREE_BASE: u8 = 3;
    pub const TREE_VARIANTS: u8 = 3;
}

pub mod perimeter {
    pub const WALL_THICKNESS: f32 = 4.0;
    pub const WALL_HEIGHT: f32 = 8.0;
    pub const DEFAULT_GATE_WIDTH: f32 = 16.0;
}

pub mod buildings {
    pub const MIN_SIZE: f32 = 15.0;
    pub const MAX_SIZE: f32 = 25.0;
    pub const MIN_HEIGHT: f32 = 10.0;
    pub const HEIGHT_RANGE: f32 = 8.0;
    /// Distance kept free between buildings and the perimeter.
    pub const MARGIN: f32 = 20.0;
    /// Minimum gap between two buildings' footprints.
    pub const SPACING: f32 = 15.0;
    pub const MAX_ATTEMPTS: u32 = 50;
}

pub mod pathways {
    pub const WIDTH: f32 = 4.0;
    /// Inner loop inset from each perimeter side.
    pub const PERIMETER_OFFSET: f32 = 15.0;
    pub const CONNECTOR_LENGTH: f32 = 12.0;
}

pub mod props {
    pub const TREES_PER_DENSITY: f32 = 10.0;
    pub const BENCHES_PER_DENSITY: f32 = 4.0;
    /// Fraction of the compound extent trees may be scattered over.
    pub const TREE_SPREAD: f32 = 0.8;
    pub const LAMP_INTERVAL: f32 = 20.0;
    pub const LAMP_SIDE_OFFSET: f32 = 3.0;
    pub const BENCH_JITTER: f32 = 5.0;
}

pub mod guards {
    /// Stationary guards keep this distance from the gate.
    pub const SAFE_ZONE_RADIUS: f32 = 25.0;
    /// Depth of the north/south patrol rectangles.
    pub const PATROL_LOOP_DEPTH: f32 = 10.0;
    pub const OBJECTIVE: [f32; 2] = [0.0, -5.0];
}

pub mod patrol {
    /// Nominal simulation rate the speed/dwell values below are tuned for.
    pub const BASE_TICK_RATE: f32 = 60.0;
    pub const WALK_SPEED: f32 = 0.08;
    pub const ARRIVE_RADIUS: f32 = 0.12;
    pub const DWELL_TICKS: u32 = 60;
}
