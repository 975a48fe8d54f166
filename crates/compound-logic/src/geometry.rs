//! World-space shapes for compound layouts.
//!
//! Everything here is plain data in world units, centered on the compound
//! origin: x grows east, z grows south (north wall sits at −z).

use serde::{Deserialize, Serialize};

use crate::constants::tiles;

/// 3D position vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance on the ground plane (y ignored).
    pub fn planar_distance(&self, other: &Self) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Axis-aligned rectangle: center + full size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: [f32; 2],
    pub size: [f32; 2],
}

impl Rect {
    pub fn new(x: f32, z: f32, width: f32, depth: f32) -> Self {
        Self {
            pos: [x, z],
            size: [width, depth],
        }
    }

    pub fn min_x(&self) -> f32 {
        self.pos[0] - self.size[0] / 2.0
    }
    pub fn max_x(&self) -> f32 {
        self.pos[0] + self.size[0] / 2.0
    }
    pub fn min_z(&self) -> f32 {
        self.pos[1] - self.size[1] / 2.0
    }
    pub fn max_z(&self) -> f32 {
        self.pos[1] + self.size[1] / 2.0
    }

    /// Grow the rectangle by `amount` on every side.
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            pos: self.pos,
            size: [self.size[0] + 2.0 * amount, self.size[1] + 2.0 * amount],
        }
    }

    /// Strict AABB overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        (self.pos[0] - other.pos[0]).abs() < (self.size[0] + other.size[0]) / 2.0
            && (self.pos[1] - other.pos[1]).abs() < (self.size[1] + other.size[1]) / 2.0
    }
}

/// Anything with a world-space rectangular footprint.
pub trait Footprint {
    fn rect(&self) -> Rect;
}

impl Footprint for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

/// Which side of the compound a feature sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    South,
    East,
    #[default]
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

    /// Unit vector (x, z) pointing from the compound center out through this side.
    pub fn outward(self) -> [f32; 2] {
        match self {
            Side::North => [0.0, -1.0],
            Side::South => [0.0, 1.0],
            Side::East => [1.0, 0.0],
            Side::West => [-1.0, 0.0],
        }
    }

    /// Heading in degrees (atan2(dx, dz) convention) of someone walking in
    /// through this side.
    pub fn inward_heading_deg(self) -> f32 {
        match self {
            Side::North => 0.0,
            Side::South => 180.0,
            Side::East => 270.0,
            Side::West => 90.0,
        }
    }

    /// Walls on the north/south sides run along x.
    pub fn runs_along_x(self) -> bool {
        matches!(self, Side::North | Side::South)
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::North => "north",
            Side::South => "south",
            Side::East => "east",
            Side::West => "west",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: String,
    pub rect: Rect,
    pub height: f32,
}

/// Building palette, assigned by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    Admin,
    Barracks,
    Storage,
    Warehouse,
    Lab,
}

impl BuildingKind {
    pub const PALETTE: [BuildingKind; 5] = [
        BuildingKind::Admin,
        BuildingKind::Barracks,
        BuildingKind::Storage,
        BuildingKind::Warehouse,
        BuildingKind::Lab,
    ];

    pub fn for_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            BuildingKind::Admin => "admin",
            BuildingKind::Barracks => "barracks",
            BuildingKind::Storage => "storage",
            BuildingKind::Warehouse => "warehouse",
            BuildingKind::Lab => "lab",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub rect: Rect,
    pub height: f32,
    pub kind: BuildingKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pathway {
    pub id: String,
    pub rect: Rect,
    pub orientation: Orientation,
}

impl Pathway {
    /// Length along the pathway's long axis.
    pub fn length(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.rect.size[0],
            Orientation::Vertical => self.rect.size[1],
        }
    }
}

/// Opening in the perimeter wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub rect: Rect,
    pub side: Side,
}

impl Gate {
    pub fn width(&self) -> f32 {
        if self.side.runs_along_x() {
            self.rect.size[0]
        } else {
            self.rect.size[1]
        }
    }
}

impl Footprint for Wall {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Footprint for Building {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Footprint for Pathway {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Footprint for Gate {
    fn rect(&self) -> Rect {
        self.rect
    }
}

/// Any shape the rasterizer paints onto the tile map.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Wall(&'a Wall),
    Building(&'a Building),
    Pathway(&'a Pathway),
}

impl<'a> Shape<'a> {
    /// Tile value this shape paints.
    pub fn tile_value(&self) -> u8 {
        match self {
            Shape::Wall(_) | Shape::Building(_) => tiles::WALL,
            Shape::Pathway(_) => tiles::PATH,
        }
    }

    pub fn id(&self) -> &'a str {
        match *self {
            Shape::Wall(w) => &w.id,
            Shape::Building(b) => &b.id,
            Shape::Pathway(p) => &p.id,
        }
    }

    /// Extruded height, if the shape stands up from the ground.
    pub fn height(&self) -> Option<f32> {
        match self {
            Shape::Wall(w) => Some(w.height),
            Shape::Building(b) => Some(b.height),
            Shape::Pathway(_) => None,
        }
    }
}

impl Footprint for Shape<'_> {
    fn rect(&self) -> Rect {
        match self {
            Shape::Wall(w) => w.rect,
            Shape::Building(b) => b.rect,
            Shape::Pathway(p) => p.rect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub pos: [f32; 2],
    /// 0-based variant, rasterized as `TREE_BASE + variant`.
    pub variant: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lamp {
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bench {
    pub pos: [f32; 2],
    /// One of 0, 90, 180, 270.
    pub rotation_deg: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Props {
    pub trees: Vec<Tree>,
    pub lamps: Vec<Lamp>,
    pub benches: Vec<Bench>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_bounds() {
        let r = Rect::new(10.0, -4.0, 6.0, 2.0);
        assert_eq!(r.min_x(), 7.0);
        assert_eq!(r.max_x(), 13.0);
        assert_eq!(r.min_z(), -5.0);
        assert_eq!(r.max_z(), -3.0);
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.expand(0.5).overlaps(&b));
    }

    #[test]
    fn shape_tile_values() {
        let wall = Wall {
            id: "w".into(),
            rect: Rect::new(0.0, 0.0, 4.0, 4.0),
            height: 8.0,
        };
        let path = Pathway {
            id: "p".into(),
            rect: Rect::new(0.0, 0.0, 12.0, 4.0),
            orientation: Orientation::Horizontal,
        };
        assert_eq!(Shape::Wall(&wall).tile_value(), tiles::WALL);
        assert_eq!(Shape::Pathway(&path).tile_value(), tiles::PATH);
        assert_eq!(Shape::Pathway(&path).height(), None);
        assert_eq!(path.length(), 12.0);
    }

    #[test]
    fn building_palette_cycles() {
        assert_eq!(BuildingKind::for_index(0), BuildingKind::Admin);
        assert_eq!(BuildingKind::for_index(4), BuildingKind::Lab);
        assert_eq!(BuildingKind::for_index(5), BuildingKind::Admin);
    }

    #[test]
    fn west_gate_faces_east_when_entering() {
        assert_eq!(Side::West.inward_heading_deg(), 90.0);
        assert_eq!(Side::West.outward(), [-1.0, 0.0]);
    }
}
