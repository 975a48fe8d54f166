//! Pure level generation logic for walled compounds.
//!
//! This crate contains everything that does not need an engine: shape
//! placement in world space, rasterization into tile grids, wall merging for
//! the renderer, and the guard patrol state machine. Functions take plain data
//! and an explicit RNG and return results, so the same seed always produces
//! the same level on every platform.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Tile/asset codes and generation tuning values |
//! | [`debug`] | ASCII maps (tiles, guards, objective, start) and text summaries |
//! | [`generation`] | Perimeter, buildings, pathways, props, guards, entry point |
//! | [`geometry`] | World-space rectangles and typed shapes |
//! | [`options`] | Generation options, presets, validation |
//! | [`patrol`] | Guard patrol state machine (idle/walk, ping-pong routes) |
//! | [`raster`] | World ↔ grid mapping and layout rasterization |
//! | [`walls`] | Greedy merge of wall cells into rectangles |

pub mod constants;
pub mod debug;
pub mod generation;
pub mod geometry;
pub mod options;
pub mod patrol;
pub mod raster;
pub mod walls;
