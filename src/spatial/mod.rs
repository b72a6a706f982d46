//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Grid shape selection and cell slicing
//! - Tile map assembly and tile counts

/// Grid shape and cell slicing
pub mod grid;
/// Tile maps, tile counts and the tile map builder
pub mod tilemap;

pub use grid::GridShape;
pub use tilemap::{TileCounts, TileMap, TileMapBuilder};
