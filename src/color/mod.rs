//! Colour handling shared by both classification strategies

/// Per-channel colour histograms for texture matching
pub mod histogram;
/// RGB colours and the Euclidean colour distance
pub mod metric;
/// Tile types and the palette they form
pub mod palette;

pub use metric::Color;
pub use palette::{Palette, TileType};
