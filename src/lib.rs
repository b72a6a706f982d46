//! Map screenshot to terrain tile map conversion for a tabletop game aid
//!
//! A source image is cut into a regular grid sized from its aspect ratio and
//! a target tile count. Each cell is labelled from a closed palette of tile
//! types, either by nearest-colour pixel votes with blending of close
//! second places or by matching colour histograms against labelled reference
//! tiles. Weighted card stacks drive the rest of the game.

#![forbid(unsafe_code)]

/// Cell classification strategies and reference data
pub mod classify;
/// Colours, palettes and colour histograms
pub mod color;
/// Weighted card stacks
pub mod deck;
/// Input/output operations and error handling
pub mod io;
/// Grid partitioning and tile map assembly
pub mod spatial;

pub use io::error::{MapError, Result};
