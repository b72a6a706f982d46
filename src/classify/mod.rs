//! Cell classification
//!
//! This module contains:
//! - Pixel vote tallies and the label blending rule
//! - The labelled reference tile library
//! - The classifier and its two interchangeable strategies

/// Vote tallies and composite label rules
pub mod blending;
/// Labelled reference tiles for histogram matching
pub mod library;
/// Classification strategies selected once per run
pub mod strategy;

pub use strategy::{Strategy, TileClassifier};
