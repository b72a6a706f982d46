//! The closed set of terrain tile types a map is classified into

use crate::color::metric::Color;
use crate::io::error::{Result, invalid_input};
use std::collections::HashSet;

/// One terrain type with its label and canonical colour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileType {
    name: String,
    label: String,
    color: Color,
}

impl TileType {
    /// Create a tile type
    pub fn new(name: impl Into<String>, label: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            color,
        }
    }

    /// Canonical tile name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short label identifying the tile type
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Reference colour pixels are compared against
    pub const fn color(&self) -> Color {
        self.color
    }
}

/// Ordered, immutable set of tile types with pairwise distinct labels
///
/// Iteration order is the configuration order and decides ties: whenever two
/// tile types are equally close to a pixel, the earlier one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    tile_types: Vec<TileType>,
}

impl Palette {
    /// Build a palette from tile types in configuration order
    ///
    /// # Errors
    ///
    /// Returns an error if no tile types are given, a label is empty or two
    /// tile types share a label
    pub fn new(tile_types: Vec<TileType>) -> Result<Self> {
        if tile_types.is_empty() {
            return Err(invalid_input(
                "palette",
                &"[]",
                &"at least one tile type is required",
            ));
        }

        let mut seen = HashSet::new();
        for tile_type in &tile_types {
            if tile_type.label.is_empty() {
                return Err(invalid_input(
                    "palette",
                    &tile_type.name,
                    &"tile label must not be empty",
                ));
            }
            if !seen.insert(tile_type.label.as_str()) {
                return Err(invalid_input(
                    "palette",
                    &tile_type.label,
                    &"tile labels must be distinct",
                ));
            }
        }

        Ok(Self { tile_types })
    }

    /// Number of tile types
    pub fn len(&self) -> usize {
        self.tile_types.len()
    }

    /// Always false, palettes are validated non-empty
    pub fn is_empty(&self) -> bool {
        self.tile_types.is_empty()
    }

    /// Tile type at a zero-based position
    pub fn get(&self, index: usize) -> Option<&TileType> {
        self.tile_types.get(index)
    }

    /// Tile types in configuration order
    pub fn iter(&self) -> std::slice::Iter<'_, TileType> {
        self.tile_types.iter()
    }

    /// Position of the tile type carrying `label`
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.tile_types.iter().position(|t| t.label == label)
    }

    /// Reference colour for `label`
    pub fn color_of(&self, label: &str) -> Option<Color> {
        self.index_of(label)
            .and_then(|index| self.get(index))
            .map(TileType::color)
    }

    /// Index of the tile type whose colour is nearest to `color`
    ///
    /// Ties resolve to the first tile type in palette order.
    pub fn nearest(&self, color: Color) -> usize {
        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;
        for (index, tile_type) in self.tile_types.iter().enumerate() {
            let distance = color.distance(tile_type.color);
            if distance < best_distance {
                best_distance = distance;
                best_index = index;
            }
        }
        best_index
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a TileType;
    type IntoIter = std::slice::Iter<'a, TileType>;

    fn into_iter(self) -> Self::IntoIter {
        self.tile_types.iter()
    }
}
