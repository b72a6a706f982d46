//! Tile map assembly and per-label counts

use crate::classify::library::ReferenceLibrary;
use crate::classify::strategy::TileClassifier;
use crate::color::palette::Palette;
use crate::io::error::{Result, computation_error};
use crate::spatial::grid::{GridShape, slice_into_cells};
use image::RgbImage;
use ndarray::Array2;

/// Grid of tile labels with shape `(y_tiles, x_tiles)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    labels: Array2<String>,
}

impl TileMap {
    /// Wrap an already assembled label grid
    pub const fn from_labels(labels: Array2<String>) -> Self {
        Self { labels }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.labels.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.labels.ncols()
    }

    /// Grid shape this map was built with
    pub fn shape(&self) -> GridShape {
        GridShape {
            x_tiles: self.cols(),
            y_tiles: self.rows(),
        }
    }

    /// Label at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.labels.get((row, col)).map(String::as_str)
    }

    /// Underlying label array
    pub const fn labels(&self) -> &Array2<String> {
        &self.labels
    }

    /// Count cells per label
    ///
    /// Every palette label gets an entry, in palette order, even when unused.
    /// Labels outside the palette (composites and the swamp label) follow in
    /// row-major order of first appearance and are never split into their
    /// constituents.
    pub fn tile_counts(&self, palette: &Palette) -> TileCounts {
        let mut entries: Vec<(String, usize)> = palette
            .iter()
            .map(|tile_type| (tile_type.label().to_string(), 0))
            .collect();

        for label in &self.labels {
            if let Some(entry) = entries.iter_mut().find(|(known, _)| known == label) {
                entry.1 += 1;
            } else {
                entries.push((label.clone(), 1));
            }
        }

        TileCounts { entries }
    }
}

/// Number of cells holding each exact label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCounts {
    entries: Vec<(String, usize)>,
}

impl TileCounts {
    /// Cells labelled exactly `label`
    pub fn get(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(known, _)| known == label)
            .map_or(0, |(_, count)| *count)
    }

    /// Sum over every label, equal to the number of cells
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// `(label, count)` pairs, palette labels first
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }

    /// Number of distinct labels tracked
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no labels are tracked
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Partitions an image and classifies every cell into a [`TileMap`]
#[derive(Debug, Clone, Copy)]
pub struct TileMapBuilder<'a> {
    classifier: TileClassifier<'a>,
    target_tile_count: usize,
}

impl<'a> TileMapBuilder<'a> {
    /// Create a builder; the presence of `library` selects histogram matching
    pub const fn new(
        palette: &'a Palette,
        library: Option<&'a ReferenceLibrary>,
        target_tile_count: usize,
    ) -> Self {
        Self {
            classifier: TileClassifier::new(palette, library),
            target_tile_count,
        }
    }

    /// Classifier used for each cell
    pub const fn classifier(&self) -> &TileClassifier<'a> {
        &self.classifier
    }

    /// Grid shape that will be used for `image`
    ///
    /// # Errors
    ///
    /// Returns an error if the target count is zero, the image has zero area
    /// or the grid would be finer than the image
    pub fn shape_for(&self, image: &RgbImage) -> Result<GridShape> {
        let shape = GridShape::compute(image.width(), image.height(), self.target_tile_count)?;
        shape.checked_cell_size(image.width(), image.height())?;
        Ok(shape)
    }

    /// Build the tile map for `image`
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid or any cell fails to
    /// classify; no partial map is returned
    pub fn build(&self, image: &RgbImage) -> Result<TileMap> {
        self.build_with_progress(image, |_, _| {})
    }

    /// Build the tile map, reporting `(classified, total)` after every cell
    ///
    /// # Errors
    ///
    /// Returns an error if the input is invalid or any cell fails to
    /// classify; no partial map is returned
    pub fn build_with_progress<F>(&self, image: &RgbImage, mut on_cell: F) -> Result<TileMap>
    where
        F: FnMut(usize, usize),
    {
        let shape = self.shape_for(image)?;
        let total = shape.cell_count();
        log::debug!(
            "Classifying {}x{} image into {}x{} cells with {}",
            image.width(),
            image.height(),
            shape.x_tiles,
            shape.y_tiles,
            self.classifier.strategy().name()
        );

        let mut labels = Array2::<String>::default((shape.y_tiles, shape.x_tiles));
        for (done, cell) in slice_into_cells(image, shape)?.enumerate() {
            let label = self.classifier.classify(&cell.image)?;
            let slot = labels.get_mut((cell.row, cell.col)).ok_or_else(|| {
                computation_error(
                    "tile map assembly",
                    &format!("cell ({}, {}) outside grid", cell.row, cell.col),
                )
            })?;
            *slot = label;
            on_cell(done + 1, total);
        }

        Ok(TileMap::from_labels(labels))
    }
}

/// Build a tile map in one call
///
/// # Errors
///
/// Returns an error if the input is invalid or any cell fails to classify
pub fn build_tile_map(
    image: &RgbImage,
    target_tile_count: usize,
    palette: &Palette,
    library: Option<&ReferenceLibrary>,
) -> Result<TileMap> {
    TileMapBuilder::new(palette, library, target_tile_count).build(image)
}
