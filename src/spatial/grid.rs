//! Grid shape selection and slicing of source images into cells
//!
//! The grid keeps the aspect ratio of the source image while aiming for a
//! target number of cells. Cells are produced in row-major order (rows outer,
//! columns inner); tile maps and tile crops both rely on that order. Pixels
//! past the last full cell on the right and bottom edges are discarded.

use crate::io::error::{Result, invalid_input};
use image::{GenericImageView, RgbImage};

/// Number of cells along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Cells per row
    pub x_tiles: usize,
    /// Cells per column
    pub y_tiles: usize,
}

impl GridShape {
    /// Derive the grid from the image aspect ratio and a target cell count
    ///
    /// `x_tiles = floor(sqrt(target * width / height))` and
    /// `y_tiles = floor(target / x_tiles)`, each at least one. The realised
    /// cell count can differ from `target_tile_count`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is zero or the image has zero area
    pub fn compute(
        image_width: u32,
        image_height: u32,
        target_tile_count: usize,
    ) -> Result<Self> {
        if target_tile_count < 1 {
            return Err(invalid_input(
                "target_tile_count",
                &target_tile_count,
                &"must be at least 1",
            ));
        }
        if image_width == 0 || image_height == 0 {
            return Err(invalid_input(
                "image",
                &format!("{image_width}x{image_height}"),
                &"image must have non-zero width and height",
            ));
        }

        let ratio = f64::from(image_width) / f64::from(image_height);
        let x_tiles = ((target_tile_count as f64 * ratio).sqrt().floor() as usize).max(1);
        let y_tiles = (target_tile_count / x_tiles).max(1);

        Ok(Self { x_tiles, y_tiles })
    }

    /// Total number of cells, saturating at `usize::MAX`
    pub const fn cell_count(&self) -> usize {
        self.x_tiles.saturating_mul(self.y_tiles)
    }

    /// Cell `(width, height)` in pixels for an image of the given size
    ///
    /// Returns `None` when an axis has no cells or more cells than a `u32`
    /// can count.
    pub fn cell_size(&self, image_width: u32, image_height: u32) -> Option<(u32, u32)> {
        let per_axis = |pixels: u32, tiles: usize| {
            u32::try_from(tiles)
                .ok()
                .and_then(|tiles| pixels.checked_div(tiles))
        };
        Some((
            per_axis(image_width, self.x_tiles)?,
            per_axis(image_height, self.y_tiles)?,
        ))
    }

    /// Cell size, rejecting grids finer than the image resolution
    ///
    /// # Errors
    ///
    /// Returns an error if a cell would be less than one pixel wide or tall
    pub fn checked_cell_size(&self, image_width: u32, image_height: u32) -> Result<(u32, u32)> {
        match self.cell_size(image_width, image_height) {
            Some((cell_width, cell_height)) if cell_width > 0 && cell_height > 0 => {
                Ok((cell_width, cell_height))
            }
            _ => Err(invalid_input(
                "grid",
                &format!("{}x{} on {image_width}x{image_height}", self.x_tiles, self.y_tiles),
                &"grid is finer than the image, cells would be empty",
            )),
        }
    }
}

/// One grid cell cut out of the source image
#[derive(Debug, Clone)]
pub struct Cell {
    /// Row index, top to bottom
    pub row: usize,
    /// Column index, left to right
    pub col: usize,
    /// Owned copy of the cell pixels
    pub image: RgbImage,
}

/// Lazy row-major sequence of cells
///
/// Each call to [`slice_into_cells`] starts a fresh sequence.
#[derive(Debug)]
pub struct Cells<'a> {
    image: &'a RgbImage,
    shape: GridShape,
    cell_width: u32,
    cell_height: u32,
    next: usize,
}

impl Iterator for Cells<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.shape.cell_count() {
            return None;
        }
        let row = self.next / self.shape.x_tiles;
        let col = self.next % self.shape.x_tiles;
        self.next += 1;

        let x = col as u32 * self.cell_width;
        let y = row as u32 * self.cell_height;
        let image = self
            .image
            .view(x, y, self.cell_width, self.cell_height)
            .to_image();

        Some(Cell { row, col, image })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.shape.cell_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells<'_> {}

/// Slice `image` into the cells of `shape`
///
/// # Errors
///
/// Returns an error if the grid is finer than the image
pub fn slice_into_cells(image: &RgbImage, shape: GridShape) -> Result<Cells<'_>> {
    let (cell_width, cell_height) = shape.checked_cell_size(image.width(), image.height())?;
    Ok(Cells {
        image,
        shape,
        cell_width,
        cell_height,
        next: 0,
    })
}
