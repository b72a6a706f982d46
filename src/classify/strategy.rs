//! Cell classification by nearest palette colour or nearest reference histogram

use crate::classify::blending::LabelVotes;
use crate::classify::library::ReferenceLibrary;
use crate::color::histogram::ColorHistogram;
use crate::color::metric::Color;
use crate::color::palette::Palette;
use crate::io::error::{Result, computation_error, invalid_input};
use image::RgbImage;

/// How cells are matched against reference data, fixed for a whole run
#[derive(Debug, Clone, Copy)]
pub enum Strategy<'a> {
    /// Every pixel votes for its nearest palette colour, then votes are blended
    NearestColor,
    /// The cell histogram is matched against labelled reference tiles
    Histogram(&'a ReferenceLibrary),
}

impl Strategy<'_> {
    /// Short name used in log output
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NearestColor => "nearest-color",
            Self::Histogram(_) => "nearest-histogram",
        }
    }
}

/// Assigns a tile label to a cell image
#[derive(Debug, Clone, Copy)]
pub struct TileClassifier<'a> {
    palette: &'a Palette,
    strategy: Strategy<'a>,
}

impl<'a> TileClassifier<'a> {
    /// Select the strategy by the presence of a reference library
    pub const fn new(palette: &'a Palette, library: Option<&'a ReferenceLibrary>) -> Self {
        let strategy = match library {
            Some(library) => Strategy::Histogram(library),
            None => Strategy::NearestColor,
        };
        Self { palette, strategy }
    }

    /// Palette labels are drawn from
    pub const fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// Strategy selected for this run
    pub const fn strategy(&self) -> Strategy<'a> {
        self.strategy
    }

    /// Classify one cell image
    ///
    /// # Errors
    ///
    /// Returns an error if the cell has no pixels or a reference tile points
    /// outside the palette
    pub fn classify(&self, cell: &RgbImage) -> Result<String> {
        match self.strategy {
            Strategy::NearestColor => classify_by_color(cell, self.palette),
            Strategy::Histogram(library) => classify_by_histogram(cell, self.palette, library),
        }
    }
}

/// Per-pixel nearest-colour votes for a cell
pub fn pixel_votes(cell: &RgbImage, palette: &Palette) -> LabelVotes {
    let mut votes = LabelVotes::new(palette.len());
    for pixel in cell.pixels() {
        votes.add(palette.nearest(Color::from(*pixel)));
    }
    votes
}

/// Label a cell by majority of nearest-colour pixel votes with blending
///
/// # Errors
///
/// Returns an error if the cell has no pixels
pub fn classify_by_color(cell: &RgbImage, palette: &Palette) -> Result<String> {
    if cell.width() == 0 || cell.height() == 0 {
        return Err(invalid_input(
            "cell",
            &format!("{}x{}", cell.width(), cell.height()),
            &"cannot classify an empty cell",
        ));
    }
    pixel_votes(cell, palette).resolve(palette)
}

/// Label a cell by the reference tile with the most similar histogram
///
/// # Errors
///
/// Returns an error if the cell has no pixels or the matched reference tile
/// points outside the palette
pub fn classify_by_histogram(
    cell: &RgbImage,
    palette: &Palette,
    library: &ReferenceLibrary,
) -> Result<String> {
    let histogram = ColorHistogram::from_image(cell)?;
    let (reference, _) = library.nearest(&histogram).ok_or_else(|| {
        computation_error("histogram match", &"reference library is empty")
    })?;

    palette
        .get(reference.palette_index)
        .map(|tile_type| tile_type.label().to_string())
        .ok_or_else(|| {
            computation_error(
                "histogram match",
                &format!("no tile type at index {}", reference.palette_index),
            )
        })
}
