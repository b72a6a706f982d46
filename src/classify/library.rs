//! Labelled reference tiles for histogram matching
//!
//! Reference images are named `<index>_<anything>.<ext>` where `index` is the
//! 1-based position of their tile type in the palette, e.g. `3_forest_1.jpg`.

use crate::color::histogram::ColorHistogram;
use crate::color::palette::Palette;
use crate::io::configuration::IMAGE_EXTENSIONS;
use crate::io::error::{MapError, Result, file_system_error, invalid_input};
use image::RgbImage;
use std::path::Path;

/// One reference tile reduced to its histogram
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTile {
    /// Zero-based palette index of the tile type it depicts
    pub palette_index: usize,
    /// Histogram of the reference image
    pub histogram: ColorHistogram,
}

/// Reference tiles in enumeration order
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLibrary {
    tiles: Vec<ReferenceTile>,
}

impl ReferenceLibrary {
    /// Build a library from in-memory images paired with palette indices
    ///
    /// # Errors
    ///
    /// Returns an error if no images are given, an index falls outside the
    /// palette or an image is empty
    pub fn from_images<'a, I>(entries: I, palette: &Palette) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, &'a RgbImage)>,
    {
        let tiles = entries
            .into_iter()
            .map(|(palette_index, image)| {
                check_index(palette_index, palette)?;
                Ok(ReferenceTile {
                    palette_index,
                    histogram: ColorHistogram::from_image(image)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_tiles(tiles)
    }

    /// Load every reference image in `directory`
    ///
    /// Files are visited in file-name order, which fixes the tie-breaking
    /// order of later matches. Files without an image extension are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed, a file name lacks
    /// a valid palette index prefix, an image cannot be opened or no
    /// reference images are found
    pub fn from_directory<P: AsRef<Path>>(directory: P, palette: &Palette) -> Result<Self> {
        let directory = directory.as_ref();
        let entries = std::fs::read_dir(directory)
            .map_err(|e| file_system_error(directory, "list reference tiles", e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| file_system_error(directory, "list reference tiles", e))?
                .path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut tiles = Vec::with_capacity(paths.len());
        for path in paths {
            let palette_index = parse_palette_index(&path)?;
            check_index(palette_index, palette)?;
            let image = image::open(&path)
                .map_err(|e| MapError::MissingReference {
                    path: path.clone(),
                    source: e,
                })?
                .to_rgb8();
            tiles.push(ReferenceTile {
                palette_index,
                histogram: ColorHistogram::from_image(&image)?,
            });
        }

        log::debug!(
            "Loaded {} reference tiles from {}",
            tiles.len(),
            directory.display()
        );
        Self::from_tiles(tiles)
    }

    /// Build a library from precomputed reference tiles
    ///
    /// # Errors
    ///
    /// Returns an error if `tiles` is empty
    pub fn from_tiles(tiles: Vec<ReferenceTile>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(invalid_input(
                "reference library",
                &"[]",
                &"at least one reference tile is required",
            ));
        }
        Ok(Self { tiles })
    }

    /// Number of reference tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false, libraries are validated non-empty
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Reference tiles in enumeration order
    pub fn tiles(&self) -> &[ReferenceTile] {
        &self.tiles
    }

    /// Reference tile closest to `histogram` together with its score
    ///
    /// The first minimum in enumeration order wins ties.
    pub fn nearest(&self, histogram: &ColorHistogram) -> Option<(&ReferenceTile, f64)> {
        let mut best: Option<(&ReferenceTile, f64)> = None;
        for tile in &self.tiles {
            let score = tile.histogram.difference(histogram);
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((tile, score));
            }
        }
        best
    }
}

pub(crate) fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Zero-based palette index encoded in a reference file name
///
/// # Errors
///
/// Returns an error if the name does not start with a positive integer
/// followed by an underscore
pub fn parse_palette_index(path: &Path) -> Result<usize> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let index = name
        .split_once('_')
        .and_then(|(prefix, _)| prefix.parse::<usize>().ok())
        .filter(|&index| index >= 1)
        .ok_or_else(|| {
            invalid_input(
                "reference file",
                &name,
                &"file name must start with a 1-based tile index and '_'",
            )
        })?;
    Ok(index - 1)
}

fn check_index(palette_index: usize, palette: &Palette) -> Result<()> {
    if palette_index < palette.len() {
        Ok(())
    } else {
        Err(invalid_input(
            "reference tile index",
            &(palette_index + 1),
            &format!("palette has {} tile types", palette.len()),
        ))
    }
}
