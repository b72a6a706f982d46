//! Classification constants and typed JSON configuration

use crate::color::metric::Color;
use crate::color::palette::{Palette, TileType};
use crate::io::error::{MapError, Result, file_system_error};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Number of cells a map is split into when no count is configured
pub const DEFAULT_TILE_NUMBER: usize = 100;

/// Bins per colour channel in reference histograms
pub const HISTOGRAM_BINS: usize = 10;

/// Relative vote difference below which a cell is reported as mixed
///
/// Stored as `(numerator, denominator)` so vote counts compare exactly.
pub const BLEND_THRESHOLD: (usize, usize) = (1, 5);

/// Label pair that blends into the swamp label instead of a composite
pub const SWAMP_PAIR: (&str, &str) = ("L", "W");
/// Label reported for cells mixing the swamp pair
pub const SWAMP_LABEL: &str = "S";
/// Separator between the two labels of a composite cell
pub const COMPOSITE_SEPARATOR: char = '/';

/// Opacity of the tile colours painted over the source in overlays
pub const OVERLAY_ALPHA: f64 = 0.5;
/// Colour used in overlays for labels that match no palette entry
pub const UNKNOWN_LABEL_COLOR: Color = Color::new(128, 128, 128);

/// Fixed seed for reproducible shuffling
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Suffix of the exported tile map table
pub const TILEMAP_SUFFIX: &str = "_tilemap.csv";
/// Suffix of the exported tile count table
pub const TILE_COUNTS_SUFFIX: &str = "_tile_counts.csv";
/// Suffix of the rendered overlay image
pub const OVERLAY_SUFFIX: &str = "_overlay.png";
/// Suffix of the directory holding individual tile crops
pub const TILE_CROPS_SUFFIX: &str = "_tiles";

/// File extensions accepted as map or reference images
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// One palette row as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaletteRow {
    /// Canonical tile name
    pub name: String,
    /// Short label written into tile maps
    pub label: String,
    /// Reference colour in `(r,g,b)` form
    pub color: String,
}

/// Settings for converting map images into tile maps
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapConfig {
    /// Target number of cells per map
    #[serde(default = "default_tile_number")]
    pub tile_number: usize,
    /// Tile types in label order
    pub palette: Vec<PaletteRow>,
    /// Directory of labelled reference tiles enabling histogram matching
    #[serde(default)]
    pub library_directory: Option<PathBuf>,
}

const fn default_tile_number() -> usize {
    DEFAULT_TILE_NUMBER
}

impl MapConfig {
    /// Load map settings from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON
    /// for this structure
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Validate the configured rows into a palette
    ///
    /// # Errors
    ///
    /// Returns an error if a colour string is malformed, the palette is
    /// empty or two rows share a label
    pub fn palette(&self) -> Result<Palette> {
        let tile_types = self
            .palette
            .iter()
            .map(|row| {
                let color = row.color.parse::<Color>()?;
                Ok(TileType::new(row.name.clone(), row.label.clone(), color))
            })
            .collect::<Result<Vec<_>>>()?;
        Palette::new(tile_types)
    }
}

/// One kind of card and how many copies a stack holds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardType {
    /// Card title
    pub name: String,
    /// Card text shown when dealt
    #[serde(default)]
    pub description: String,
    /// Number of copies in a fresh stack
    pub count: usize,
}

/// A named stack of weighted card types
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StackConfig {
    /// Stack name used in the game log
    pub name: String,
    /// Card types making up the stack
    pub cards: Vec<CardType>,
}

/// Settings for the card dealer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeckConfig {
    /// Stacks dealt in round-robin order
    pub stacks: Vec<StackConfig>,
}

impl DeckConfig {
    /// Load card stacks from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON
    /// for this structure
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path.as_ref())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| file_system_error(path, "read configuration", e))?;
    serde_json::from_str(&contents).map_err(|e| MapError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
