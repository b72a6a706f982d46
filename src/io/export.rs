//! Table, overlay and tile-crop export for classified maps

use crate::color::metric::Color;
use crate::color::palette::Palette;
use crate::io::configuration::{COMPOSITE_SEPARATOR, SWAMP_LABEL, SWAMP_PAIR, UNKNOWN_LABEL_COLOR};
use crate::io::error::{MapError, Result, file_system_error};
use crate::spatial::grid::{GridShape, slice_into_cells};
use crate::spatial::tilemap::{TileCounts, TileMap};
use image::{Rgb, RgbImage};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::Path;

/// Render the tile map as CSV: a header of column indices, then one line per row
pub fn tile_map_csv(tile_map: &TileMap) -> String {
    let header = (0..tile_map.cols())
        .map(|col| col.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let mut out = header;
    out.push('\n');
    for row in tile_map.labels().rows() {
        let line = row
            .iter()
            .map(|label| csv_field(label))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Render tile counts as CSV with `name,label,count` columns
///
/// Labels outside the palette are written with an empty name. Fields
/// containing separators or quotes are quoted.
pub fn tile_counts_csv(counts: &TileCounts, palette: &Palette) -> String {
    let mut out = String::from("name,label,count\n");
    for (label, count) in counts.iter() {
        let name = palette
            .index_of(label)
            .and_then(|index| palette.get(index))
            .map_or("", |tile_type| tile_type.name());
        // Writing to a String cannot fail
        let _ = writeln!(out, "{},{},{count}", csv_field(name), csv_field(label));
    }
    out
}

/// Write the tile map CSV to `path`
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn write_tile_map<P: AsRef<Path>>(tile_map: &TileMap, path: P) -> Result<()> {
    write_text(path.as_ref(), &tile_map_csv(tile_map))
}

/// Write the tile counts CSV to `path`
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn write_tile_counts<P: AsRef<Path>>(
    counts: &TileCounts,
    palette: &Palette,
    path: P,
) -> Result<()> {
    write_text(path.as_ref(), &tile_counts_csv(counts, palette))
}

/// Display colour for a cell label
///
/// Palette labels use their reference colour, composites the mean of their
/// parts and the swamp label the mean of the swamp pair.
pub fn label_color(label: &str, palette: &Palette) -> Color {
    if let Some(color) = palette.color_of(label) {
        return color;
    }

    let parts: Vec<&str> = if label == SWAMP_LABEL {
        vec![SWAMP_PAIR.0, SWAMP_PAIR.1]
    } else {
        label.split(COMPOSITE_SEPARATOR).collect()
    };
    let colors: Vec<Color> = parts
        .iter()
        .filter_map(|part| palette.color_of(part))
        .collect();

    if colors.len() == parts.len() && parts.len() > 1 {
        Color::mean(colors).unwrap_or(UNKNOWN_LABEL_COLOR)
    } else {
        UNKNOWN_LABEL_COLOR
    }
}

/// Paint each cell's label colour over the source at opacity `alpha`
///
/// The result covers the gridded area only; discarded edge pixels are cut off.
///
/// # Errors
///
/// Returns an error if the tile map has no cells or is finer than the image
pub fn render_overlay(
    image: &RgbImage,
    tile_map: &TileMap,
    palette: &Palette,
    alpha: f64,
) -> Result<RgbImage> {
    let shape = tile_map.shape();
    let (cell_width, cell_height) = shape.checked_cell_size(image.width(), image.height())?;
    // Both fit in u32 once the cell size is known
    let width = cell_width * shape.x_tiles as u32;
    let height = cell_height * shape.y_tiles as u32;

    Ok(RgbImage::from_fn(width, height, |x, y| {
        let row = (y / cell_height) as usize;
        let col = (x / cell_width) as usize;
        let source = Color::from(*image.get_pixel(x, y));
        let tint = tile_map
            .get(row, col)
            .map_or(UNKNOWN_LABEL_COLOR, |label| label_color(label, palette));
        Rgb::from(source.blend(tint, alpha))
    }))
}

/// Save the overlay rendering to `path`
///
/// # Errors
///
/// Returns an error if the tile map does not fit the image or the overlay
/// cannot be written
pub fn save_overlay<P: AsRef<Path>>(
    image: &RgbImage,
    tile_map: &TileMap,
    palette: &Palette,
    alpha: f64,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    render_overlay(image, tile_map, palette, alpha)?
        .save(path)
        .map_err(|e| MapError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })?;
    log::info!("Saved overlay to {}", path.display());
    Ok(())
}

/// Save every cell of `image` as `r{row}_c{col}.png` inside `directory`
///
/// Returns the number of crops written.
///
/// # Errors
///
/// Returns an error if the grid is finer than the image, the directory
/// cannot be created or a crop cannot be encoded
pub fn save_tile_crops<P: AsRef<Path>>(
    image: &RgbImage,
    shape: GridShape,
    directory: P,
) -> Result<usize> {
    let directory = directory.as_ref();
    std::fs::create_dir_all(directory)
        .map_err(|e| file_system_error(directory, "create directory", e))?;

    let mut written = 0;
    for cell in slice_into_cells(image, shape)? {
        let path = directory.join(format!("r{}_c{}.png", cell.row, cell.col));
        cell.image.save(&path).map_err(|e| MapError::ImageExport {
            path: path.clone(),
            source: e,
        })?;
        written += 1;
    }
    log::info!("Saved {written} tile crops to {}", directory.display());
    Ok(written)
}

/// Quote a CSV field when it holds a comma, quote or line break
///
/// Embedded quotes are doubled.
pub fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, contents).map_err(|e| file_system_error(path, "write table", e))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
