//! Tests for tile map assembly, counts and the builder

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use maptiles::MapError;
    use maptiles::classify::library::ReferenceLibrary;
    use maptiles::color::{Color, Palette, TileType};
    use maptiles::spatial::tilemap::build_tile_map;
    use maptiles::spatial::{TileMap, TileMapBuilder};
    use ndarray::Array2;

    const WATER: Rgb<u8> = Rgb([0, 0, 255]);
    const WOOD: Rgb<u8> = Rgb([0, 128, 0]);
    const GRASS: Rgb<u8> = Rgb([128, 255, 128]);

    fn palette() -> Palette {
        Palette::new(vec![
            TileType::new("Water", "L", Color::new(0, 0, 255)),
            TileType::new("Wood", "W", Color::new(0, 128, 0)),
            TileType::new("Grass", "G", Color::new(128, 255, 128)),
        ])
        .unwrap_or_else(|e| panic!("{e}"))
    }

    /// 40x20 map: left half water, right half grass
    fn two_halves() -> RgbImage {
        RgbImage::from_fn(40, 20, |x, _| if x < 20 { WATER } else { GRASS })
    }

    fn labels(rows: usize, cols: usize, values: &[&str]) -> TileMap {
        let labels = Array2::from_shape_vec(
            (rows, cols),
            values.iter().map(ToString::to_string).collect(),
        )
        .unwrap_or_else(|e| panic!("{e}"));
        TileMap::from_labels(labels)
    }

    // Tests the label grid follows image geometry
    // Verified by transposing the assembled grid
    #[test]
    fn test_build_nearest_color() {
        let palette = palette();
        let tile_map = build_tile_map(&two_halves(), 8, &palette, None)
            .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!((tile_map.rows(), tile_map.cols()), (2, 4));
        for row in 0..2 {
            assert_eq!(tile_map.get(row, 0), Some("L"));
            assert_eq!(tile_map.get(row, 1), Some("L"));
            assert_eq!(tile_map.get(row, 2), Some("G"));
            assert_eq!(tile_map.get(row, 3), Some("G"));
        }
        assert_eq!(tile_map.get(2, 0), None);
    }

    // Tests cells straddling two colours blend
    // Verified by skipping blending in the builder path
    #[test]
    fn test_build_blends_mixed_cells() {
        let palette = palette();
        // One column of cells, each half water and half wood
        let image = RgbImage::from_fn(10, 10, |x, _| if x < 5 { WATER } else { WOOD });
        let tile_map = TileMapBuilder::new(&palette, None, 1)
            .build(&image)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(tile_map.get(0, 0), Some("S"));
    }

    // Tests histogram mode uses the reference library
    // Verified by ignoring the library argument
    #[test]
    fn test_build_with_library() {
        let palette = palette();
        let wood_reference = RgbImage::from_pixel(4, 4, WOOD);
        let library = ReferenceLibrary::from_images([(1, &wood_reference)], &palette)
            .unwrap_or_else(|e| panic!("{e}"));

        let tile_map = build_tile_map(&two_halves(), 8, &palette, Some(&library))
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(tile_map.labels().iter().all(|label| label == "W"));
    }

    // Tests progress is reported once per cell
    // Verified by reporting before classification
    #[test]
    fn test_build_reports_progress() {
        let palette = palette();
        let mut reports = Vec::new();
        TileMapBuilder::new(&palette, None, 8)
            .build_with_progress(&two_halves(), |done, total| reports.push((done, total)))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(reports.len(), 8);
        assert_eq!(reports.last(), Some(&(8, 8)));
    }

    // Tests invalid inputs fail before classification
    // Verified by removing the target validation
    #[test]
    fn test_build_rejects_invalid_input() {
        let palette = palette();
        assert!(matches!(
            build_tile_map(&two_halves(), 0, &palette, None),
            Err(MapError::InvalidInput { .. })
        ));
        assert!(matches!(
            build_tile_map(&RgbImage::new(0, 0), 4, &palette, None),
            Err(MapError::InvalidInput { .. })
        ));
        // More cells than pixels leaves cells empty
        assert!(build_tile_map(&RgbImage::new(2, 2), 100, &palette, None).is_err());
    }

    // Tests counts include every palette label and composite buckets
    // Verified by splitting composite labels into their parts
    #[test]
    fn test_tile_counts() {
        let tile_map = labels(2, 3, &["L", "L", "S", "G/W", "L", "S"]);
        let counts = tile_map.tile_counts(&palette());

        assert_eq!(counts.get("L"), 3);
        assert_eq!(counts.get("W"), 0);
        assert_eq!(counts.get("G"), 0);
        assert_eq!(counts.get("S"), 2);
        assert_eq!(counts.get("G/W"), 1);
        assert_eq!(counts.total(), 6);

        let order: Vec<&str> = counts.iter().map(|(label, _)| label).collect();
        assert_eq!(order, vec!["L", "W", "G", "S", "G/W"]);
    }

    // Tests counts always sum to the number of cells
    // Verified by dropping labels outside the palette
    #[test]
    fn test_tile_counts_sum_to_cell_count() {
        let palette = palette();
        let image = RgbImage::from_fn(57, 31, |x, y| Rgb([(x * 4) as u8, (y * 8) as u8, 100]));
        let tile_map = build_tile_map(&image, 20, &palette, None).unwrap_or_else(|e| panic!("{e}"));
        let counts = tile_map.tile_counts(&palette);
        assert_eq!(counts.total(), tile_map.shape().cell_count());
    }

    // Tests a target far beyond the pixel count is invalid input
    // Verified by letting the tile count wrap when sizing cells
    #[test]
    fn test_build_rejects_huge_target() {
        let palette = palette();
        let image = RgbImage::from_pixel(4, 1, WATER);
        assert!(matches!(
            build_tile_map(&image, 1 << 62, &palette, None),
            Err(MapError::InvalidInput { .. })
        ));
    }
}
