//! Tests for colour histogram construction and comparison

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use maptiles::MapError;
    use maptiles::color::histogram::ColorHistogram;
    use maptiles::io::configuration::HISTOGRAM_BINS;
    use ndarray::Array2;

    fn histogram_of(image: &RgbImage) -> ColorHistogram {
        ColorHistogram::from_image(image).unwrap_or_else(|e| panic!("{e}"))
    }

    // Tests each channel is a normalised distribution
    // Verified by skipping normalisation
    #[test]
    fn test_channels_sum_to_one() {
        let image = RgbImage::from_fn(7, 3, |x, y| Rgb([(x * 30) as u8, (y * 90) as u8, 200]));
        let histogram = histogram_of(&image);
        assert_eq!(histogram.frequencies().dim(), (3, HISTOGRAM_BINS));
        for row in histogram.frequencies().rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }
    }

    // Tests bin edges match an even split of 0..=255 with 255 in the last bin
    // Verified by dividing by 256 instead of 255
    #[test]
    fn test_bin_edges() {
        let image = RgbImage::from_fn(4, 1, |x, _| match x {
            0 => Rgb([0, 25, 255]),
            1 => Rgb([0, 26, 255]),
            2 => Rgb([0, 51, 255]),
            _ => Rgb([0, 254, 255]),
        });
        let bins = histogram_of(&image).frequencies().clone();
        let at = |channel: usize, bin: usize| bins.get((channel, bin)).copied().unwrap_or(-1.0);

        assert!((at(0, 0) - 1.0).abs() < 1e-9);
        assert!((at(1, 0) - 0.25).abs() < 1e-9);
        assert!((at(1, 1) - 0.25).abs() < 1e-9);
        assert!((at(1, 2) - 0.25).abs() < 1e-9);
        assert!((at(1, 9) - 0.25).abs() < 1e-9);
        assert!((at(2, HISTOGRAM_BINS - 1) - 1.0).abs() < 1e-9);
    }

    // Tests identical histograms score zero and distinct ones score positive
    // Verified by returning the sum instead of the mean
    #[test]
    fn test_difference() {
        let red = RgbImage::from_pixel(4, 4, Rgb([255, 0, 0]));
        let blue = RgbImage::from_pixel(2, 2, Rgb([0, 0, 255]));
        let red_histogram = histogram_of(&red);
        let blue_histogram = histogram_of(&blue);

        assert!(red_histogram.difference(&red_histogram).abs() < f64::EPSILON);
        // Red and blue channels each move a full unit between two bins
        let expected = 4.0 / (3 * HISTOGRAM_BINS) as f64;
        assert!((red_histogram.difference(&blue_histogram) - expected).abs() < 1e-9);
    }

    // Tests histograms compare independent of image size
    // Verified by skipping normalisation
    #[test]
    fn test_difference_ignores_size() {
        let small = RgbImage::from_pixel(2, 2, Rgb([10, 200, 90]));
        let large = RgbImage::from_pixel(20, 30, Rgb([10, 200, 90]));
        assert!(histogram_of(&small).difference(&histogram_of(&large)).abs() < 1e-12);
    }

    // Tests empty image rejection
    // Verified by removing the pixel count check
    #[test]
    fn test_empty_image_rejected() {
        let empty = RgbImage::new(0, 5);
        assert!(matches!(
            ColorHistogram::from_image(&empty),
            Err(MapError::InvalidInput { .. })
        ));
    }

    // Tests shape validation of precomputed frequencies
    // Verified by accepting any shape
    #[test]
    fn test_from_frequencies_shape() {
        assert!(ColorHistogram::from_frequencies(Array2::zeros((3, HISTOGRAM_BINS))).is_ok());
        assert!(ColorHistogram::from_frequencies(Array2::zeros((4, HISTOGRAM_BINS))).is_err());
    }
}
