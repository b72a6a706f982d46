//! Per-channel colour histograms used to fingerprint textured tiles

use crate::io::configuration::HISTOGRAM_BINS;
use crate::io::error::{Result, invalid_input};
use image::RgbImage;
use ndarray::Array2;

/// Relative frequency of channel intensities, one row per RGB channel
///
/// Bins split the fixed range 0..=255 evenly; the top edge falls into the
/// last bin. Each row sums to one so images of different sizes compare.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorHistogram {
    bins: Array2<f64>,
}

impl ColorHistogram {
    /// Compute the histogram of every pixel in `image`
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn from_image(image: &RgbImage) -> Result<Self> {
        let pixel_count = u64::from(image.width()) * u64::from(image.height());
        if pixel_count == 0 {
            return Err(invalid_input(
                "image",
                &format!("{}x{}", image.width(), image.height()),
                &"cannot build a histogram of an empty image",
            ));
        }

        let mut bins = Array2::<f64>::zeros((3, HISTOGRAM_BINS));
        for pixel in image.pixels() {
            for (channel, &value) in pixel.0.iter().enumerate() {
                if let Some(count) = bins.get_mut((channel, bin_index(value))) {
                    *count += 1.0;
                }
            }
        }
        bins.mapv_inplace(|count| count / pixel_count as f64);

        Ok(Self { bins })
    }

    /// Build a histogram from precomputed frequencies of shape `(3, HISTOGRAM_BINS)`
    ///
    /// # Errors
    ///
    /// Returns an error if the array has the wrong shape
    pub fn from_frequencies(bins: Array2<f64>) -> Result<Self> {
        if bins.dim() != (3, HISTOGRAM_BINS) {
            return Err(invalid_input(
                "histogram",
                &format!("{:?}", bins.dim()),
                &format!("expected shape (3, {HISTOGRAM_BINS})"),
            ));
        }
        Ok(Self { bins })
    }

    /// Frequencies with one row per channel
    pub const fn frequencies(&self) -> &Array2<f64> {
        &self.bins
    }

    /// Mean absolute difference over every bin of every channel
    pub fn difference(&self, other: &Self) -> f64 {
        let total: f64 = self
            .bins
            .iter()
            .zip(other.bins.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        total / self.bins.len() as f64
    }
}

fn bin_index(value: u8) -> usize {
    let scaled = usize::from(value) * HISTOGRAM_BINS / 255;
    scaled.min(HISTOGRAM_BINS - 1)
}
