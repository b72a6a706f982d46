//! RGB colours and the distance metric used to compare them

use crate::io::error::{MapError, invalid_input};
use image::Rgb;
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red intensity
    pub r: u8,
    /// Green intensity
    pub g: u8,
    /// Blue intensity
    pub b: u8,
}

impl Color {
    /// Create a colour from its channel intensities
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel intensities in `[r, g, b]` order
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Euclidean distance between two colours in RGB space
    pub fn distance(self, other: Self) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Channel-wise mean of a set of colours, `None` when the set is empty
    pub fn mean<I: IntoIterator<Item = Self>>(colors: I) -> Option<Self> {
        let mut sums = [0u32; 3];
        let mut count = 0u32;
        for color in colors {
            sums[0] += u32::from(color.r);
            sums[1] += u32::from(color.g);
            sums[2] += u32::from(color.b);
            count += 1;
        }
        (count > 0).then(|| {
            Self::new(
                (sums[0] / count) as u8,
                (sums[1] / count) as u8,
                (sums[2] / count) as u8,
            )
        })
    }

    /// Linear blend towards `other`, where `alpha` is the weight of `other`
    pub fn blend(self, other: Self, alpha: f64) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            f64::from(a)
                .mul_add(1.0 - alpha, f64::from(b) * alpha)
                .round() as u8
        };
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self::new(r, g, b)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Self(color.channels())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.r, self.g, self.b)
    }
}

/// Parses `(r,g,b)` strings as written in palette configuration
///
/// Whitespace around the parentheses and components is ignored.
impl FromStr for Color {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| invalid_input("color", &s, &"expected the form (r,g,b)"))?;

        let components = inner
            .split(',')
            .map(|part| {
                part.trim().parse::<u8>().map_err(|e| {
                    invalid_input("color", &s, &format!("component '{}': {e}", part.trim()))
                })
            })
            .collect::<Result<Vec<u8>, MapError>>()?;

        match components.as_slice() {
            &[r, g, b] => Ok(Self::new(r, g, b)),
            _ => Err(invalid_input(
                "color",
                &s,
                &format!("expected 3 components, found {}", components.len()),
            )),
        }
    }
}
