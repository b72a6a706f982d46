//! Per-pixel vote tallies and the rule that turns them into a cell label
//!
//! A cell whose two strongest tile types receive a similar share of pixel
//! votes is reported as a composite `first/second` label. The land and wood
//! pair is special-cased into the swamp label.

use crate::color::palette::Palette;
use crate::io::configuration::{BLEND_THRESHOLD, COMPOSITE_SEPARATOR, SWAMP_LABEL, SWAMP_PAIR};
use crate::io::error::{Result, computation_error};

/// Number of pixels voting for each palette entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVotes {
    counts: Vec<usize>,
}

impl LabelVotes {
    /// Empty tally for a palette of `palette_len` tile types
    pub fn new(palette_len: usize) -> Self {
        Self {
            counts: vec![0; palette_len],
        }
    }

    /// Record one vote for the tile type at `index`
    pub fn add(&mut self, index: usize) {
        if let Some(count) = self.counts.get_mut(index) {
            *count += 1;
        }
    }

    /// Total number of votes cast
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Votes for the tile type at `index`
    pub fn count(&self, index: usize) -> usize {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Tile types that received votes with their vote count
    ///
    /// Sorted by descending count; equal counts keep palette order.
    pub fn ranked_counts(&self) -> Vec<(usize, usize)> {
        let mut ranked: Vec<(usize, usize)> = self
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(index, &count)| (index, count))
            .collect();
        // Stable sort keeps palette order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Tile types that received votes with their relative frequency
    ///
    /// Same order as [`LabelVotes::ranked_counts`].
    pub fn ranked(&self) -> Vec<(usize, f64)> {
        let total = self.total() as f64;
        self.ranked_counts()
            .into_iter()
            .map(|(index, count)| (index, count as f64 / total))
            .collect()
    }

    /// Resolve the tally into a cell label
    ///
    /// # Errors
    ///
    /// Returns an error if no votes were cast or a vote points past the palette
    pub fn resolve(&self, palette: &Palette) -> Result<String> {
        let ranked = self.ranked_counts();
        let label_at = |index: usize| {
            palette
                .get(index)
                .map(|tile_type| tile_type.label().to_string())
                .ok_or_else(|| {
                    computation_error("blend labels", &format!("no tile type at index {index}"))
                })
        };

        match ranked.as_slice() {
            [] => Err(computation_error("blend labels", &"no pixel votes to resolve")),
            [(only, _)] => label_at(*only),
            [(first, c1), (second, c2), ..] => {
                let first_label = label_at(*first)?;
                if !is_close(*c1, *c2) {
                    return Ok(first_label);
                }
                let second_label = label_at(*second)?;
                Ok(blend_labels(&first_label, &second_label))
            }
        }
    }
}

/// True when `(first - second) / first` is below the blend threshold
///
/// `first` must be the larger count.
fn is_close(first: usize, second: usize) -> bool {
    let (numerator, denominator) = BLEND_THRESHOLD;
    first.saturating_sub(second).saturating_mul(denominator) < first.saturating_mul(numerator)
}

/// Combined label for a cell split between two tile types
///
/// The swamp pair collapses to the swamp label in either order; any other
/// pair is joined with the first label leading.
pub fn blend_labels(first: &str, second: &str) -> String {
    let (a, b) = SWAMP_PAIR;
    if (first == a && second == b) || (first == b && second == a) {
        SWAMP_LABEL.to_string()
    } else {
        format!("{first}{COMPOSITE_SEPARATOR}{second}")
    }
}
