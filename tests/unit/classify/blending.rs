//! Tests for vote ranking and the composite label rule

#[cfg(test)]
mod tests {
    use maptiles::classify::blending::{LabelVotes, blend_labels};
    use maptiles::color::{Color, Palette, TileType};

    fn palette() -> Palette {
        Palette::new(vec![
            TileType::new("Water", "L", Color::new(0, 0, 255)),
            TileType::new("Wood", "W", Color::new(0, 128, 0)),
            TileType::new("Grass", "G", Color::new(128, 255, 128)),
            TileType::new("Rock", "R", Color::new(128, 128, 128)),
        ])
        .unwrap_or_else(|e| panic!("{e}"))
    }

    fn votes(counts: &[(usize, usize)]) -> LabelVotes {
        let mut votes = LabelVotes::new(4);
        for &(index, count) in counts {
            for _ in 0..count {
                votes.add(index);
            }
        }
        votes
    }

    fn resolve(counts: &[(usize, usize)]) -> String {
        votes(counts)
            .resolve(&palette())
            .unwrap_or_else(|e| panic!("{e}"))
    }

    // Tests a single voted label is returned unchanged
    // Verified by always blending with the second entry
    #[test]
    fn test_single_label() {
        assert_eq!(resolve(&[(2, 10)]), "G");
    }

    // Tests 55/45 land and wood split becomes swamp
    // Verified by raising the threshold comparison to 0.1
    #[test]
    fn test_close_land_wood_becomes_swamp() {
        assert_eq!(resolve(&[(0, 55), (1, 45)]), "S");
        assert_eq!(resolve(&[(0, 45), (1, 55)]), "S");
    }

    // Tests 70/30 split keeps the leading label
    // Verified by inverting the threshold comparison
    #[test]
    fn test_clear_majority_keeps_top_label() {
        assert_eq!(resolve(&[(0, 70), (1, 30)]), "L");
    }

    // Tests other close pairs join with the leader first
    // Verified by swapping composite order
    #[test]
    fn test_close_pair_becomes_composite() {
        assert_eq!(resolve(&[(3, 50), (2, 45), (0, 5)]), "R/G");
        assert_eq!(resolve(&[(2, 50), (3, 45), (0, 5)]), "G/R");
    }

    // Tests relative differences just either side of 20 percent
    // Verified by doubling the threshold
    #[test]
    fn test_threshold_neighbourhood() {
        assert_eq!(resolve(&[(2, 50), (3, 39)]), "G");
        assert_eq!(resolve(&[(2, 50), (3, 41)]), "G/R");
    }

    // Tests an exact 20 percent difference keeps the leading label
    // Verified by comparing floating point frequencies
    #[test]
    fn test_threshold_exact_boundary() {
        assert_eq!(resolve(&[(0, 5), (1, 4), (2, 1)]), "L");
        assert_eq!(resolve(&[(2, 50), (3, 40)]), "G");
        assert_eq!(resolve(&[(0, 10), (1, 8)]), "L");
        assert_eq!(resolve(&[(0, 10), (1, 9)]), "S");
    }

    // Tests ranked counts are raw vote counts in descending order
    // Verified by sorting ascending
    #[test]
    fn test_ranked_counts() {
        let ranked = votes(&[(1, 2), (0, 7), (3, 2)]).ranked_counts();
        assert_eq!(ranked, vec![(0, 7), (1, 2), (3, 2)]);
    }

    // Tests equal frequencies rank in palette order
    // Verified by using an unstable sort
    #[test]
    fn test_ranking_ties_follow_palette_order() {
        let ranked = votes(&[(3, 5), (1, 5), (2, 1)]).ranked();
        let order: Vec<usize> = ranked.iter().map(|(index, _)| *index).collect();
        assert_eq!(order, vec![1, 3, 2]);
        assert_eq!(resolve(&[(3, 5), (1, 5)]), "W/R");
    }

    // Tests relative frequencies and totals
    // Verified by returning raw counts
    #[test]
    fn test_ranked_frequencies() {
        let tally = votes(&[(0, 3), (1, 1)]);
        assert_eq!(tally.total(), 4);
        assert_eq!(tally.count(0), 3);
        let ranked = tally.ranked();
        assert!(ranked.first().is_some_and(|&(i, f)| i == 0 && (f - 0.75).abs() < 1e-12));
        assert!(ranked.get(1).is_some_and(|&(i, f)| i == 1 && (f - 0.25).abs() < 1e-12));
    }

    // Tests empty tallies cannot be resolved
    // Verified by defaulting to the first palette label
    #[test]
    fn test_empty_votes_error() {
        assert!(LabelVotes::new(4).resolve(&palette()).is_err());
    }

    // Tests the swamp rule regardless of argument order
    // Verified by checking only one order
    #[test]
    fn test_blend_labels() {
        assert_eq!(blend_labels("L", "W"), "S");
        assert_eq!(blend_labels("W", "L"), "S");
        assert_eq!(blend_labels("L", "G"), "L/G");
    }
}
