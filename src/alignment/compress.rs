//! Site pattern compression.
//!
//! Identical columns (compared byte for byte across every row) are collapsed
//! into a single representative column whose weight is the number of columns
//! it stands for. Patterns are kept in the order of their first occurrence.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::alignment::Alignment;
use crate::alignment::Sequence;

impl Alignment {
    /// Compresses the alignment's columns into weighted site patterns, in
    /// place.
    ///
    /// Row order and labels are untouched. Compressing an alignment that is
    /// already compressed merges the existing weights, so the sum of the
    /// weights always equals the number of columns before the first
    /// compression.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::alignment::Builder;
    ///
    /// let mut alignment = Builder::default()
    ///     .push_sequence("a", "ACAAC")
    ///     .push_sequence("b", "GTGGT")
    ///     .try_build()?;
    ///
    /// alignment.compress();
    ///
    /// assert_eq!(alignment.length(), 2);
    /// assert_eq!(alignment.residues(0)?, b"AC");
    /// assert_eq!(alignment.residues(1)?, b"GT");
    /// assert_eq!(alignment.weights()?, &[3, 2]);
    /// assert_eq!(alignment.total_weight(), 5);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn compress(&mut self) {
        let before = self.length;
        let weights = site_patterns(&mut self.sequences, self.length, self.weights.as_deref());

        self.length = weights.len();
        self.weights = Some(weights);

        debug!(before, after = self.length, "compressed site patterns");
    }
}

/// Collapses duplicate columns of `sequences` and returns the weight of each
/// remaining column.
///
/// `weights` holds the current weight of each column, if any (every column
/// otherwise counts once).
fn site_patterns(
    sequences: &mut [Sequence],
    length: usize,
    weights: Option<&[usize]>,
) -> Vec<usize> {
    let mut patterns = HashMap::<Vec<u8>, usize>::new();
    let mut representatives = Vec::new();
    let mut merged = Vec::new();

    for column in 0..length {
        let pattern = sequences
            .iter()
            .map(|sequence| sequence.residues[column])
            .collect::<Vec<_>>();
        let weight = weights.map_or(1, |weights| weights[column]);

        match patterns.entry(pattern) {
            Entry::Occupied(entry) => merged[*entry.get()] += weight,
            Entry::Vacant(entry) => {
                entry.insert(representatives.len());
                representatives.push(column);
                merged.push(weight);
            }
        }
    }

    for sequence in sequences.iter_mut() {
        sequence.residues = representatives
            .iter()
            .map(|&column| sequence.residues[column])
            .collect();
    }

    merged
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::alignment::Builder;

    #[test]
    fn it_keeps_patterns_in_order_of_first_occurrence(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut alignment = Builder::default()
            .push_sequence("a", "TTAAGT")
            .push_sequence("b", "CCAACC")
            .try_build()?;

        alignment.compress();

        assert_eq!(alignment.residues(0)?, b"TAG");
        assert_eq!(alignment.residues(1)?, b"CAC");
        assert_eq!(alignment.weights()?, &[3, 2, 1]);
        assert_eq!(alignment.labels().collect::<Vec<_>>(), vec!["a", "b"]);

        Ok(())
    }

    #[test]
    fn it_distinguishes_columns_that_differ_in_a_single_row(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut alignment = Builder::default()
            .push_sequence("a", "AAAA")
            .push_sequence("b", "AAAA")
            .push_sequence("c", "AA-A")
            .try_build()?;

        alignment.compress();

        assert_eq!(alignment.length(), 2);
        assert_eq!(alignment.residues(2)?, b"A-");
        assert_eq!(alignment.weights()?, &[3, 1]);

        Ok(())
    }

    #[test]
    fn it_compares_residues_byte_for_byte() -> Result<(), Box<dyn std::error::Error>> {
        let mut alignment = Builder::default()
            .push_sequence("a", "AaN?-A")
            .push_sequence("b", "CcN?-C")
            .try_build()?;

        alignment.compress();

        assert_eq!(alignment.length(), 5);
        assert_eq!(alignment.residues(0)?, b"AaN?-");
        assert_eq!(alignment.weights()?, &[2, 1, 1, 1, 1]);

        Ok(())
    }

    #[test]
    fn compressing_twice_keeps_the_total_weight() -> Result<(), Box<dyn std::error::Error>> {
        let mut alignment = Builder::default()
            .push_sequence("a", "ACACAC")
            .push_sequence("b", "GTGTGG")
            .try_build()?;

        alignment.compress();
        let once = alignment.clone();
        alignment.compress();

        assert_eq!(alignment, once);
        assert_eq!(alignment.total_weight(), 6);

        Ok(())
    }

    #[test]
    fn random_alignments_keep_the_weight_invariants() -> Result<(), Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..50 {
            let rows = rng.gen_range(1..8);
            let length = rng.gen_range(1..200);

            let mut builder = Builder::default();
            for row in 0..rows {
                let residues = (0..length)
                    .map(|_| b"ACG-"[rng.gen_range(0..4)])
                    .collect::<Vec<_>>();
                builder = builder.push_sequence(format!("taxon{row}"), residues);
            }

            let original = builder.try_build()?;
            let mut compressed = original.clone();
            compressed.compress();

            assert!(compressed.length() <= original.length());
            assert_eq!(compressed.total_weight(), original.length());
            assert_eq!(compressed.weights()?.len(), compressed.length());
            assert_eq!(compressed.count(), original.count());
            assert!(
                compressed
                    .sequences()
                    .iter()
                    .all(|sequence| sequence.residues().len() == compressed.length())
            );

            // Every original column maps to exactly one pattern.
            for column in 0..original.length() {
                let pattern = original
                    .sequences()
                    .iter()
                    .map(|sequence| sequence.residues()[column])
                    .collect::<Vec<_>>();
                let matches = (0..compressed.length())
                    .filter(|&c| {
                        compressed
                            .sequences()
                            .iter()
                            .map(|sequence| sequence.residues()[c])
                            .eq(pattern.iter().copied())
                    })
                    .count();
                assert_eq!(matches, 1);
            }
        }

        Ok(())
    }
}
