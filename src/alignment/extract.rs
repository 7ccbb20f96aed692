//! Extraction of partitions from an alignment.

use tracing::debug;
use tracing::warn;

use crate::alignment::Alignment;
use crate::alignment::Sequence;
use crate::partition;
use crate::partition::Partition;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to extracting a partition from an [`Alignment`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The total number of columns in the partition cannot be represented.
    Overflow(String),

    /// A range reaches past the last column of the alignment.
    ColumnOutOfRange {
        /// The name of the partition.
        partition: String,

        /// The offending column.
        column: usize,

        /// The number of columns in the alignment.
        length: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Overflow(partition) => {
                write!(f, "partition `{partition}` spans too many columns")
            }
            Error::ColumnOutOfRange {
                partition,
                column,
                length,
            } => write!(
                f,
                "partition `{partition}` requests column {column}, but the alignment has \
                 {length} columns"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Extraction
////////////////////////////////////////////////////////////////////////////////////////

impl Alignment {
    /// Extracts the columns of a partition into a new, compressed
    /// [`Alignment`].
    ///
    /// The ranges are concatenated in the order they were written. Every row
    /// keeps its label and position. The new alignment owns its residues, and
    /// `self` is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::alignment::Builder;
    /// use msapart::partition::Partition;
    ///
    /// let alignment = Builder::default()
    ///     .push_sequence("a", "ACGTACGT")
    ///     .push_sequence("b", "ACGAACGA")
    ///     .try_build()?;
    ///
    /// let partition = "GTR,p1=4-7,0-3".parse::<Partition>()?;
    /// let derived = alignment.partition(&partition)?;
    ///
    /// // The two ranges hold the same columns, so each pattern appears twice.
    /// assert_eq!(derived.length(), 4);
    /// assert_eq!(derived.weights()?, &[2, 2, 2, 2]);
    /// assert_eq!(derived.total_weight(), 8);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn partition(&self, partition: &Partition) -> Result<Alignment> {
        let mut alignment = self.extract(partition)?;
        alignment.compress();
        Ok(alignment)
    }

    /// Extracts every partition of a partition file, in file order.
    ///
    /// Each partition is extracted independently. The first failure aborts
    /// the whole operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::alignment::Builder;
    /// use msapart::partition::File;
    ///
    /// let alignment = Builder::default()
    ///     .push_sequence("a", "ACGTAC")
    ///     .push_sequence("b", "ACGAAC")
    ///     .try_build()?;
    ///
    /// let data = b"GTR,p1=0-2\nWAG,p2=3-5";
    /// let file = File::from_reader(msapart::Reader::new(&data[..]))?;
    ///
    /// let derived = alignment.partition_all(&file)?;
    /// assert_eq!(derived.len(), 2);
    /// assert_eq!(derived[0].residues(0)?, b"ACG");
    /// assert_eq!(derived[1].residues(1)?, b"AAC");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn partition_all(&self, file: &partition::File) -> Result<Vec<Alignment>> {
        #[cfg(feature = "parallel")]
        let derived = {
            use rayon::prelude::*;

            file.as_slice()
                .par_iter()
                .map(|partition| self.partition(partition))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let derived = file
            .iter()
            .map(|partition| self.partition(partition))
            .collect();

        derived
    }

    /// Extracts the columns of a partition without compressing them.
    pub(crate) fn extract(&self, partition: &Partition) -> Result<Alignment> {
        if self.is_compressed() {
            warn!(
                partition = partition.name(),
                "extracting a partition from an alignment whose columns are already compressed"
            );
        }

        let width = partition
            .width()
            .ok_or_else(|| Error::Overflow(partition.name().into()))?;

        if let Some(range) = partition
            .ranges()
            .iter()
            .find(|range| range.end() >= self.length)
        {
            return Err(Error::ColumnOutOfRange {
                partition: partition.name().into(),
                column: range.end(),
                length: self.length,
            });
        }

        let sequences = self
            .sequences
            .iter()
            .map(|sequence| {
                let mut residues = Vec::with_capacity(width);

                for range in partition.ranges().iter() {
                    residues.extend_from_slice(&sequence.residues[range.as_inclusive()]);
                }

                Sequence::new(sequence.label.clone(), residues)
            })
            .collect::<Vec<_>>();

        debug!(
            model = partition.model_name(),
            partition = partition.name(),
            columns = width,
            "extracted partition"
        );

        Ok(Alignment::from_parts(sequences, width))
    }
}

#[cfg(test)]
mod tests {
    use nonempty::nonempty;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::alignment::Builder;
    use crate::partition::Range;

    fn alignment() -> std::result::Result<Alignment, Box<dyn std::error::Error>> {
        Ok(Builder::default()
            .push_sequence("human", "ACGTACGTAC")
            .push_sequence("chimp", "ACGTTCGTAA")
            .push_sequence("gorilla", "AGGTACCTAC")
            .try_build()?)
    }

    #[test]
    fn it_concatenates_ranges_in_the_order_they_were_written(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let alignment = alignment()?;
        let partition = "GTR,p1=8-9,0-1,1-2".parse::<Partition>()?;

        let derived = alignment.extract(&partition)?;

        assert_eq!(derived.length(), 6);
        assert_eq!(derived.residues(0)?, b"ACACCG");
        assert_eq!(derived.residues(1)?, b"AAACCG");
        assert_eq!(derived.residues(2)?, b"ACAGGG");
        assert!(!derived.is_compressed());

        Ok(())
    }

    #[test]
    fn it_preserves_labels_and_row_order() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let alignment = alignment()?;
        let partition = "GTR,p1=3-5".parse::<Partition>()?;

        let derived = alignment.partition(&partition)?;

        assert_eq!(
            derived.labels().collect::<Vec<_>>(),
            alignment.labels().collect::<Vec<_>>()
        );

        Ok(())
    }

    #[test]
    fn it_compresses_the_derived_alignment(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let alignment = alignment()?;
        let partition = "GTR,p1=0-9".parse::<Partition>()?;

        let derived = alignment.partition(&partition)?;

        assert!(derived.is_compressed());
        assert!(derived.length() <= 10);
        assert_eq!(derived.total_weight(), 10);

        Ok(())
    }

    #[test]
    fn it_does_not_touch_the_source_alignment(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let alignment = alignment()?;
        let before = alignment.clone();
        let partition = "GTR,p1=2-6,0-0".parse::<Partition>()?;

        let first = alignment.partition(&partition)?;
        let second = alignment.partition(&partition)?;

        assert_eq!(alignment, before);
        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn it_fails_when_a_range_reaches_past_the_last_column(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let alignment = alignment()?;
        let partition = "GTR,p1=0-3,8-10".parse::<Partition>()?;

        let err = alignment.partition(&partition).unwrap_err();
        assert_eq!(
            err,
            Error::ColumnOutOfRange {
                partition: String::from("p1"),
                column: 10,
                length: 10,
            }
        );
        assert_eq!(
            err.to_string(),
            "partition `p1` requests column 10, but the alignment has 10 columns"
        );

        Ok(())
    }

    #[test]
    fn it_fails_when_the_partition_width_overflows(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let alignment = alignment()?;
        let partition = Partition::try_new(
            "GTR",
            "huge",
            nonempty![
                Range::try_new(1, usize::MAX)?,
                Range::try_new(1, usize::MAX)?
            ],
        )?;

        let err = alignment.partition(&partition).unwrap_err();
        assert_eq!(err, Error::Overflow(String::from("huge")));
        assert_eq!(err.to_string(), "partition `huge` spans too many columns");

        Ok(())
    }

    #[test]
    fn it_partitions_every_entry_of_a_file_in_order(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let alignment = alignment()?;
        let file = partition::File::from(vec![
            "GTR,third=6-9".parse::<Partition>()?,
            "WAG,first=0-2".parse::<Partition>()?,
            "LG,second=3-5".parse::<Partition>()?,
        ]);

        let derived = alignment.partition_all(&file)?;
        let widths = derived
            .iter()
            .map(Alignment::total_weight)
            .collect::<Vec<_>>();

        assert_eq!(widths, vec![4, 3, 3]);
        for (partition, derived) in file.iter().zip(&derived) {
            assert_eq!(derived, &alignment.partition(partition)?);
        }

        Ok(())
    }

    #[test]
    fn it_fails_the_whole_file_on_one_bad_partition(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let alignment = alignment()?;
        let file = partition::File::from(vec![
            "GTR,p1=0-2".parse::<Partition>()?,
            "GTR,p2=5-50".parse::<Partition>()?,
        ]);

        let err = alignment.partition_all(&file).unwrap_err();
        assert!(matches!(err, Error::ColumnOutOfRange { column: 50, .. }));

        Ok(())
    }

    #[test]
    fn random_partitions_have_the_expected_width(
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut rng = StdRng::seed_from_u64(42);

        let length = 120;
        let mut builder = Builder::default();
        for row in 0..5 {
            let residues = (0..length)
                .map(|_| b"ACGT"[rng.gen_range(0..4)])
                .collect::<Vec<_>>();
            builder = builder.push_sequence(format!("taxon{row}"), residues);
        }
        let alignment = builder.try_build()?;

        for _ in 0..100 {
            let mut ranges = Vec::new();
            for _ in 0..rng.gen_range(1..5) {
                let start = rng.gen_range(0..length);
                let end = rng.gen_range(start..length);
                ranges.push(Range::try_new(start, end)?);
            }

            let expected = ranges.iter().map(Range::width).sum::<usize>();
            let ranges = nonempty::NonEmpty::from_vec(ranges).ok_or("no ranges were generated")?;
            let partition = Partition::try_new("GTR", "random", ranges)?;

            let extracted = alignment.extract(&partition)?;
            assert_eq!(extracted.length(), expected);
            assert!(
                extracted
                    .sequences()
                    .iter()
                    .all(|sequence| sequence.residues().len() == expected)
            );

            let compressed = alignment.partition(&partition)?;
            assert_eq!(compressed.total_weight(), expected);
            assert!(compressed.length() <= expected);
            assert_eq!(compressed.label_set(), alignment.label_set());
        }

        Ok(())
    }
}
