//! A builder for an alignment.

use crate::alignment::Alignment;
use crate::alignment::Sequence;

/// An error related to a [`Builder`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// No sequences were provided to the [`Builder`].
    MissingSequences,

    /// A sequence does not have the same length as the first sequence.
    ///
    /// Holds the label, the expected length, and the actual length.
    LengthMismatch(String, usize, usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingSequences => write!(f, "missing required field: sequences"),
            Error::LengthMismatch(label, expected, found) => write!(
                f,
                "sequence `{label}` has {found} residues, but the alignment has {expected} columns"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for an [`Alignment`].
#[derive(Debug, Default)]
pub struct Builder {
    /// The sequences, in insertion order.
    sequences: Vec<Sequence>,
}

impl Builder {
    /// Pushes a labeled sequence into the [`Builder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::alignment::Builder;
    ///
    /// let builder = Builder::default().push_sequence("human", "ACGT");
    /// ```
    pub fn push_sequence(mut self, label: impl Into<String>, residues: impl Into<Vec<u8>>) -> Self {
        self.sequences.push(Sequence::new(label, residues));
        self
    }

    /// Consumes `self` to attempt to build an [`Alignment`].
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::alignment::Builder;
    ///
    /// let alignment = Builder::default()
    ///     .push_sequence("human", "ACGT")
    ///     .push_sequence("chimp", "ACGA")
    ///     .try_build()?;
    ///
    /// assert_eq!(alignment.count(), 2);
    /// assert_eq!(alignment.length(), 4);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_build(self) -> Result<Alignment> {
        let length = self
            .sequences
            .first()
            .map(|sequence| sequence.residues().len())
            .ok_or(Error::MissingSequences)?;

        if let Some(sequence) = self
            .sequences
            .iter()
            .find(|sequence| sequence.residues().len() != length)
        {
            return Err(Error::LengthMismatch(
                sequence.label().to_string(),
                length,
                sequence.residues().len(),
            ));
        }

        Ok(Alignment::from_parts(self.sequences, length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_fails_to_produce_an_alignment_when_no_sequences_are_provided() {
        let err = Builder::default().try_build().unwrap_err();
        assert_eq!(err, Error::MissingSequences);
        assert_eq!(err.to_string(), "missing required field: sequences");
    }

    #[test]
    fn it_fails_to_produce_an_alignment_from_ragged_sequences() {
        let err = Builder::default()
            .push_sequence("human", "ACGT")
            .push_sequence("chimp", "ACGTA")
            .try_build()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "sequence `chimp` has 5 residues, but the alignment has 4 columns"
        );
    }

    #[test]
    fn it_keeps_rows_in_insertion_order() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let alignment = Builder::default()
            .push_sequence("b", "AC")
            .push_sequence("a", "GT")
            .push_sequence("c", "--")
            .try_build()?;

        assert_eq!(alignment.labels().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(alignment.residues(2)?, b"--");

        Ok(())
    }
}
