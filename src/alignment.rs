//! Multiple sequence alignments.
//!
//! An [`Alignment`] is a set of labeled, equal-length rows. Alignments are
//! built with a [`Builder`] or read from FASTA, split into partitions with
//! [`Alignment::partition()`], and site-compressed with
//! [`Alignment::compress()`].

use std::collections::HashSet;

pub mod builder;
mod compress;
pub mod extract;
pub mod fasta;

pub use builder::Builder;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to accessing an [`Alignment`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The requested row does not exist.
    RowOutOfRange {
        /// The requested row.
        index: usize,

        /// The number of rows in the alignment.
        count: usize,
    },

    /// The alignment has not been compressed, so it has no weights.
    MissingWeights,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::RowOutOfRange { index, count } => write!(
                f,
                "requested row {index} does not exist in an alignment with {count} rows"
            ),
            Error::MissingWeights => write!(f, "the alignment has no weights"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Sequence
////////////////////////////////////////////////////////////////////////////////////////

/// A labeled row within an [`Alignment`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sequence {
    /// The label (taxon name).
    label: String,

    /// The aligned residues.
    residues: Vec<u8>,
}

impl Sequence {
    /// Creates a new [`Sequence`].
    pub fn new(label: impl Into<String>, residues: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            residues: residues.into(),
        }
    }

    /// Gets the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Gets the aligned residues.
    pub fn residues(&self) -> &[u8] {
        &self.residues
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Alignment
////////////////////////////////////////////////////////////////////////////////////////

/// A multiple sequence alignment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alignment {
    /// The rows, in input order.
    sequences: Vec<Sequence>,

    /// The number of columns. Every row holds exactly this many residues.
    length: usize,

    /// The multiplicity of each column, once the alignment is compressed.
    weights: Option<Vec<usize>>,
}

impl Alignment {
    /// Creates an alignment from rows that are already known to share the
    /// same `length`.
    pub(crate) fn from_parts(sequences: Vec<Sequence>, length: usize) -> Self {
        debug_assert!(sequences.iter().all(|s| s.residues.len() == length));

        Self {
            sequences,
            length,
            weights: None,
        }
    }

    /// Gets the number of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::alignment::Builder;
    ///
    /// let alignment = Builder::default()
    ///     .push_sequence("a", "ACGT")
    ///     .push_sequence("b", "ACGA")
    ///     .try_build()?;
    ///
    /// assert_eq!(alignment.count(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn count(&self) -> usize {
        self.sequences.len()
    }

    /// Gets the number of columns.
    ///
    /// After compression, this is the number of distinct site patterns.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::alignment::Builder;
    ///
    /// let alignment = Builder::default()
    ///     .push_sequence("a", "ACGT")
    ///     .push_sequence("b", "ACGA")
    ///     .try_build()?;
    ///
    /// assert_eq!(alignment.length(), 4);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn length(&self) -> usize {
        self.length
    }

    /// Gets the rows in order.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Gets the label of the row at `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::alignment::Builder;
    ///
    /// let alignment = Builder::default()
    ///     .push_sequence("a", "ACGT")
    ///     .push_sequence("b", "ACGA")
    ///     .try_build()?;
    ///
    /// assert_eq!(alignment.label(1)?, "b");
    /// assert!(alignment.label(2).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn label(&self, index: usize) -> Result<&str> {
        self.get(index).map(Sequence::label)
    }

    /// Gets the residues of the row at `index`.
    pub fn residues(&self, index: usize) -> Result<&[u8]> {
        self.get(index).map(Sequence::residues)
    }

    /// Iterates over the row labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.sequences.iter().map(Sequence::label)
    }

    /// Collects the row labels into a set.
    pub fn label_set(&self) -> HashSet<String> {
        self.labels().map(String::from).collect()
    }

    /// Returns whether the alignment has been site-compressed.
    pub fn is_compressed(&self) -> bool {
        self.weights.is_some()
    }

    /// Gets the multiplicity of each column.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::alignment::Builder;
    ///
    /// let mut alignment = Builder::default()
    ///     .push_sequence("a", "AAC")
    ///     .push_sequence("b", "GGT")
    ///     .try_build()?;
    ///
    /// assert!(alignment.weights().is_err());
    ///
    /// alignment.compress();
    /// assert_eq!(alignment.weights()?, &[2, 1]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn weights(&self) -> Result<&[usize]> {
        self.weights.as_deref().ok_or(Error::MissingWeights)
    }

    /// Gets the number of original columns represented by the alignment.
    ///
    /// This is the sum of the weights for a compressed alignment and the
    /// length otherwise.
    pub fn total_weight(&self) -> usize {
        match &self.weights {
            Some(weights) => weights.iter().sum(),
            None => self.length,
        }
    }

    /// Gets the row at `index`.
    fn get(&self, index: usize) -> Result<&Sequence> {
        self.sequences.get(index).ok_or(Error::RowOutOfRange {
            index,
            count: self.count(),
        })
    }
}
