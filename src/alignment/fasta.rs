//! Reading alignments from FASTA.

use std::io;
use std::io::BufRead;
use std::path::Path;

use noodles::fasta;
use tracing::debug;

use crate::alignment::builder;
use crate::alignment::Alignment;
use crate::alignment::Builder;
use crate::reader;

/// An error related to reading an [`Alignment`] from FASTA.
#[derive(Debug)]
pub enum Error {
    /// An I/O error, including malformed FASTA.
    Io(io::Error),

    /// The records do not form a valid alignment.
    Alignment(builder::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Alignment(err) => write!(f, "invalid alignment: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

impl Alignment {
    /// Reads an [`Alignment`] from FASTA records.
    ///
    /// Each record becomes a row labeled with the record name. All records
    /// must have the same length.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::alignment::Alignment;
    ///
    /// let data = b">human\nACGT\nAC\n>chimp\nACGAAC\n";
    /// let alignment = Alignment::from_fasta(&data[..])?;
    ///
    /// assert_eq!(alignment.count(), 2);
    /// assert_eq!(alignment.length(), 6);
    /// assert_eq!(alignment.label(1)?, "chimp");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_fasta<T>(inner: T) -> Result<Self>
    where
        T: BufRead,
    {
        let mut reader = fasta::io::Reader::new(inner);
        let mut builder = Builder::default();

        for result in reader.records() {
            let record = result.map_err(Error::Io)?;
            let label = String::from_utf8_lossy(record.name()).to_string();
            let residues: &[u8] = record.sequence().as_ref();
            builder = builder.push_sequence(label, residues);
        }

        builder.try_build().map_err(Error::Alignment)
    }

    /// Reads an [`Alignment`] from a FASTA file on disk.
    ///
    /// Files ending in `.gz` are decompressed transparently.
    pub fn from_fasta_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let inner = reader::open(path).map_err(Error::Io)?;
        let alignment = Self::from_fasta(inner)?;

        debug!(
            path = %path.display(),
            sequences = alignment.count(),
            columns = alignment.length(),
            "loaded alignment"
        );

        Ok(alignment)
    }
}
