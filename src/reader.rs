//! A partition file reader.

use std::fs;
use std::io::BufRead;
use std::io::BufReader;
use std::io::{self};
use std::iter;
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::partition;
use crate::partition::Partition;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// The file extension that marks gzip-compressed input.
const GZIP_EXTENSION: &str = "gz";

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A line could not be parsed as a partition.
    Parse(usize, partition::ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse(line_no, err) => write!(f, "parse error on line {line_no}: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A partition file reader.
#[derive(Clone, Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The number of lines read so far.
    line_no: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a partition file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"GTR,gene1=0-99\nWAG,gene2=100-199";
    /// let reader = msapart::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"GTR,gene1=0-99\nWAG,gene2=100-199";
    /// let cursor = io::Cursor::new(data);
    ///
    /// let reader = msapart::Reader::new(cursor);
    /// assert_eq!(reader.inner().position(), 0);
    /// ```
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Gets a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Gets the number of lines read so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// The line terminator (`\n` or `\r\n`) is stripped.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"GTR,gene1=0-99\r\nWAG,gene2=100-199";
    /// let mut reader = msapart::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 16);
    /// assert_eq!(buffer, "GTR,gene1=0-99");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 17);
    /// assert_eq!(buffer, "WAG,gene2=100-199");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        let read = read_line(&mut self.inner, buffer)?;

        if read > 0 {
            self.line_no += 1;
        }

        Ok(read)
    }

    /// Attempts to read a [`Partition`] from the underlying reader.
    ///
    /// Every line must hold a partition: blank lines are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"GTR,gene1=0-99\nWAG,gene2=100-199";
    /// let mut reader = msapart::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// let partition = reader.read_partition(&mut buffer)?.unwrap();
    /// assert_eq!(partition.name(), "gene1");
    ///
    /// let partition = reader.read_partition(&mut buffer)?.unwrap();
    /// assert_eq!(partition.name(), "gene2");
    ///
    /// assert!(reader.read_partition(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn read_partition(&mut self, buffer: &mut String) -> Result<Option<Partition>, Error> {
        let read = self.read_line_raw(buffer).map_err(Error::Io)?;

        match read {
            0 => Ok(None),
            _ => buffer
                .parse::<Partition>()
                .map(Some)
                .map_err(|err| Error::Parse(self.line_no, err)),
        }
    }

    /// Returns an iterator over the [`Partition`]s in the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"GTR,gene1=0-99\nWAG,gene2=100-199\n";
    /// let mut reader = msapart::Reader::new(&data[..]);
    ///
    /// let partitions = reader.partitions().collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(partitions.len(), 2);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn partitions(&mut self) -> impl Iterator<Item = Result<Partition, Error>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_partition(&mut buffer).transpose())
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self { inner, line_no: 0 }
    }
}

/// Opens a file for buffered reading.
///
/// Files with a `.gz` extension are decompressed on the fly.
pub(crate) fn open<P>(path: P) -> io::Result<Box<dyn BufRead>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = fs::File::open(path)?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(GZIP_EXTENSION) => Ok(Box::new(BufReader::new(MultiGzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

/// Reads a line from a buffered reader, stripping the line terminator.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}
