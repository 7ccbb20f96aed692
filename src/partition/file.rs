//! A fully loaded partition file.

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::partition::Partition;
use crate::reader;
use crate::reader::Reader;

/// The partitions of a partition file, in file order.
///
/// A [`File`] is only ever produced from input that parsed completely: the
/// first malformed line aborts loading.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct File(Vec<Partition>);

impl File {
    /// Loads every partition from a file on disk.
    ///
    /// Files ending in `.gz` are decompressed transparently.
    pub fn from_path<P>(path: P) -> Result<Self, reader::Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let inner = reader::open(path).map_err(reader::Error::Io)?;
        let file = Self::from_reader(Reader::new(inner))?;

        debug!(
            path = %path.display(),
            partitions = file.len(),
            "loaded partition file"
        );

        Ok(file)
    }

    /// Loads every partition from a [`Reader`].
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::partition::File;
    ///
    /// let data = b"GTR,gene1=0-99,150-199\nWAG,gene2=100-149\n";
    /// let file = File::from_reader(msapart::Reader::new(&data[..]))?;
    ///
    /// assert_eq!(file.len(), 2);
    /// assert_eq!(file.get(1).unwrap().model_name(), "WAG");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_reader<T>(mut reader: Reader<T>) -> Result<Self, reader::Error>
    where
        T: BufRead,
    {
        reader.partitions().collect::<Result<Vec<_>, _>>().map(Self)
    }

    /// Gets the number of partitions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no partitions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the partition at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&Partition> {
        self.0.get(index)
    }

    /// Iterates over the partitions in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Partition> {
        self.0.iter()
    }

    /// Gets the partitions as a slice.
    pub fn as_slice(&self) -> &[Partition] {
        &self.0
    }

    /// Consumes `self` and returns the partitions.
    pub fn into_inner(self) -> Vec<Partition> {
        self.0
    }
}

impl From<Vec<Partition>> for File {
    fn from(partitions: Vec<Partition>) -> Self {
        Self(partitions)
    }
}

impl<'a> IntoIterator for &'a File {
    type Item = &'a Partition;
    type IntoIter = std::slice::Iter<'a, Partition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for File {
    type Item = Partition;
    type IntoIter = std::vec::IntoIter<Partition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
