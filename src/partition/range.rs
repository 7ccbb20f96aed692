//! An inclusive range of alignment columns.

/// The delimiter between the start and the end of a range.
pub const DELIMITER: char = '-';

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to a [`Range`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The end of the range comes before the start.
    EndBeforeStart(usize, usize),

    /// The number of columns spanned by the range cannot be represented.
    WidthOverflow(usize, usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EndBeforeStart(start, end) => {
                write!(f, "the end ({end}) comes before the start ({start})")
            }
            Error::WidthOverflow(start, end) => {
                write!(f, "the width of the range {start}-{end} is too large")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Range
////////////////////////////////////////////////////////////////////////////////////////

/// A contiguous block of alignment columns.
///
/// Both ends are zero-based and inclusive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Range {
    /// The first column.
    start: usize,

    /// The last column.
    end: usize,
}

impl Range {
    /// Attempts to create a new [`Range`].
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::partition::Range;
    ///
    /// let range = Range::try_new(0, 99)?;
    /// assert_eq!(range.start(), 0);
    /// assert_eq!(range.end(), 99);
    /// assert_eq!(range.width(), 100);
    ///
    /// assert!(Range::try_new(5, 2).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(start: usize, end: usize) -> Result<Self> {
        if end < start {
            return Err(Error::EndBeforeStart(start, end));
        }

        if (end - start).checked_add(1).is_none() {
            return Err(Error::WidthOverflow(start, end));
        }

        Ok(Self { start, end })
    }

    /// Returns the first column of the range.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the last column of the range (inclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the number of columns spanned by the range.
    ///
    /// This is always at least one.
    pub fn width(&self) -> usize {
        // SAFETY: `try_new()` guarantees that this cannot overflow.
        self.end - self.start + 1
    }

    /// Returns the range as a [`std::ops::RangeInclusive`] suitable for
    /// slicing.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::partition::Range;
    ///
    /// let residues = b"ACGTACGT";
    /// let range = Range::try_new(2, 4)?;
    /// assert_eq!(&residues[range.as_inclusive()], b"GTA");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn as_inclusive(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.start, DELIMITER, self.end)
    }
}
