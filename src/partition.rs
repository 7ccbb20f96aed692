//! Partition definitions.
//!
//! A partition names a model and a set of alignment columns. Each partition is
//! written on its own line in the following form:
//!
//! ```text
//! <model_name>,<partition_name>=<start>-<end>[,<start>-<end>...]
//! ```
//!
//! Column indices are zero-based and both ends of a range are inclusive.
//! Whitespace is allowed around every token.

use std::num::ParseIntError;
use std::str::FromStr;

use nonempty::NonEmpty;

mod cursor;
pub mod file;
pub mod range;

use cursor::Cursor;
pub use file::File;
pub use range::Range;

/// The delimiter between the model name and the partition name.
pub const MODEL_DELIMITER: char = ',';

/// The delimiter between the partition name and the list of ranges.
pub const NAME_DELIMITER: char = '=';

/// The delimiter between two ranges.
pub const RANGE_SEPARATOR: char = ',';

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a partition line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// A specific character was expected but another one was found.
    UnexpectedCharacter {
        /// The expected character.
        expected: char,

        /// The character that was found instead.
        found: char,

        /// The byte offset of the found character.
        offset: usize,
    },

    /// A specific character was expected but the line ended.
    UnexpectedEnd {
        /// The expected character.
        expected: char,

        /// The byte offset of the end of the line.
        offset: usize,
    },

    /// The start of a range is not a valid non-negative integer.
    InvalidStart {
        /// The byte offset where the integer was expected.
        offset: usize,

        /// The inner error.
        source: ParseIntError,
    },

    /// The end of a range is not a valid non-negative integer.
    InvalidEnd {
        /// The byte offset where the integer was expected.
        offset: usize,

        /// The inner error.
        source: ParseIntError,
    },

    /// A range is not valid for the partition.
    InvalidRange {
        /// The name of the partition.
        partition: String,

        /// The inner error.
        source: range::Error,
    },

    /// Characters remained after the last range.
    TrailingCharacter {
        /// The first leftover character.
        found: char,

        /// The byte offset of the leftover character.
        offset: usize,
    },

    /// The partition has no model name.
    MissingModelName,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedCharacter {
                expected,
                found,
                offset,
            } => write!(f, "expected {expected:?}, found {found:?} at offset {offset}"),
            ParseError::UnexpectedEnd { expected, offset } => {
                write!(f, "expected {expected:?}, found end of line at offset {offset}")
            }
            ParseError::InvalidStart { offset, source } => {
                write!(f, "invalid range start at offset {offset}: {source}")
            }
            ParseError::InvalidEnd { offset, source } => {
                write!(f, "invalid range end at offset {offset}: {source}")
            }
            ParseError::InvalidRange { partition, source } => {
                write!(f, "invalid range in partition `{partition}`: {source}")
            }
            ParseError::TrailingCharacter { found, offset } => write!(
                f,
                "expected {RANGE_SEPARATOR:?} or end of line, found {found:?} at offset {offset}"
            ),
            ParseError::MissingModelName => write!(f, "missing model name"),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to the construction of a [`Partition`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The model name is empty or contains characters other than ASCII
    /// letters and digits.
    InvalidModelName(String),

    /// The partition name contains characters other than ASCII letters,
    /// digits, and underscores.
    InvalidName(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidModelName(name) => write!(f, "invalid model name: `{name}`"),
            Error::InvalidName(name) => write!(f, "invalid partition name: `{name}`"),
        }
    }
}

impl std::error::Error for Error {}

////////////////////////////////////////////////////////////////////////////////////////
// Partition
////////////////////////////////////////////////////////////////////////////////////////

/// A named set of alignment columns associated with a model.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Partition {
    /// The model name.
    model_name: String,

    /// The partition name.
    name: String,

    /// The column ranges in the order they were written.
    ranges: NonEmpty<Range>,
}

impl Partition {
    /// Attempts to create a new [`Partition`].
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::partition::Partition;
    /// use msapart::partition::Range;
    /// use nonempty::nonempty;
    ///
    /// let partition = Partition::try_new(
    ///     "GTR",
    ///     "gene1",
    ///     nonempty![Range::try_new(0, 99)?, Range::try_new(150, 199)?],
    /// )?;
    ///
    /// assert_eq!(partition.to_string(), "GTR,gene1=0-99,150-199");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        model_name: impl Into<String>,
        name: impl Into<String>,
        ranges: NonEmpty<Range>,
    ) -> Result<Self, Error> {
        let model_name = model_name.into();
        let name = name.into();

        if model_name.is_empty() || !model_name.chars().all(is_model_char) {
            return Err(Error::InvalidModelName(model_name));
        }

        if !name.chars().all(is_name_char) {
            return Err(Error::InvalidName(name));
        }

        Ok(Self {
            model_name,
            name,
            ranges,
        })
    }

    /// Gets the model name.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::partition::Partition;
    ///
    /// let partition = "GTR,p1=0-2".parse::<Partition>()?;
    /// assert_eq!(partition.model_name(), "GTR");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Gets the partition name.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::partition::Partition;
    ///
    /// let partition = "GTR,p1=0-2".parse::<Partition>()?;
    /// assert_eq!(partition.name(), "p1");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the column ranges in the order they were written.
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::partition::Partition;
    /// use msapart::partition::Range;
    ///
    /// let partition = "GTR,p1=5-9,0-2".parse::<Partition>()?;
    /// let ranges = partition.ranges().iter().collect::<Vec<_>>();
    ///
    /// assert_eq!(ranges, vec![&Range::try_new(5, 9)?, &Range::try_new(0, 2)?]);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn ranges(&self) -> &NonEmpty<Range> {
        &self.ranges
    }

    /// Gets the total number of columns covered by the partition.
    ///
    /// Overlapping ranges are counted once per occurrence. [`None`] is returned
    /// if the total cannot be represented as a [`usize`].
    ///
    /// # Examples
    ///
    /// ```
    /// use msapart::partition::Partition;
    ///
    /// let partition = "GTR,p1=0-2,1-4".parse::<Partition>()?;
    /// assert_eq!(partition.width(), Some(7));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn width(&self) -> Option<usize> {
        self.ranges
            .iter()
            .try_fold(0usize, |total, range| total.checked_add(range.width()))
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.model_name, MODEL_DELIMITER, self.name, NAME_DELIMITER
        )?;

        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, "{RANGE_SEPARATOR}")?;
            }

            write!(f, "{range}")?;
        }

        Ok(())
    }
}

impl FromStr for Partition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);

        cursor.skip_whitespace();
        let model_name = cursor.take_while(is_model_char);

        if model_name.is_empty() {
            cursor.skip_whitespace();

            // A blank line.
            if cursor.is_at_end() {
                return Err(ParseError::MissingModelName);
            }
        }

        expect(&mut cursor, MODEL_DELIMITER)?;
        let name = cursor.take_while(is_name_char);
        expect(&mut cursor, NAME_DELIMITER)?;

        let mut ranges = NonEmpty::new(parse_range(&mut cursor, name)?);

        loop {
            cursor.skip_whitespace();

            match cursor.peek() {
                Some(RANGE_SEPARATOR) => {
                    cursor.bump();
                    ranges.push(parse_range(&mut cursor, name)?);
                }
                Some(found) => {
                    return Err(ParseError::TrailingCharacter {
                        found,
                        offset: cursor.offset(),
                    });
                }
                None => break,
            }
        }

        if model_name.is_empty() {
            return Err(ParseError::MissingModelName);
        }

        Ok(Self {
            model_name: model_name.into(),
            name: name.into(),
            ranges,
        })
    }
}

/// Whether a character may appear in a model name.
fn is_model_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Whether a character may appear in a partition name.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Consumes `expected` (surrounded by optional whitespace) from the cursor.
fn expect(cursor: &mut Cursor<'_>, expected: char) -> Result<(), ParseError> {
    cursor.skip_whitespace();
    let offset = cursor.offset();

    match cursor.bump() {
        Some(c) if c == expected => {
            cursor.skip_whitespace();
            Ok(())
        }
        Some(found) => Err(ParseError::UnexpectedCharacter {
            expected,
            found,
            offset,
        }),
        None => Err(ParseError::UnexpectedEnd { expected, offset }),
    }
}

/// Parses a run of ASCII digits as a column index.
fn parse_column(cursor: &mut Cursor<'_>) -> Result<usize, ParseIntError> {
    cursor.take_while(|c| c.is_ascii_digit()).parse()
}

/// Parses a single `<start>-<end>` range.
fn parse_range(cursor: &mut Cursor<'_>, partition: &str) -> Result<Range, ParseError> {
    cursor.skip_whitespace();

    let offset = cursor.offset();
    let start =
        parse_column(cursor).map_err(|source| ParseError::InvalidStart { offset, source })?;

    expect(cursor, range::DELIMITER)?;

    let offset = cursor.offset();
    let end = parse_column(cursor).map_err(|source| ParseError::InvalidEnd { offset, source })?;

    Range::try_new(start, end).map_err(|source| ParseError::InvalidRange {
        partition: partition.into(),
        source,
    })
}
