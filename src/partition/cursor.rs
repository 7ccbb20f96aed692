//! A cursor over a single partition line.

/// A forward-only cursor over a string slice.
///
/// Every read checks for the end of input; offsets are byte offsets into the
/// original line.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    /// The full line.
    input: &'a str,

    /// The current byte offset.
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new [`Cursor`] at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self { input, offset: 0 }
    }

    /// Gets the current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Peeks at the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    /// Consumes the next character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    /// Returns whether the whole input has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Skips any ASCII whitespace, including the vertical tab.
    pub fn skip_whitespace(&mut self) {
        self.take_while(|c| c.is_ascii_whitespace() || c == '\x0b');
    }

    /// Consumes the longest run of characters matching `predicate` and returns
    /// it. The run may be empty.
    pub fn take_while<F>(&mut self, predicate: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.offset;

        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }

            self.offset += c.len_utf8();
        }

        &self.input[start..self.offset]
    }
}
