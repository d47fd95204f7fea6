//! Pull-based character sources feeding the tokenizer.

use core::{convert::Infallible, iter::Fuse, str::Chars};

/// A sequence of characters read one at a time.
///
/// `Ok(None)` marks the end of input. Once a source has returned `Ok(None)`
/// it must keep doing so.
pub trait CharSource {
    /// The error raised when the next character cannot be read.
    type Error;

    /// Reads the next character.
    ///
    /// # Errors
    ///
    /// Returns the source's own error if reading fails.
    fn next_char(&mut self) -> Result<Option<char>, Self::Error>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    type Error = S::Error;

    fn next_char(&mut self) -> Result<Option<char>, Self::Error> {
        (**self).next_char()
    }
}

/// Reads the characters of a string slice.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Creates a source over `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { chars: text.chars() }
    }

    /// The part of the text not read yet.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        self.chars.as_str()
    }
}

impl CharSource for StrSource<'_> {
    type Error = Infallible;

    fn next_char(&mut self) -> Result<Option<char>, Infallible> {
        Ok(self.chars.next())
    }
}

/// Reads characters from any iterator.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: Fuse<I>,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    /// Creates a source over `iter`.
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: iter.into_iter().fuse(),
        }
    }
}

impl<I: Iterator<Item = char>> CharSource for IterSource<I> {
    type Error = Infallible;

    fn next_char(&mut self) -> Result<Option<char>, Infallible> {
        Ok(self.iter.next())
    }
}

#[cfg(feature = "std")]
pub use reader::ReaderSource;

#[cfg(feature = "std")]
mod reader {
    use std::{
        boxed::Box,
        io::{self, Read},
        vec,
    };

    use super::CharSource;

    const BUFFER_SIZE: usize = 8 * 1024;

    /// Decodes UTF-8 from a [`Read`] implementation.
    ///
    /// Invalid byte sequences decode as U+FFFD. Reads interrupted by a signal
    /// are retried; any other I/O error is returned to the caller.
    ///
    /// ```rust
    /// use csvbox::{ReaderSource, Tokenizer};
    ///
    /// let input: &[u8] = b"a,b\n";
    /// let mut tokenizer = Tokenizer::default();
    /// let mut source = ReaderSource::new(input);
    /// assert_eq!(tokenizer.next_token(&mut source).unwrap(), "a");
    /// assert_eq!(tokenizer.next_token(&mut source).unwrap(), "b");
    /// assert!(tokenizer.is_end_of_line());
    /// ```
    #[derive(Debug)]
    pub struct ReaderSource<R> {
        reader: R,
        buf: Box<[u8]>,
        start: usize,
        end: usize,
        eof: bool,
    }

    impl<R: Read> ReaderSource<R> {
        /// Creates a source reading from `reader`.
        pub fn new(reader: R) -> Self {
            Self::with_capacity(BUFFER_SIZE, reader)
        }

        /// Creates a source with a read buffer of `capacity` bytes.
        ///
        /// The capacity is raised to 4 bytes if smaller, so that any UTF-8
        /// sequence fits.
        pub fn with_capacity(capacity: usize, reader: R) -> Self {
            Self {
                reader,
                buf: vec![0; capacity.max(4)].into_boxed_slice(),
                start: 0,
                end: 0,
                eof: false,
            }
        }

        /// Unwraps the underlying reader. Buffered bytes are lost.
        pub fn into_inner(self) -> R {
            self.reader
        }

        fn fill(&mut self) -> io::Result<()> {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
            loop {
                match self.reader.read(&mut self.buf[self.end..]) {
                    Ok(0) => {
                        self.eof = true;
                        return Ok(());
                    }
                    Ok(n) => {
                        self.end += n;
                        return Ok(());
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => return Err(e),
                }
            }
        }
    }

    impl<R: Read> CharSource for ReaderSource<R> {
        type Error = io::Error;

        fn next_char(&mut self) -> io::Result<Option<char>> {
            loop {
                let pending = &self.buf[self.start..self.end];
                if pending.is_empty() && self.eof {
                    return Ok(None);
                }
                let (ch, size) = bstr::decode_utf8(pending);
                match ch {
                    Some(c) => {
                        self.start += size;
                        return Ok(Some(c));
                    }
                    // Empty, or a sequence cut off by the end of the buffer.
                    None if !self.eof && size == pending.len() => self.fill()?,
                    None => {
                        self.start += size.max(1);
                        return Ok(Some(char::REPLACEMENT_CHARACTER));
                    }
                }
            }
        }
    }

}
