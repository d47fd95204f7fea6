//! The field tokenizer.
//!
//! Overview
//! - [`Tokenizer::next_token`] pulls characters from a [`CharSource`] until a
//!   field is complete and returns its text. Whether the field closed a
//!   record or the input is exhausted is reported by
//!   [`Tokenizer::is_end_of_line`] and [`Tokenizer::is_end_of_stream`].
//! - Each character goes through two layers. Box comments are recognized
//!   first, with one character of lookahead on `/` (to open) and `*` (to
//!   close). Everything else is classified by the per-field state machine.
//!
//! Lookahead
//! - A lookahead character that does not complete `/*` or `*/` is classified
//!   right after the first one, without another comment check. So `//*` is
//!   plain data and `**/` does not close a comment.
//! - If the first character ends the field (a `/` delimiter), the lookahead
//!   character is parked in the pushback slot for the next call.
//! - Running out of input during lookahead winds up the stream with whatever
//!   the field holds.
//!
//! Positions
//! - The [`Position`] advances after a character has been classified, so a
//!   warning points at the character that caused it. Comment contents and
//!   the comment markers themselves still advance the position.


use alloc::string::String;
use core::mem;

use tracing::{debug, error, trace};

use crate::{
    CharSource, DiagnosticCode, Diagnostics, Position, TokenizerError, TokenizerOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Nothing but blanks read for the current field.
    NotStarted,
    UnquotedData,
    QuotedData,
    /// A `"` inside a quoted field: either an escaped quote or the closing
    /// one, decided by the next character.
    QuoteInQuote,
    /// After the closing quote, only blanks may precede the delimiter.
    DataEndedWithQuote,
    FieldEnded,
}

/// A streaming CSV tokenizer.
///
/// One instance handles one input at a time; [`reset`](Self::reset) starts a
/// new session while keeping the allocated buffers.
///
/// # Examples
///
/// ```rust
/// use csvbox::{StrSource, Tokenizer};
///
/// let mut tokenizer = Tokenizer::default();
/// let mut source = StrSource::new("a/*x,y*/,\"b\"\"c\"\n");
///
/// assert_eq!(tokenizer.next_token(&mut source).unwrap(), "a");
/// assert!(!tokenizer.is_end_of_line());
/// assert_eq!(tokenizer.next_token(&mut source).unwrap(), "b\"c");
/// assert!(tokenizer.is_end_of_line());
/// assert_eq!(tokenizer.next_token(&mut source).unwrap(), "");
/// assert!(tokenizer.is_end_of_stream());
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    options: TokenizerOptions,
    alt_whitespace: char,

    state: ParseState,
    /// Committed field content, and its length in characters.
    data: String,
    data_len: usize,
    /// Leading blanks, kept until the field turns out to be unquoted.
    backlog: String,
    in_comment: bool,
    end_of_line: bool,
    end_of_stream: bool,

    reinserted_token: Option<String>,
    reinserted_char: Option<char>,
    last_char: Option<char>,
    last_token: Option<String>,

    position: Position,
    diagnostics: Diagnostics,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerOptions::default())
    }
}

impl Tokenizer {
    /// Creates a tokenizer with its own position tracker and diagnostics.
    #[must_use]
    pub fn new(options: TokenizerOptions) -> Self {
        Self::with_parts(options, Position::new(), Diagnostics::new())
    }

    /// Creates a tokenizer around an existing position tracker and
    /// diagnostics sink, e.g. to continue counting lines across inputs or to
    /// share a configured message table.
    #[must_use]
    pub fn with_parts(
        options: TokenizerOptions,
        position: Position,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            alt_whitespace: options.alt_whitespace(),
            options,
            state: ParseState::NotStarted,
            data: String::new(),
            data_len: 0,
            backlog: String::new(),
            in_comment: false,
            end_of_line: false,
            end_of_stream: false,
            reinserted_token: None,
            reinserted_char: None,
            last_char: None,
            last_token: None,
            position,
            diagnostics,
        }
    }

    /// Hands back the position tracker and diagnostics sink.
    #[must_use]
    pub fn into_parts(self) -> (Position, Diagnostics) {
        (self.position, self.diagnostics)
    }

    /// The active options.
    #[must_use]
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Sets the field delimiter, which also picks the alternate blank (tab,
    /// or space when the delimiter is a tab).
    pub fn set_delimiter(&mut self, delimiter: char) {
        self.options.delimiter = delimiter;
        self.alt_whitespace = self.options.alt_whitespace();
    }

    /// Sets the maximum number of characters kept per field.
    pub fn set_max_field_length(&mut self, max_field_length: usize) {
        self.options.max_field_length = max_field_length;
    }

    /// The position of the next character to be read.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Mutable access to the diagnostics, e.g. for validation layers
    /// recording their own findings.
    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Whether the last returned field ended a record.
    #[must_use]
    pub fn is_end_of_line(&self) -> bool {
        self.end_of_line
    }

    /// Whether the input has been exhausted. Stays set until
    /// [`reset`](Self::reset).
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        self.end_of_stream
    }

    /// Starts a new session: clears all field state, pushback slots,
    /// diagnostics, and moves the position back to line 1, column 1.
    pub fn reset(&mut self) {
        self.state = ParseState::NotStarted;
        self.data.clear();
        self.data_len = 0;
        self.backlog.clear();
        self.in_comment = false;
        self.end_of_line = false;
        self.end_of_stream = false;
        self.reinserted_token = None;
        self.reinserted_char = None;
        self.last_char = None;
        self.last_token = None;
        self.position.reset();
        self.diagnostics.reset();
    }

    /// Makes the next [`next_token`](Self::next_token) call return the last
    /// returned field again, without reading. Only one field can be pushed
    /// back; calling this twice has the same effect as calling it once.
    pub fn reinsert_token(&mut self) {
        self.reinserted_token.clone_from(&self.last_token);
    }

    /// Pushes back the last character read, so that it is delivered again by
    /// the next read, and moves the position back over it.
    ///
    /// Does nothing if no character has been read since the last reset, or
    /// if the last character read is still waiting in the pushback slot.
    pub fn reinsert_last_char(&mut self) {
        if self.reinserted_char.is_some() {
            return;
        }
        if let Some(c) = self.last_char {
            self.reinserted_char = Some(c);
            self.position.retreat(c);
        }
    }

    /// Reads the next field from `source`.
    ///
    /// At the end of input the text buffered so far is returned as the final
    /// field, and both [`is_end_of_stream`](Self::is_end_of_stream) and
    /// [`is_end_of_line`](Self::is_end_of_line) are set. Calls after that
    /// keep returning empty fields.
    ///
    /// # Errors
    ///
    /// Returns the source's error, tagged with the position it occurred at,
    /// if reading fails. The failure is also recorded as the fatal
    /// [`DiagnosticCode::Io`] diagnostic.
    pub fn next_token<S>(&mut self, source: &mut S) -> Result<String, TokenizerError<S::Error>>
    where
        S: CharSource + ?Sized,
    {
        if let Some(token) = self.reinserted_token.take() {
            return Ok(token);
        }
        if self.state == ParseState::FieldEnded {
            self.end_of_line = false;
            self.state = ParseState::NotStarted;
            self.backlog.clear();
        }

        let mut next = match self.reinserted_char.take() {
            Some(c) => Some(c),
            None => self.read_char(source)?,
        };
        loop {
            let Some(c) = next else {
                return Ok(self.wind_up());
            };

            if self.opens_comment(c) || self.closes_comment(c) {
                let Some(ahead) = self.read_char(source)? else {
                    self.process_char(c);
                    if self.state == ParseState::FieldEnded {
                        break;
                    }
                    return Ok(self.wind_up());
                };
                if (self.in_comment && ahead == '/') || (!self.in_comment && ahead == '*') {
                    self.in_comment = !self.in_comment;
                    debug!(
                        line = self.position.line,
                        column = self.position.column,
                        in_comment = self.in_comment,
                        "box comment boundary"
                    );
                    self.position.advance(c);
                    self.position.advance(ahead);
                } else {
                    self.process_char(c);
                    if self.state == ParseState::FieldEnded {
                        self.reinserted_char = Some(ahead);
                        break;
                    }
                    self.process_char(ahead);
                }
            } else {
                self.process_char(c);
            }

            if self.state == ParseState::FieldEnded {
                break;
            }
            next = self.read_char(source)?;
        }

        let token = self.take_data();
        trace!(
            line = self.position.line,
            column = self.position.column,
            end_of_line = self.end_of_line,
            len = token.len(),
            "field"
        );
        self.last_token = Some(token.clone());
        Ok(token)
    }

    fn read_char<S>(&mut self, source: &mut S) -> Result<Option<char>, TokenizerError<S::Error>>
    where
        S: CharSource + ?Sized,
    {
        match source.next_char() {
            Ok(c) => {
                self.last_char = c;
                Ok(c)
            }
            Err(err) => {
                error!(
                    line = self.position.line,
                    column = self.position.column,
                    "character source failed"
                );
                self.diagnostics.fail(DiagnosticCode::Io, self.position);
                Err(TokenizerError::new(err, self.position))
            }
        }
    }

    fn opens_comment(&self, c: char) -> bool {
        c == '/' && !self.in_comment && self.state != ParseState::QuotedData
    }

    fn closes_comment(&self, c: char) -> bool {
        c == '*' && self.in_comment
    }

    /// Runs `c` through the field state machine and advances the position
    /// past it.
    fn process_char(&mut self, c: char) {
        if !self.in_comment {
            self.classify(c);
        }
        self.position.advance(c);
    }

    fn classify(&mut self, c: char) {
        match self.state {
            ParseState::NotStarted => {
                if self.ends_field(c) {
                    return;
                }
                if c == '"' {
                    self.state = ParseState::QuotedData;
                    self.backlog.clear();
                } else if self.is_blank(c) {
                    self.backlog.push(c);
                } else {
                    self.state = ParseState::UnquotedData;
                    let backlog = mem::take(&mut self.backlog);
                    for b in backlog.chars() {
                        self.push_data(b);
                    }
                    self.backlog = backlog;
                    self.backlog.clear();
                    self.push_data(c);
                }
            }
            ParseState::UnquotedData => {
                if !self.ends_field(c) {
                    self.push_data(c);
                }
            }
            ParseState::QuotedData => {
                if c == '"' {
                    self.state = ParseState::QuoteInQuote;
                } else {
                    self.push_data(c);
                }
            }
            ParseState::QuoteInQuote => {
                if c == '"' {
                    self.state = ParseState::QuotedData;
                    self.push_data(c);
                } else if self.ends_field(c) {
                    return;
                } else if self.is_blank(c) || c == '\r' {
                    self.state = ParseState::DataEndedWithQuote;
                } else {
                    // The quote closed the field early; keep the stray text
                    // and read on as unquoted data.
                    self.unexpected_character(c);
                    self.state = ParseState::UnquotedData;
                    self.push_data(c);
                }
            }
            ParseState::DataEndedWithQuote => {
                if !self.ends_field(c) && !self.is_blank(c) {
                    self.unexpected_character(c);
                }
            }
            ParseState::FieldEnded => {}
        }
    }

    /// Ends the field if `c` is the delimiter or a line break. A `\r` at the
    /// end of the field text is dropped at a line break, quoted or not.
    fn ends_field(&mut self, c: char) -> bool {
        if c == self.options.delimiter {
            self.state = ParseState::FieldEnded;
            self.end_of_line = false;
        } else if c == '\n' {
            self.state = ParseState::FieldEnded;
            self.end_of_line = true;
            if self.data.ends_with('\r') {
                self.data.pop();
                self.data_len -= 1;
            }
        } else {
            return false;
        }
        true
    }

    fn is_blank(&self, c: char) -> bool {
        c == ' ' || c == self.alt_whitespace
    }

    fn unexpected_character(&mut self, c: char) {
        debug!(
            line = self.position.line,
            column = self.position.column,
            character = %c.escape_debug(),
            "unexpected character after quote"
        );
        self.diagnostics
            .warn(DiagnosticCode::UnexpectedCharacter, self.position);
    }

    fn push_data(&mut self, c: char) {
        if self.data_len < self.options.max_field_length {
            self.data.push(c);
            self.data_len += 1;
        }
    }

    fn take_data(&mut self) -> String {
        self.data_len = 0;
        let token = String::from(self.data.as_str());
        self.data.clear();
        token
    }

    /// Finishes the stream: the buffered text becomes the last field.
    fn wind_up(&mut self) -> String {
        self.end_of_stream = true;
        self.end_of_line = true;
        self.state = ParseState::NotStarted;
        self.in_comment = false;
        self.backlog.clear();
        let token = self.take_data();
        debug!(
            line = self.position.line,
            column = self.position.column,
            len = token.len(),
            "end of stream"
        );
        self.last_token = Some(token.clone());
        token
    }
}
