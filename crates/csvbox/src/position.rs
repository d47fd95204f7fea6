use core::fmt;

/// A 1-based line/column cursor over the character stream.
///
/// The tokenizer advances the position after it has classified a character,
/// so a diagnostic recorded while handling a character points at that
/// character.
///
/// `retreat` only undoes the most recent `advance`. Undoing a `\n` restores
/// the column the previous line ended at, but only for that single step;
/// rewinding across more than one line break leaves the column at 1.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Current line, starting at 1.
    pub line: usize,
    /// Current column, starting at 1.
    pub column: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    column_before_newline: Option<usize>,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line && self.column == other.column
    }
}

impl Eq for Position {}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Creates a position at line 1, column 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            column_before_newline: None,
        }
    }

    /// Creates a position at the given coordinates.
    #[must_use]
    pub const fn at(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            column_before_newline: None,
        }
    }

    /// Moves past `c`.
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.column_before_newline = Some(self.column);
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Moves back over `c`, which must be the character last passed to
    /// [`advance`](Self::advance).
    pub fn retreat(&mut self, c: char) {
        if c == '\n' {
            self.line = self.line.saturating_sub(1).max(1);
            self.column = self.column_before_newline.take().unwrap_or(1);
        } else {
            self.column = self.column.saturating_sub(1).max(1);
        }
    }

    /// Returns to line 1, column 1.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// A copy of the coordinates without the single-step undo state.
    ///
    /// Equality only looks at the coordinates, so this matters only for what
    /// a later [`retreat`](Self::retreat) does.
    #[must_use]
    pub const fn snapshot(&self) -> Self {
        Self::at(self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line:{}, Col:{}", self.line, self.column)
    }
}
