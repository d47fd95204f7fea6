use thiserror::Error;

use crate::Position;

/// The character source failed while the tokenizer was reading from it.
///
/// This is the only error the tokenizer returns. Malformed CSV is recorded as
/// a warning in the tokenizer's diagnostics instead.
#[derive(Error, Debug, PartialEq)]
#[error("read error: {source} at {line}:{column}")]
pub struct TokenizerError<E> {
    #[source]
    pub(crate) source: E,
    /// Line of the character that could not be read.
    pub line: usize,
    /// Column of the character that could not be read.
    pub column: usize,
}

impl<E> TokenizerError<E> {
    pub(crate) fn new(source: E, at: Position) -> Self {
        Self {
            source,
            line: at.line,
            column: at.column,
        }
    }

    /// The error reported by the character source.
    pub fn source_error(&self) -> &E {
        &self.source
    }

    /// Unwraps the error reported by the character source.
    pub fn into_source(self) -> E {
        self.source
    }
}
