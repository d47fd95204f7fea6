//! Diagnostics collected while tokenizing.
//!
//! A [`Diagnostics`] sink holds at most one fatal error plus two ordered,
//! append-only lists: warnings raised by the tokenizer for malformed quoting,
//! and validation errors reserved for layers built on top of the token
//! stream. Every record carries the [`Position`] of the character that
//! triggered it.

mod messages;

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::{self, Write as _};

pub use messages::MessageTable;

use crate::Position;

static EN_US: MessageTable = MessageTable::EN_US;

/// The kinds of problems a [`Diagnostics`] sink can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum DiagnosticCode {
    /// The character source failed to deliver the next character.
    Io,
    /// A character appeared where only a blank, the delimiter or a line
    /// break may follow a quote.
    UnexpectedCharacter,
}

/// One recorded problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// What went wrong.
    pub code: DiagnosticCode,
    /// Where the offending character was read.
    pub position: Position,
}

/// Sink for the fatal error, warnings and validation errors of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    error: Option<Diagnostic>,
    warnings: Vec<Diagnostic>,
    validation_errors: Vec<Diagnostic>,
    messages: &'static MessageTable,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates an empty sink using [`MessageTable::EN_US`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            error: None,
            warnings: Vec::new(),
            validation_errors: Vec::new(),
            messages: &EN_US,
        }
    }

    /// Records the fatal error, replacing any earlier one.
    pub fn fail(&mut self, code: DiagnosticCode, at: Position) {
        self.error = Some(Diagnostic {
            code,
            position: at.snapshot(),
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: DiagnosticCode, at: Position) {
        self.warnings.push(Diagnostic {
            code,
            position: at.snapshot(),
        });
    }

    /// Appends a validation error.
    pub fn validation_error(&mut self, code: DiagnosticCode, at: Position) {
        self.validation_errors.push(Diagnostic {
            code,
            position: at.snapshot(),
        });
    }

    /// Clears the fatal error and both lists. The message table is kept.
    pub fn reset(&mut self) {
        self.error = None;
        self.warnings.clear();
        self.validation_errors.clear();
    }

    /// The fatal error, if one was recorded.
    #[must_use]
    pub fn error(&self) -> Option<&Diagnostic> {
        self.error.as_ref()
    }

    /// Warnings in the order they were recorded.
    #[must_use]
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Validation errors in the order they were recorded.
    #[must_use]
    pub fn validation_errors(&self) -> &[Diagnostic] {
        &self.validation_errors
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.warnings.is_empty() && self.validation_errors.is_empty()
    }

    /// Replaces the message table used for rendering.
    pub fn set_messages(&mut self, messages: &'static MessageTable) {
        self.messages = messages;
    }

    /// The message table used for rendering.
    #[must_use]
    pub fn messages(&self) -> &'static MessageTable {
        self.messages
    }

    /// Renders every record as text.
    ///
    /// Sections appear in the order error, warnings, validation errors, each
    /// under its own header line; empty sections are left out. Each record is
    /// one line of the form `Line:<L>, Col:<C>: <message>`.
    ///
    /// ```rust
    /// use csvbox::{DiagnosticCode, Diagnostics, Position};
    ///
    /// let mut diagnostics = Diagnostics::new();
    /// diagnostics.warn(DiagnosticCode::UnexpectedCharacter, Position::at(1, 4));
    /// assert_eq!(
    ///     diagnostics.describe(),
    ///     "Warning(s):\nLine:1, Col:4: Unexpected character"
    /// );
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        self.display().to_string()
    }

    /// A [`Display`](fmt::Display) adapter producing the same text as
    /// [`describe`](Self::describe).
    #[must_use]
    pub fn display(&self) -> DisplayDiagnostics<'_> {
        DisplayDiagnostics { diagnostics: self }
    }
}

/// Renders a [`Diagnostics`] sink; see [`Diagnostics::describe`].
#[derive(Debug, Clone, Copy)]
pub struct DisplayDiagnostics<'a> {
    diagnostics: &'a Diagnostics,
}

impl fmt::Display for DisplayDiagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.diagnostics;
        let sections: [(&str, &[Diagnostic]); 3] = [
            ("Error:", d.error.as_slice()),
            ("Warning(s):", d.warnings.as_slice()),
            ("Validation Error(s):", d.validation_errors.as_slice()),
        ];

        let mut first = true;
        for (header, records) in sections {
            if records.is_empty() {
                continue;
            }
            if !first {
                f.write_char('\n')?;
            }
            first = false;
            f.write_str(header)?;
            for record in records {
                write!(
                    f,
                    "\n{}: {}",
                    record.position,
                    d.messages.message(record.code)
                )?;
            }
        }
        Ok(())
    }
}
