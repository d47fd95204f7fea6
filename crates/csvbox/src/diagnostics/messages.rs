use super::DiagnosticCode;

/// Message text for every [`DiagnosticCode`], in one language.
///
/// Each code is a required field, so a table that is missing a message does
/// not compile.
///
/// ```rust
/// use csvbox::{Diagnostics, MessageTable};
///
/// static DE: MessageTable = MessageTable {
///     language: "de-DE",
///     io: "Ein-/Ausgabefehler",
///     unexpected_character: "Unerwartetes Zeichen",
/// };
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.set_messages(&DE);
/// assert_eq!(diagnostics.messages().language, "de-DE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTable {
    /// Language tag, e.g. `en-US`.
    pub language: &'static str,
    /// Text for [`DiagnosticCode::Io`].
    pub io: &'static str,
    /// Text for [`DiagnosticCode::UnexpectedCharacter`].
    pub unexpected_character: &'static str,
}

impl MessageTable {
    /// The built-in English table.
    pub const EN_US: MessageTable = MessageTable {
        language: "en-US",
        io: "IOException",
        unexpected_character: "Unexpected character",
    };

    /// Looks up the message for `code`.
    #[must_use]
    pub fn message(&self, code: DiagnosticCode) -> &'static str {
        match code {
            DiagnosticCode::Io => self.io,
            DiagnosticCode::UnexpectedCharacter => self.unexpected_character,
        }
    }
}

impl Default for MessageTable {
    fn default() -> Self {
        Self::EN_US
    }
}
