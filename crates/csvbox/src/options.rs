/// Configuration options for the tokenizer.
///
/// # Examples
///
/// ```rust
/// use csvbox::{Tokenizer, TokenizerOptions};
///
/// let tokenizer = Tokenizer::new(TokenizerOptions {
///     delimiter: '\t',
///     ..Default::default()
/// });
/// assert_eq!(tokenizer.options().max_field_length, 65535);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TokenizerOptions {
    /// The character separating fields within a record.
    ///
    /// Leading blanks of a field are held back until the tokenizer knows
    /// whether the field is quoted. Blanks are the space and one alternate
    /// character: tab, or space again when the delimiter itself is a tab.
    ///
    /// # Default
    ///
    /// `,`
    pub delimiter: char,

    /// The maximum number of characters kept for a single field.
    ///
    /// Characters beyond the limit are dropped without a diagnostic, while
    /// quoting, comments and positions are still tracked for them.
    ///
    /// # Default
    ///
    /// `65535`
    pub max_field_length: usize,
}

impl TokenizerOptions {
    /// The blank that is buffered besides the space character.
    #[must_use]
    pub(crate) fn alt_whitespace(&self) -> char {
        if self.delimiter == '\t' { ' ' } else { '\t' }
    }
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            max_field_length: 65535,
        }
    }
}
