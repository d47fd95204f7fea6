//! Writing fields so that the tokenizer reads them back unchanged.

use alloc::{borrow::Cow, string::String};

/// Encodes one field for output.
///
/// The value is wrapped in double quotes, with embedded quotes doubled, when
/// it contains the delimiter, a line break or the comment opener `/*`. Values
/// whose first non-blank character is a quote, or that are made only of
/// blanks, are quoted as well. With `*` as the delimiter a value ending in
/// `/` is quoted, and with `/` as the delimiter a value starting with `*`,
/// so that no `/*` forms across a field boundary. Anything else is returned
/// as is.
///
/// ```rust
/// use csvbox::encode_field;
///
/// assert_eq!(encode_field("plain", ','), "plain");
/// assert_eq!(encode_field("a,b", ','), "\"a,b\"");
/// assert_eq!(encode_field("say \"hi\"\n", ','), "\"say \"\"hi\"\"\n\"");
/// assert_eq!(encode_field("1/*2", ';'), "\"1/*2\"");
/// ```
#[must_use]
pub fn encode_field(value: &str, delimiter: char) -> Cow<'_, str> {
    if !needs_quotes(value, delimiter) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    Cow::Owned(out)
}

/// Encodes a record: the encoded fields joined by `delimiter`, followed by
/// `\n`.
///
/// A record with a single empty field is written as `""` so that it is not
/// mistaken for a blank line.
///
/// A `\r` at the end of the last field does not survive a round trip: the
/// tokenizer drops it before the line break, quoted or not.
///
/// ```rust
/// use csvbox::encode_record;
///
/// assert_eq!(encode_record(["id", "note, long"], ','), "id,\"note, long\"\n");
/// ```
pub fn encode_record<I>(fields: I, delimiter: char) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = String::new();
    let mut count = 0usize;
    for field in fields {
        if count > 0 {
            out.push(delimiter);
        }
        out.push_str(&encode_field(field.as_ref(), delimiter));
        count += 1;
    }
    if count == 1 && out.is_empty() {
        out.push_str("\"\"");
    }
    out.push('\n');
    out
}

fn needs_quotes(value: &str, delimiter: char) -> bool {
    value.contains(delimiter)
        || value.contains('\n')
        || value.contains("/*")
        || value.trim_start_matches([' ', '\t']).starts_with('"')
        || (!value.is_empty() && value.chars().all(|c| c == ' ' || c == '\t'))
        || (delimiter == '*' && value.ends_with('/'))
        || (delimiter == '/' && value.starts_with('*'))
}
