use alloc::{string::String, vec::Vec};

use crate::{CharSource, Tokenizer, TokenizerError};

/// Iterator over the records of a source, one `Vec` of fields per line.
///
/// Created by [`Tokenizer::records`]. A final line break does not produce a
/// trailing empty record. After an error the iterator ends.
#[derive(Debug)]
pub struct Records<'t, S> {
    tokenizer: &'t mut Tokenizer,
    source: S,
    done: bool,
}

impl Tokenizer {
    /// Groups the fields of `source` into records.
    ///
    /// ```rust
    /// use csvbox::{StrSource, Tokenizer};
    ///
    /// let mut tokenizer = Tokenizer::default();
    /// let records: Vec<_> = tokenizer
    ///     .records(StrSource::new("a,b\r\nc\n"))
    ///     .collect::<Result<_, _>>()
    ///     .unwrap();
    /// assert_eq!(records, vec![vec!["a", "b"], vec!["c"]]);
    /// ```
    pub fn records<S: CharSource>(&mut self, source: S) -> Records<'_, S> {
        Records {
            tokenizer: self,
            source,
            done: false,
        }
    }
}

impl<S: CharSource> Iterator for Records<'_, S> {
    type Item = Result<Vec<String>, TokenizerError<S::Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut record = Vec::new();
        loop {
            let field = match self.tokenizer.next_token(&mut self.source) {
                Ok(field) => field,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };
            if self.tokenizer.is_end_of_stream() {
                self.done = true;
                if record.is_empty() && field.is_empty() {
                    return None;
                }
                record.push(field);
                return Some(Ok(record));
            }
            record.push(field);
            if self.tokenizer.is_end_of_line() {
                return Some(Ok(record));
            }
        }
    }
}
