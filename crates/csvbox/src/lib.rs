//! A streaming tokenizer for CSV text with `/* ... */` box comments.
//!
//! The [`Tokenizer`] pulls characters one at a time from a [`CharSource`] and
//! hands back one field per call to [`Tokenizer::next_token`], reporting
//! record and stream boundaries through [`Tokenizer::is_end_of_line`] and
//! [`Tokenizer::is_end_of_stream`]. Malformed quoting never aborts parsing;
//! it is recorded as a warning in the tokenizer's [`Diagnostics`], stamped
//! with the [`Position`] of the offending character.
//!
//! ```rust
//! use csvbox::{StrSource, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::default();
//! let mut source = StrSource::new("id, name /* display name */\n1,\"Doe, Jane\"\n");
//!
//! let records: Vec<Vec<String>> = tokenizer
//!     .records(&mut source)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(records, vec![vec!["id", " name "], vec!["1", "Doe, Jane"]]);
//! assert!(tokenizer.diagnostics().is_empty());
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod diagnostics;
mod encode;
mod error;
mod options;
mod position;
mod records;
mod source;
mod tokenizer;

pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, DisplayDiagnostics, MessageTable};
pub use encode::{encode_field, encode_record};
pub use error::TokenizerError;
pub use options::TokenizerOptions;
pub use position::Position;
pub use records::Records;
#[cfg(feature = "std")]
pub use source::ReaderSource;
pub use source::{CharSource, IterSource, StrSource};
pub use tokenizer::Tokenizer;
