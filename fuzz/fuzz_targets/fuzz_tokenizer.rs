#![no_main]

use arbitrary::Arbitrary;
use csvbox::{
    IterSource, Position, ReaderSource, StrSource, Tokenizer, TokenizerOptions, encode_record,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    delimiter: char,
    max_field_length: u8,
    /// Read buffer size for the byte-oriented source.
    capacity: u8,
    bytes: &'a [u8],
    record: Vec<String>,
}

fn tokenize_all<S: csvbox::CharSource>(options: TokenizerOptions, mut source: S) -> Vec<String>
where
    S::Error: core::fmt::Debug,
{
    let mut tokenizer = Tokenizer::new(options);
    let mut out = Vec::new();
    while !tokenizer.is_end_of_stream() {
        let field = tokenizer.next_token(&mut source).unwrap();
        assert!(field.chars().count() <= options.max_field_length);
        out.push(field);
    }
    out
}

fuzz_target!(|input: Input<'_>| {
    // Line breaks and quotes as delimiters are outside the supported grammar.
    if matches!(input.delimiter, '\n' | '\r' | '"') {
        return;
    }
    let options = TokenizerOptions {
        delimiter: input.delimiter,
        max_field_length: usize::from(input.max_field_length),
    };

    // Every source sees the same characters, so every source yields the
    // same fields.
    let text = String::from_utf8_lossy(input.bytes);
    let from_str = tokenize_all(options, StrSource::new(&text));
    let from_iter = tokenize_all(options, IterSource::new(text.chars()));
    let from_reader = tokenize_all(
        options,
        ReaderSource::with_capacity(usize::from(input.capacity), input.bytes),
    );
    assert_eq!(from_str, from_iter);
    assert_eq!(from_str, from_reader);

    // The final position is a plain scan of the input.
    let mut tokenizer = Tokenizer::new(options);
    let mut source = StrSource::new(&text);
    while !tokenizer.is_end_of_stream() {
        let _ = tokenizer.next_token(&mut source);
    }
    let mut expected = Position::new();
    text.chars().for_each(|c| expected.advance(c));
    assert_eq!(tokenizer.position(), expected);

    // Encoded records read back unchanged, without warnings. A `\r` ending
    // the last field is dropped at the line break.
    if input.record.last().is_none_or(|last| last.ends_with('\r')) {
        return;
    }
    let encoded = encode_record(&input.record, options.delimiter);
    let mut tokenizer = Tokenizer::new(TokenizerOptions {
        max_field_length: usize::MAX,
        ..options
    });
    let records: Vec<Vec<String>> = tokenizer
        .records(StrSource::new(&encoded))
        .map(Result::unwrap)
        .collect();
    assert_eq!(records, [input.record.clone()]);
    assert!(tokenizer.diagnostics().is_empty());
});
