#![expect(missing_docs)]

use csvbox::{
    DiagnosticCode, Diagnostics, MessageTable, Position, StrSource, Tokenizer, TokenizerOptions,
};

static DE_DE: MessageTable = MessageTable {
    language: "de-DE",
    io: "Ein-/Ausgabefehler",
    unexpected_character: "Unerwartetes Zeichen",
};

#[test]
fn warnings_accumulate_across_records() {
    let mut tokenizer = Tokenizer::default();
    let records: Vec<_> = tokenizer
        .records(StrSource::new("\"a\"b,c\n\"d\" e\n\"ok\",\"fine\"\n"))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        records,
        vec![vec!["ab", "c"], vec!["d"], vec!["ok", "fine"]]
    );
    let warnings: Vec<_> = tokenizer
        .diagnostics()
        .warnings()
        .iter()
        .map(|d| (d.code, d.position.line, d.position.column))
        .collect();
    assert_eq!(
        warnings,
        vec![
            (DiagnosticCode::UnexpectedCharacter, 1, 4),
            (DiagnosticCode::UnexpectedCharacter, 2, 5),
        ]
    );
    assert!(tokenizer.diagnostics().error().is_none());
}

#[test]
fn validation_errors_from_a_higher_layer() {
    let mut tokenizer = Tokenizer::default();
    let mut source = StrSource::new("a,b,c\nd\n");
    let mut widths = Vec::new();
    for record in tokenizer.records(&mut source) {
        widths.push(record.unwrap().len());
    }

    // A schema check above the tokenizer reports through the same sink.
    let at = Position::at(2, 1);
    tokenizer
        .diagnostics_mut()
        .validation_error(DiagnosticCode::UnexpectedCharacter, at);
    tokenizer
        .diagnostics_mut()
        .warn(DiagnosticCode::UnexpectedCharacter, Position::at(1, 6));

    assert_eq!(widths, [3, 1]);
    insta::assert_snapshot!(tokenizer.diagnostics().describe(), @r"
    Warning(s):
    Line:1, Col:6: Unexpected character
    Validation Error(s):
    Line:2, Col:1: Unexpected character
    ");
}

#[test]
fn message_tables_can_be_swapped() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.set_messages(&DE_DE);
    let mut tokenizer = Tokenizer::with_parts(
        TokenizerOptions::default(),
        Position::new(),
        diagnostics,
    );
    let mut source = StrSource::new("\"x\"y");
    assert_eq!(tokenizer.next_token(&mut source).unwrap(), "xy");

    let (position, diagnostics) = tokenizer.into_parts();
    assert_eq!(position, Position::at(1, 5));
    assert_eq!(diagnostics.messages().language, "de-DE");
    assert_eq!(
        diagnostics.display().to_string(),
        "Warning(s):\nLine:1, Col:4: Unerwartetes Zeichen"
    );
}

#[test]
fn reset_keeps_the_message_table() {
    let mut tokenizer = Tokenizer::default();
    tokenizer.diagnostics_mut().set_messages(&DE_DE);
    let _ = tokenizer.next_token(&mut StrSource::new("\"x\"y"));
    assert!(!tokenizer.diagnostics().is_empty());

    tokenizer.reset();
    assert!(tokenizer.diagnostics().is_empty());
    assert_eq!(tokenizer.diagnostics().describe(), "");
    assert_eq!(tokenizer.diagnostics().messages().language, "de-DE");
}
