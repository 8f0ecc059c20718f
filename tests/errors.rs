use mano_asm::{assemble, assemble_str, AsmError, Directive, ErrorKind, SourceLine};

fn kind_of(src: &str) -> (usize, ErrorKind) {
    let err = assemble_str(src).unwrap_err();
    (err.line, err.kind)
}

#[test]
fn undefined_symbol_aborts() {
    assert_eq!(
        kind_of("ORG 0\nSTA UNDEFINED\nEND\n"),
        (2, ErrorKind::UndefinedSymbol("UNDEFINED".into()))
    );
}

#[test]
fn symbol_defined_after_end_is_undefined() {
    assert_eq!(
        kind_of("ORG 0\nLDA LATE\nEND\nLATE, DEC 1\n"),
        (2, ErrorKind::UndefinedSymbol("LATE".into()))
    );
}

#[test]
fn duplicate_label_reported_on_second_definition() {
    assert_eq!(
        kind_of("ORG 0\nX, DEC 1\nCLA\nX, DEC 2\n"),
        (4, ErrorKind::DuplicateSymbol("X".into()))
    );
}

#[test]
fn labels_are_case_sensitive() {
    let program = assemble_str("ORG 0\nx, DEC 1\nX, DEC 2\n").unwrap();
    assert_eq!(program.symbols().len(), 2);
}

#[test]
fn origin_is_mandatory() {
    assert_eq!(kind_of("CLA\nEND\n"), (1, ErrorKind::MissingOrigin));
    assert_eq!(kind_of("X, DEC 1\nORG 10\n"), (1, ErrorKind::MissingOrigin));
    assert_eq!(kind_of("END\n"), (1, ErrorKind::MissingOrigin));
    let err = assemble(&[]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingOrigin);
}

#[test]
fn second_origin_rejected() {
    assert_eq!(kind_of("ORG 0\nCLA\nORG 10\nHLT\n"), (3, ErrorKind::MultipleOrigins));
    assert_eq!(kind_of("ORG 0\nORG 0\n"), (2, ErrorKind::MultipleOrigins));
}

#[test]
fn unknown_mnemonic() {
    assert_eq!(kind_of("ORG 0\nLDX A\nA, HLT\n"), (2, ErrorKind::UnknownMnemonic("LDX".into())));
    // mnemonics are matched exactly, never by prefix or case-folding
    assert_eq!(kind_of("ORG 0\nlda A\nA, HLT\n"), (2, ErrorKind::UnknownMnemonic("lda".into())));
    assert_eq!(kind_of("ORG 0\nHLTX\n"), (2, ErrorKind::UnknownMnemonic("HLTX".into())));
}

#[test]
fn operands_on_register_and_io_instructions() {
    assert_eq!(kind_of("ORG 0\nCLA A\nA, HLT\n"), (2, ErrorKind::UnexpectedOperand("CLA".into())));
    assert_eq!(kind_of("ORG 0\nOUT 5\n"), (2, ErrorKind::UnexpectedOperand("OUT".into())));
    assert!(matches!(kind_of("ORG 0\nINP I A\nA, HLT\n"), (2, ErrorKind::MalformedOperand(_))));
}

#[test]
fn memory_reference_operand_shapes() {
    assert!(matches!(kind_of("ORG 0\nLDA\n"), (2, ErrorKind::MalformedOperand(_))));
    assert!(matches!(kind_of("ORG 0\nLDA X Y\nX, HLT\n"), (2, ErrorKind::MalformedOperand(_))));
    assert!(matches!(kind_of("ORG 0\nLDA I X Y\nX, HLT\n"), (2, ErrorKind::MalformedOperand(_))));
}

#[test]
fn literal_ranges() {
    assert_eq!(kind_of("ORG 0\nDEC 40000\n"), (2, ErrorKind::NumericOverflow("40000".into())));
    assert_eq!(kind_of("ORG 0\nDEC -32769\n"), (2, ErrorKind::NumericOverflow("-32769".into())));
    assert_eq!(kind_of("ORG 0\nHEX 1FFFF\n"), (2, ErrorKind::NumericOverflow("1FFFF".into())));
    assert!(matches!(kind_of("ORG 0\nDEC five\n"), (2, ErrorKind::MalformedOperand(_))));
    assert!(matches!(kind_of("ORG 0\nHEX\n"), (2, ErrorKind::MalformedOperand(_))));
    assert!(matches!(kind_of("ORG\n"), (1, ErrorKind::MalformedOperand(_))));
}

#[test]
fn addresses_past_memory() {
    assert_eq!(kind_of("ORG 1000\n"), (1, ErrorKind::AddressOutOfRange(0x1000)));
    assert_eq!(
        kind_of("ORG FFE\nCLA\nCLA\nCLA\n"),
        (4, ErrorKind::AddressOutOfRange(0x1000))
    );
}

#[test]
fn structural_errors() {
    assert_eq!(kind_of("ORG 0\nX,\n"), (2, ErrorKind::MissingStatement));
    assert_eq!(kind_of("S, ORG 0\n"), (1, ErrorKind::LabelOnDirective));
    assert_eq!(kind_of("ORG 0\nE, END\n"), (2, ErrorKind::LabelOnDirective));
    assert!(matches!(kind_of("ORG 0\n, CLA\n"), (2, ErrorKind::Syntax(_))));
}

#[test]
fn first_error_wins() {
    // Pass 1 errors surface before any pass 2 error on an earlier line
    assert_eq!(
        kind_of("ORG 0\nLDA NOWHERE\nX, HLT\nX, HLT\n"),
        (4, ErrorKind::DuplicateSymbol("X".into()))
    );
}

#[test]
fn error_display_names_the_line() {
    let err = AsmError::new(7, ErrorKind::UndefinedSymbol("FOO".into()));
    assert_eq!(err.to_string(), "line 7: undefined symbol `FOO`");
    let err = AsmError::new(3, ErrorKind::AddressOutOfRange(0x1000));
    assert_eq!(err.to_string(), "line 3: address 0x1000 does not fit in 12 bits");
}

#[test]
fn records_without_statement_are_rejected() {
    let lines = vec![
        SourceLine::directive(1, Directive::Org, Some("0")),
        SourceLine {
            line: 2,
            label: Some("L".into()),
            ..SourceLine::default()
        },
    ];
    assert_eq!(assemble(&lines).unwrap_err(), AsmError::new(2, ErrorKind::MissingStatement));
}
