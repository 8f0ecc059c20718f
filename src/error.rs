/// Why a source line could not be assembled.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("addressable line before ORG")]
    MissingOrigin,
    #[error("ORG may appear only once")]
    MultipleOrigins,
    #[error("symbol `{0}` is already defined")]
    DuplicateSymbol(String),
    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
    #[error("`{0}` takes no operand")]
    UnexpectedOperand(String),
    #[error("undefined symbol `{0}`")]
    UndefinedSymbol(String),
    #[error("literal `{0}` does not fit in 16 bits")]
    NumericOverflow(String),
    #[error("address {0:#05x} does not fit in 12 bits")]
    AddressOutOfRange(u32),
    #[error("malformed operand: {0}")]
    MalformedOperand(String),
    #[error("label without an instruction or data directive")]
    MissingStatement,
    #[error("labels are not allowed on ORG or END")]
    LabelOnDirective,
    #[error("program has no END directive")]
    MissingEnd,
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("pass 1 laid out {pass1} words but pass 2 emitted {pass2}")]
    PassMismatch { pass1: usize, pass2: usize },
}

/// An assembly failure pinned to its 1-based source line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    pub line: usize,
    pub kind: ErrorKind,
}

impl AsmError {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        Self { line, kind }
    }
}
