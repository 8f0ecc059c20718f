//! Source line records and the tokenizer that produces them.
//!
//! The assembler passes only ever see [`SourceLine`]s; raw text is split
//! here into an optional `LABEL,` prefix, a mnemonic or directive and the
//! remaining operand text.

use serde::{Deserialize, Serialize};

use crate::error::{AsmError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    Org,
    End,
    Dec,
    Hex,
}

impl Directive {
    pub fn from_token(tok: &str) -> Option<Self> {
        match tok {
            "ORG" => Some(Directive::Org),
            "END" => Some(Directive::End),
            "DEC" => Some(Directive::Dec),
            "HEX" => Some(Directive::Hex),
            _ => None,
        }
    }

    /// `DEC` and `HEX` occupy a memory word; `ORG` and `END` do not.
    pub fn is_addressable(self) -> bool {
        matches!(self, Directive::Dec | Directive::Hex)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    pub line: usize, // 1-based, for diagnostics
    pub label: Option<String>,
    pub mnemonic: Option<String>,
    pub operand: Option<String>,
    pub directive: Option<Directive>,
}

impl SourceLine {
    pub fn instruction(line: usize, mnemonic: &str, operand: Option<&str>) -> Self {
        Self {
            line,
            mnemonic: Some(mnemonic.to_string()),
            operand: operand.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn directive(line: usize, directive: Directive, operand: Option<&str>) -> Self {
        Self {
            line,
            directive: Some(directive),
            operand: operand.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// True when the line occupies one word of memory.
    pub fn is_addressable(&self) -> bool {
        match self.directive {
            Some(d) => d.is_addressable(),
            None => self.mnemonic.is_some(),
        }
    }
}

/// Digits of a hexadecimal literal with any `0x`/`0X` prefix removed.
///
/// `None` for an empty literal or one carrying a sign, which
/// `from_str_radix` would otherwise accept.
pub fn hex_digits(lit: &str) -> Option<&str> {
    let digits = lit
        .strip_prefix("0x")
        .or_else(|| lit.strip_prefix("0X"))
        .unwrap_or(lit);
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    Some(digits)
}

/// Tokenize one line of source text. Blank and comment-only lines yield `None`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<SourceLine>, AsmError> {
    let syntax = |msg: String| AsmError::new(line, ErrorKind::Syntax(msg));

    let mut s = text;
    if let Some(p) = s.find('/') {
        s = &s[..p];
    }
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let (label, rest) = match s.split_once(',') {
        Some((name, rest)) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(syntax("empty label".into()));
            }
            if name.contains(char::is_whitespace) {
                return Err(syntax(format!("label `{name}` contains whitespace")));
            }
            (Some(name.to_string()), rest.trim())
        }
        None => (None, s),
    };
    if rest.contains(',') {
        return Err(syntax("more than one `,` on a line".into()));
    }

    let mut words = rest.split_whitespace();
    let head = words.next();
    let operand = words.collect::<Vec<_>>().join(" ");

    let mut out = SourceLine {
        line,
        label,
        operand: (!operand.is_empty()).then_some(operand),
        ..SourceLine::default()
    };
    if let Some(tok) = head {
        match Directive::from_token(tok) {
            Some(d) => out.directive = Some(d),
            None => out.mnemonic = Some(tok.to_string()),
        }
    }
    Ok(Some(out))
}

/// Tokenize a whole program, numbering lines from 1.
pub fn parse_source(text: &str) -> Result<Vec<SourceLine>, AsmError> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(line) = parse_line(idx + 1, raw)? {
            lines.push(line);
        }
    }
    Ok(lines)
}
