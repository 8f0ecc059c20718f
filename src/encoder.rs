use std::num::IntErrorKind;

use tracing::debug;

use crate::assembler::MemoryWord;
use crate::error::{AsmError, ErrorKind};
use crate::isa::{self, Category, INDIRECT_BIT};
use crate::source::{hex_digits, Directive, SourceLine};
use crate::symbols::{Layout, SymbolTable};
use crate::ADDRESS_MASK;

/// Pass 2: encode every addressable line up to `END` against the frozen
/// pass 1 layout.
pub fn encode(lines: &[SourceLine], layout: &Layout) -> Result<Vec<MemoryWord>, AsmError> {
    let mut words = Vec::with_capacity(layout.word_count);
    let mut lc = u32::from(layout.origin);
    let mut last_line = 0;

    for line in lines {
        last_line = line.line;
        match line.directive {
            Some(Directive::End) => break,
            Some(Directive::Org) => continue,
            _ => {}
        }
        if lc > u32::from(ADDRESS_MASK) {
            return Err(AsmError::new(line.line, ErrorKind::AddressOutOfRange(lc)));
        }
        let value = encode_line(line, &layout.symbols)?;
        let address = lc as u16;
        debug!(line = line.line, address, value, "word emitted");
        words.push(MemoryWord { address, value });
        lc += 1;
    }

    if words.len() != layout.word_count {
        return Err(AsmError::new(
            last_line,
            ErrorKind::PassMismatch {
                pass1: layout.word_count,
                pass2: words.len(),
            },
        ));
    }
    Ok(words)
}

/// Encode one addressable line (`DEC`, `HEX` or an instruction).
pub fn encode_line(line: &SourceLine, symbols: &SymbolTable) -> Result<u16, AsmError> {
    let err = |kind| AsmError::new(line.line, kind);
    let operand = line.operand.as_deref();

    match line.directive {
        Some(Directive::Dec) => {
            let lit = required(operand, "DEC").map_err(err)?;
            return parse_dec(lit).map_err(err);
        }
        Some(Directive::Hex) => {
            let lit = required(operand, "HEX").map_err(err)?;
            return parse_hex(lit).map_err(err);
        }
        Some(Directive::Org) | Some(Directive::End) => {
            return Err(err(ErrorKind::Syntax("directive does not emit a word".into())))
        }
        None => {}
    }

    let Some(mnemonic) = line.mnemonic.as_deref() else {
        return Err(err(ErrorKind::MissingStatement));
    };
    let spec = isa::lookup(mnemonic)
        .ok_or_else(|| err(ErrorKind::UnknownMnemonic(mnemonic.to_string())))?;

    match spec.category {
        Category::MemoryReference => {
            let operand = required(operand, mnemonic).map_err(err)?;
            let (indirect, name) = split_operand(operand).ok_or_else(|| {
                err(ErrorKind::MalformedOperand(format!(
                    "expected `SYMBOL` or `I SYMBOL`, found `{operand}`"
                )))
            })?;
            let address = symbols
                .get(name)
                .ok_or_else(|| err(ErrorKind::UndefinedSymbol(name.to_string())))?;
            if address > ADDRESS_MASK {
                return Err(err(ErrorKind::AddressOutOfRange(u32::from(address))));
            }
            Ok(memory_word(spec.code, indirect, address))
        }
        Category::RegisterReference | Category::Io => match operand {
            None => Ok(spec.code),
            Some(op) if matches!(split_operand(op), Some((true, _))) => Err(err(
                ErrorKind::MalformedOperand(format!("`{mnemonic}` cannot be indirect")),
            )),
            Some(_) => Err(err(ErrorKind::UnexpectedOperand(mnemonic.to_string()))),
        },
    }
}

/// `I` bit, 3-bit opcode, 12-bit address.
pub fn memory_word(opcode: u16, indirect: bool, address: u16) -> u16 {
    let i = if indirect { INDIRECT_BIT } else { 0 };
    i | ((opcode & 0b111) << 12) | (address & ADDRESS_MASK)
}

/// Splits `SYM` or `I SYM` into (indirect, symbol). A lone `I` is a symbol.
fn split_operand(op: &str) -> Option<(bool, &str)> {
    let mut toks = op.split_whitespace();
    match (toks.next(), toks.next(), toks.next()) {
        (Some(sym), None, None) => Some((false, sym)),
        (Some("I"), Some(sym), None) => Some((true, sym)),
        _ => None,
    }
}

fn required<'a>(operand: Option<&'a str>, what: &str) -> Result<&'a str, ErrorKind> {
    operand.ok_or_else(|| ErrorKind::MalformedOperand(format!("`{what}` requires an operand")))
}

/// Signed decimal, stored as 16-bit two's complement.
fn parse_dec(lit: &str) -> Result<u16, ErrorKind> {
    match lit.parse::<i16>() {
        Ok(v) => Ok(v as u16),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(ErrorKind::NumericOverflow(lit.to_string()))
            }
            _ => Err(ErrorKind::MalformedOperand(format!(
                "`{lit}` is not a decimal literal"
            ))),
        },
    }
}

/// Unsigned hexadecimal, an optional `0x` prefix is accepted.
fn parse_hex(lit: &str) -> Result<u16, ErrorKind> {
    let malformed = || ErrorKind::MalformedOperand(format!("`{lit}` is not a hex literal"));
    let digits = hex_digits(lit).ok_or_else(malformed)?;
    match u16::from_str_radix(digits, 16) {
        Ok(v) => Ok(v),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Err(ErrorKind::NumericOverflow(lit.to_string())),
            _ => Err(malformed()),
        },
    }
}
