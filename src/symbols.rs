use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembler::AsmConfig;
use crate::error::{AsmError, ErrorKind};
use crate::source::{hex_digits, Directive, SourceLine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub address: u16,
}

/// Label addresses in definition order, indexed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` and leaves the table untouched if `name` exists.
    fn insert(&mut self, name: &str, address: u16) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(name.to_string(), self.symbols.len());
        self.symbols.push(Symbol {
            name: name.to_string(),
            address,
        });
        true
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.index.get(name).map(|&i| self.symbols[i].address)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Everything pass 1 learns about a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub origin: u16,
    pub word_count: usize,
    pub symbols: SymbolTable,
}

/// Pass 1: walk the lines up to `END`, assigning each label the address of
/// the word it decorates.
pub fn build_symbols(lines: &[SourceLine], cfg: &AsmConfig) -> Result<Layout, AsmError> {
    let top = cfg.last_address();
    let mut origin: Option<u16> = None;
    let mut lc: u32 = 0;
    let mut word_count = 0usize;
    let mut symbols = SymbolTable::new();
    let mut ended = false;
    let mut last_line = 0;

    for line in lines {
        let err = |kind| AsmError::new(line.line, kind);
        last_line = line.line;

        match line.directive {
            Some(Directive::End) => {
                if line.label.is_some() {
                    return Err(err(ErrorKind::LabelOnDirective));
                }
                ended = true;
                break;
            }
            Some(Directive::Org) => {
                if line.label.is_some() {
                    return Err(err(ErrorKind::LabelOnDirective));
                }
                if origin.is_some() {
                    return Err(err(ErrorKind::MultipleOrigins));
                }
                let value = parse_origin(line, top)?;
                debug!(line = line.line, origin = value, "origin set");
                origin = Some(value);
                lc = u32::from(value);
                continue;
            }
            _ => {}
        }

        if !line.is_addressable() {
            return Err(err(ErrorKind::MissingStatement));
        }
        if origin.is_none() {
            return Err(err(ErrorKind::MissingOrigin));
        }
        if lc > u32::from(top) {
            return Err(err(ErrorKind::AddressOutOfRange(lc)));
        }
        if let Some(name) = &line.label {
            // lc <= top <= ADDRESS_MASK, so the narrowing is lossless
            let address = lc as u16;
            if !symbols.insert(name, address) {
                return Err(err(ErrorKind::DuplicateSymbol(name.clone())));
            }
            debug!(symbol = %name, address, "symbol defined");
        }
        lc += 1;
        word_count += 1;
    }

    let origin = origin.ok_or_else(|| AsmError::new(last_line, ErrorKind::MissingOrigin))?;
    if cfg.require_end && !ended {
        return Err(AsmError::new(last_line, ErrorKind::MissingEnd));
    }

    Ok(Layout {
        origin,
        word_count,
        symbols,
    })
}

/// `ORG` operands are hexadecimal, e.g. `ORG 100` starts at 0x100.
fn parse_origin(line: &SourceLine, top: u16) -> Result<u16, AsmError> {
    let err = |kind| AsmError::new(line.line, kind);
    let op = line
        .operand
        .as_deref()
        .ok_or_else(|| err(ErrorKind::MalformedOperand("ORG requires an address".into())))?;
    let bad = || err(ErrorKind::MalformedOperand(format!("bad ORG address `{op}`")));
    let digits = hex_digits(op).ok_or_else(bad)?;
    let value = u32::from_str_radix(digits, 16).map_err(|_| bad())?;
    if value > u32::from(top) {
        return Err(err(ErrorKind::AddressOutOfRange(value)));
    }
    Ok(value as u16)
}
