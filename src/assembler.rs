use serde::{Deserialize, Serialize};
use tracing::info;

use crate::encoder::encode;
use crate::error::AsmError;
use crate::source::{parse_source, SourceLine};
use crate::symbols::{build_symbols, SymbolTable};
use crate::ADDRESS_MASK;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    /// Reject programs that never reach an `END` directive.
    pub require_end: bool,
    /// Highest address a word may be placed at (clamped to 12 bits).
    pub top_address: u16,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            require_end: false,
            top_address: ADDRESS_MASK,
        }
    }
}

impl AsmConfig {
    pub fn last_address(&self) -> u16 {
        self.top_address.min(ADDRESS_MASK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryWord {
    pub address: u16,
    pub value: u16,
}

/// An assembled program: contiguous words starting at `origin` plus the
/// symbol table they were resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    origin: u16,
    words: Vec<MemoryWord>,
    symbols: SymbolTable,
}

impl Program {
    pub fn origin(&self) -> u16 {
        self.origin
    }

    pub fn words(&self) -> &[MemoryWord] {
        &self.words
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word_at(&self, address: u16) -> Option<u16> {
        let off = address.checked_sub(self.origin)?;
        self.words.get(off as usize).map(|w| w.value)
    }

    /// Raw memory image starting at `origin`, two little-endian bytes per word.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.value.to_le_bytes()).collect()
    }
}

/// Runs pass 1 to completion, then pass 2. Holds no per-program state, so
/// one instance can serve any number of independent assemblies.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    cfg: AsmConfig,
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &AsmConfig {
        &self.cfg
    }

    pub fn assemble(&self, lines: &[SourceLine]) -> Result<Program, AsmError> {
        let layout = build_symbols(lines, &self.cfg)?;
        info!(
            origin = layout.origin,
            words = layout.word_count,
            symbols = layout.symbols.len(),
            "pass 1 complete"
        );
        let words = encode(lines, &layout)?;
        info!(words = words.len(), "pass 2 complete");
        Ok(Program {
            origin: layout.origin,
            words,
            symbols: layout.symbols,
        })
    }
}

/// Assemble with the default configuration.
pub fn assemble(lines: &[SourceLine]) -> Result<Program, AsmError> {
    Assembler::default().assemble(lines)
}

/// Tokenize and assemble source text with the default configuration.
pub fn assemble_str(text: &str) -> Result<Program, AsmError> {
    let lines = parse_source(text)?;
    assemble(&lines)
}
