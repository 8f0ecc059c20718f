use serde::Serialize;

use crate::isa::{memory_by_opcode, IoOps, RegisterOps, INDIRECT_BIT, NON_MEMORY_OPCODE};
use crate::ADDRESS_MASK;

/// A 16-bit word split back into its instruction fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decoded {
    Memory {
        mnemonic: &'static str,
        indirect: bool,
        address: u16,
    },
    Register(RegisterOps),
    Io(IoOps),
    /// No defined operation; typically a data word.
    Unknown(u16),
}

pub fn decode(word: u16) -> Decoded {
    let opcode = (word >> 12) & 0b111;
    let indirect = word & INDIRECT_BIT != 0;
    let low = word & ADDRESS_MASK;

    if opcode != NON_MEMORY_OPCODE {
        return match memory_by_opcode(opcode) {
            Some(spec) => Decoded::Memory {
                mnemonic: spec.mnemonic,
                indirect,
                address: low,
            },
            None => Decoded::Unknown(word),
        };
    }

    // opcode 7: bit 15 selects I/O over register-reference
    if indirect {
        match IoOps::from_bits(low) {
            Some(ops) if !ops.is_empty() => Decoded::Io(ops),
            _ => Decoded::Unknown(word),
        }
    } else {
        match RegisterOps::from_bits(low) {
            Some(ops) if !ops.is_empty() => Decoded::Register(ops),
            _ => Decoded::Unknown(word),
        }
    }
}

impl Decoded {
    /// Names of the operation(s) the word performs, highest bit first.
    pub fn mnemonics(&self) -> Vec<&'static str> {
        match self {
            Decoded::Memory { mnemonic, .. } => vec![*mnemonic],
            Decoded::Register(ops) => ops.iter_names().map(|(name, _)| name).collect(),
            Decoded::Io(ops) => ops.iter_names().map(|(name, _)| name).collect(),
            Decoded::Unknown(_) => Vec::new(),
        }
    }
}
