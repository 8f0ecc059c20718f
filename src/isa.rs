use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Bit 15 of a memory-reference word selects indirect addressing.
pub const INDIRECT_BIT: u16 = 0x8000;
/// Prefix nibble shared by all register-reference words.
pub const REGISTER_PREFIX: u16 = 0x7000;
/// Prefix nibble shared by all I/O words.
pub const IO_PREFIX: u16 = 0xF000;
/// The opcode field value reserved for register-reference and I/O words.
pub const NON_MEMORY_OPCODE: u16 = 0b111;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    MemoryReference,
    RegisterReference,
    Io,
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterOps: u16 {
const CLA = 1 << 11; // Clear AC
const CLE = 1 << 10; // Clear E
const CMA = 1 << 9;  // Complement AC
const CME = 1 << 8;  // Complement E
const CIR = 1 << 7;  // Circulate right
const CIL = 1 << 6;  // Circulate left
const INC = 1 << 5;
const SPA = 1 << 4;  // Skip if AC positive
const SNA = 1 << 3;  // Skip if AC negative
const SZA = 1 << 2;  // Skip if AC zero
const SZE = 1 << 1;  // Skip if E zero
const HLT = 1 << 0;
}
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoOps: u16 {
const INP = 1 << 11;
const OUT = 1 << 10;
const SKI = 1 << 9; // Skip on input flag
const SKO = 1 << 8; // Skip on output flag
const ION = 1 << 7;
const IOF = 1 << 6;
}
}

/// Encoding descriptor for one mnemonic.
///
/// `code` is the 3-bit opcode for memory-reference instructions and the
/// complete 16-bit word for register-reference and I/O instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstructionSpec {
    pub mnemonic: &'static str,
    pub category: Category,
    pub code: u16,
}

const fn mri(mnemonic: &'static str, opcode: u16) -> InstructionSpec {
    InstructionSpec {
        mnemonic,
        category: Category::MemoryReference,
        code: opcode,
    }
}

const fn rri(mnemonic: &'static str, op: RegisterOps) -> InstructionSpec {
    InstructionSpec {
        mnemonic,
        category: Category::RegisterReference,
        code: REGISTER_PREFIX | op.bits(),
    }
}

const fn io(mnemonic: &'static str, op: IoOps) -> InstructionSpec {
    InstructionSpec {
        mnemonic,
        category: Category::Io,
        code: IO_PREFIX | op.bits(),
    }
}

pub const TABLE: &[InstructionSpec] = &[
    mri("AND", 0),
    mri("ADD", 1),
    mri("LDA", 2),
    mri("STA", 3),
    mri("BUN", 4),
    mri("BSA", 5),
    mri("ISZ", 6),
    rri("CLA", RegisterOps::CLA),
    rri("CLE", RegisterOps::CLE),
    rri("CMA", RegisterOps::CMA),
    rri("CME", RegisterOps::CME),
    rri("CIR", RegisterOps::CIR),
    rri("CIL", RegisterOps::CIL),
    rri("INC", RegisterOps::INC),
    rri("SPA", RegisterOps::SPA),
    rri("SNA", RegisterOps::SNA),
    rri("SZA", RegisterOps::SZA),
    rri("SZE", RegisterOps::SZE),
    rri("HLT", RegisterOps::HLT),
    io("INP", IoOps::INP),
    io("OUT", IoOps::OUT),
    io("SKI", IoOps::SKI),
    io("SKO", IoOps::SKO),
    io("ION", IoOps::ION),
    io("IOF", IoOps::IOF),
];

/// Exact, case-sensitive mnemonic lookup.
pub fn lookup(mnemonic: &str) -> Option<&'static InstructionSpec> {
    TABLE.iter().find(|spec| spec.mnemonic == mnemonic)
}

/// Memory-reference descriptor for a 3-bit opcode, if one is defined.
pub fn memory_by_opcode(opcode: u16) -> Option<&'static InstructionSpec> {
    TABLE
        .iter()
        .find(|spec| spec.category == Category::MemoryReference && spec.code == opcode)
}
