pub mod assembler;
pub mod decode;
pub mod encoder;
pub mod error;
pub mod isa;
pub mod source;
pub mod symbols;

pub use assembler::{assemble, assemble_str, AsmConfig, Assembler, MemoryWord, Program};
pub use error::{AsmError, ErrorKind};
pub use isa::{lookup, Category, InstructionSpec};
pub use source::{Directive, SourceLine};
pub use symbols::{Layout, Symbol, SymbolTable};

/// Operand addresses are 12 bits wide; memory holds 4096 words.
pub const ADDRESS_MASK: u16 = 0x0FFF;
