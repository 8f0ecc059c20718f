//! Text renderings of an assembled program. The core library never formats
//! output itself; everything human-readable lives here.

use std::fmt::Write as _;

use mano_asm::decode::{decode, Decoded};
use mano_asm::Program;

/// `NAME: ADDR` per symbol, address in hex, definition order.
pub fn symbol_table(program: &Program) -> String {
    let mut buf = String::from("Symbol Table:\n");
    for sym in program.symbols().iter() {
        let _ = writeln!(buf, "{}: {:X}", sym.name, sym.address);
    }
    buf
}

/// `ADDR: 16-bit binary` per word.
pub fn machine_code(program: &Program) -> String {
    let mut buf = String::from("Machine Code:\n");
    for w in program.words() {
        let _ = writeln!(buf, "{:X}: {:016b}", w.address, w.value);
    }
    buf
}

/// Symbol table followed by the machine code, separated by a blank line.
pub fn listing(program: &Program) -> String {
    format!("{}\n{}", symbol_table(program), machine_code(program))
}

pub fn hex_dump(program: &Program) -> String {
    let mut buf = String::new();
    for w in program.words() {
        let _ = writeln!(buf, "{:03X}: {:04X}", w.address, w.value);
    }
    buf
}

pub fn disasm_line(address: u16, word: u16) -> String {
    let text = match decode(word) {
        Decoded::Memory {
            mnemonic,
            indirect,
            address: target,
        } => {
            if indirect {
                format!("{mnemonic} I {target:03X}")
            } else {
                format!("{mnemonic} {target:03X}")
            }
        }
        d @ (Decoded::Register(_) | Decoded::Io(_)) => d.mnemonics().join(" "),
        Decoded::Unknown(raw) => format!("HEX {raw:04X}"),
    };
    format!("{address:03X}: {word:04X}  {text}")
}
