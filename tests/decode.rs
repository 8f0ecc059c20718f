use mano_asm::decode::{decode, Decoded};
use mano_asm::isa::{Category, IoOps, RegisterOps, TABLE};
use mano_asm::assemble_str;

#[test]
fn decode_inverts_every_table_entry() {
    for spec in TABLE {
        let src = match spec.category {
            Category::MemoryReference => format!("ORG 0\n{} I T\nT, HEX 0\n", spec.mnemonic),
            _ => format!("ORG 0\n{}\n", spec.mnemonic),
        };
        let program = assemble_str(&src).unwrap();
        let word = program.word_at(0).unwrap();
        assert_eq!(decode(word).mnemonics(), vec![spec.mnemonic], "{word:#06x}");
    }
}

#[test]
fn memory_reference_fields() {
    assert_eq!(
        decode(0xA101),
        Decoded::Memory {
            mnemonic: "LDA",
            indirect: true,
            address: 0x101
        }
    );
    assert_eq!(
        decode(0x6FFF),
        Decoded::Memory {
            mnemonic: "ISZ",
            indirect: false,
            address: 0xFFF
        }
    );
}

#[test]
fn combined_and_undefined_operations() {
    assert_eq!(decode(0x7C00), Decoded::Register(RegisterOps::CLA | RegisterOps::CLE));
    assert_eq!(decode(0xF0C0), Decoded::Io(IoOps::ION | IoOps::IOF));
    assert_eq!(decode(0x7000), Decoded::Unknown(0x7000));
    assert_eq!(decode(0xF000), Decoded::Unknown(0xF000));
    assert_eq!(decode(0xF801), Decoded::Unknown(0xF801));
    assert!(decode(0xF801).mnemonics().is_empty());
}
