pub mod image;
pub mod render;

// Re-export commonly used helpers for consumers (tests, other front ends)
pub use image::{load_config, load_words, parse_u16, words_from_le_bytes};
pub use render::{disasm_line, hex_dump, listing, machine_code, symbol_table};
