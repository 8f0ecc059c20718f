use anyhow::{Context, Result};
use std::path::Path;

use mano_asm::source::hex_digits;
use mano_asm::AsmConfig;

/// Hex with optional `0x` prefix, the way addresses are written in source.
pub fn parse_u16(s: &str) -> Result<u16> {
    let s = s.trim();
    let digits = hex_digits(s).with_context(|| format!("bad hex value `{s}`"))?;
    Ok(u16::from_str_radix(digits, 16).with_context(|| format!("bad hex value `{s}`"))?)
}

pub fn words_from_le_bytes(bytes: &[u8]) -> Result<Vec<u16>> {
    anyhow::ensure!(bytes.len() % 2 == 0, "image has an odd number of bytes ({})", bytes.len());
    Ok(bytes
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect())
}

/// Load a raw little-endian word image as written by `assemble --format bin`.
pub fn load_words(path: &Path) -> Result<Vec<u16>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    words_from_le_bytes(&bytes)
}

/// Read an `AsmConfig` from JSON; missing fields keep their defaults.
pub fn load_config(path: Option<&Path>) -> Result<AsmConfig> {
    let Some(path) = path else { return Ok(AsmConfig::default()) };
    let txt = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&txt).with_context(|| format!("parsing config {}", path.display()))
}
