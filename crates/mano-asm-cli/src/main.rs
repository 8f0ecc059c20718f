use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use mano_asm::source::parse_source;
use mano_asm::{Assembler, Program};
use mano_asm_cli::{
    disasm_line, hex_dump, listing, load_config, load_words, parse_u16, symbol_table,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Two-pass assembler for the basic computer",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a source file
    Assemble {
        /// Input assembly file (one statement per line, `/` starts a comment)
        #[arg(value_name = "SRCFILE")]
        input: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout (required for `bin`)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
        #[command(flatten)]
        asm: AsmOpts,
    },
    /// Print only the resolved symbol table
    Symbols {
        #[arg(value_name = "SRCFILE")]
        input: PathBuf,
        #[command(flatten)]
        asm: AsmOpts,
    },
    /// Decode a raw little-endian word image back to mnemonics
    Disasm {
        #[arg(value_name = "BINFILE")]
        input: PathBuf,
        /// Address of the first word (hex)
        #[arg(long, default_value = "0")]
        origin: String,
    },
}

#[derive(clap::Args, Debug)]
struct AsmOpts {
    /// JSON assembler config ({ "require_end": bool, "top_address": u16 })
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Reject programs without an END directive
    #[arg(long)]
    require_end: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Hex,
    Json,
    Bin,
}

fn assemble_file(input: &Path, opts: &AsmOpts) -> Result<Program> {
    let mut cfg = load_config(opts.config.as_deref())?;
    cfg.require_end |= opts.require_end;

    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let lines = parse_source(&text)
        .with_context(|| format!("tokenizing {}", input.display()))?;
    tracing::debug!(lines = lines.len(), "tokenized {}", input.display());

    let asm = Assembler::new(cfg);
    tracing::info!(config = ?asm.config(), "assembling {}", input.display());
    asm.assemble(&lines)
        .with_context(|| format!("assembling {}", input.display()))
}

fn emit(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Assemble { input, format, out, asm } => {
            let program = assemble_file(&input, &asm)?;
            match format {
                OutputFormat::Text => emit(out.as_deref(), &listing(&program))?,
                OutputFormat::Hex => emit(out.as_deref(), &hex_dump(&program))?,
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&program)?;
                    emit(out.as_deref(), &format!("{json}\n"))?;
                }
                OutputFormat::Bin => {
                    let path = out.context("--format bin requires --out FILE")?;
                    std::fs::write(&path, program.to_le_bytes())
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!(
                        "wrote {} words at {:03X} to {}",
                        program.len(),
                        program.origin(),
                        path.display()
                    );
                }
            }
        }
        Command::Symbols { input, asm } => {
            let program = assemble_file(&input, &asm)?;
            print!("{}", symbol_table(&program));
        }
        Command::Disasm { input, origin } => {
            let origin = parse_u16(&origin)?;
            let words = load_words(&input)?;
            anyhow::ensure!(
                usize::from(origin) + words.len() <= 0x1000,
                "image of {} words does not fit at {origin:03X}",
                words.len()
            );
            for (i, &word) in words.iter().enumerate() {
                println!("{}", disasm_line(origin + i as u16, word));
            }
        }
    }

    Ok(())
}
