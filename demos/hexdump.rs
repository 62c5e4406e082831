//! Lists the sections of a hex memory file and optionally rewrites it.
//!
//! ```text
//! cargo run --example hexdump -- firmware.hex
//! cargo run --example hexdump -- firmware.hex --bytes 0 --convert out.hex --to standard
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use strum::IntoEnumIterator;
use verihex::prelude::*;

/// Inspect and convert Verilog hex memory files
#[derive(Debug, Parser)]
#[command(name = "hexdump", version, about, long_about = None)]
struct Cli {
    /// Path to the hex memory file.
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Dialect of the input: per-line or standard.
    #[arg(long, default_value = "per-line", value_parser = parse_dialect)]
    dialect: Dialect,

    /// Print the first N bytes of every section.
    #[arg(long, value_name = "N")]
    bytes: Option<usize>,

    /// Write the sections to a new file.
    #[arg(long, value_name = "OUT")]
    convert: Option<PathBuf>,

    /// Dialect of the converted output.
    #[arg(long, default_value = "per-line", value_parser = parse_dialect)]
    to: Dialect,

    /// Data bytes per output line.
    #[arg(long, default_value_t = 16)]
    bytes_per_line: usize,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_dialect(name: &str) -> std::result::Result<Dialect, String> {
    Dialect::iter()
        .find(|dialect| dialect.to_string() == name)
        .ok_or_else(|| {
            let known: Vec<String> = Dialect::iter().map(|d| d.to_string()).collect();
            format!("unknown dialect '{}', expected one of: {}", name, known.join(", "))
        })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_module("verihex", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let config = Config::default().with_dialect(cli.dialect);
    let file = VerilogFile::from_file_with_config(&cli.path, config)
        .with_context(|| format!("failed to open {}", cli.path.display()))?;

    println!(
        "{}: {} bytes, {} sections ({})",
        cli.path.display(),
        file.len(),
        file.sections().len(),
        cli.dialect
    );
    for (index, section) in file.sections().iter().enumerate() {
        println!(
            "  {:<8} 0x{:016X}  {:>8} bytes  offset {}",
            section.name, section.vma, section.size, section.filepos
        );

        if let Some(count) = cli.bytes {
            let contents = file.section_contents(index)?;
            let shown = &contents[..count.min(contents.len())];
            let hex: Vec<String> = shown.iter().map(|byte| format!("{:02X}", byte)).collect();
            println!("           {}", hex.join(" "));
        }
    }

    if let Some(out) = &cli.convert {
        let config = Config::default()
            .with_dialect(cli.to)
            .with_bytes_per_line(cli.bytes_per_line);
        let mut writer = VerilogWriter::new(config)?;

        for (index, section) in file.sections().iter().enumerate() {
            let target = writer.make_section(
                section.name.clone(),
                section.flags,
                section.lma,
                section.size,
            );
            writer.set_section_contents(target, 0, file.section_contents(index)?)?;
        }

        if writer.records().is_empty() && !file.sections().is_empty() {
            bail!("no loadable sections to write");
        }
        writer
            .save(out)
            .with_context(|| format!("failed to write {}", out.display()))?;
        log::info!("Wrote {} records to {}", writer.records().len(), out.display());
    }

    Ok(())
}
