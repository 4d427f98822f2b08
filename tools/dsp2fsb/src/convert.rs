//! Convert command - rewrap DSP streams as FSB5 banks
//!
//! Each input is converted independently. A failing file is reported and
//! skipped; its output path is left untouched.

use anyhow::{Context, Result};
use clap::Args;
use dsp_fsb5::{BitFieldPolicy, Fsb5Config};
use std::path::{Path, PathBuf};

use crate::fs::{MAX_DSP_BYTES, read_source, write_atomic};
use crate::settings::Settings;

/// Arguments for the convert command
#[derive(Args)]
pub struct ConvertArgs {
    /// Input .dsp files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output .fsb file (single input only)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to dsp2fsb.toml settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stream name written to the bank's name table
    #[arg(short, long)]
    pub name: Option<String>,

    /// Reject values that overflow their packed bit fields
    #[arg(long)]
    pub strict: bool,
}

/// Execute the convert command
pub fn execute(args: ConvertArgs) -> Result<()> {
    if args.output.is_some() && args.inputs.len() > 1 {
        anyhow::bail!("--output can only be used with a single input");
    }

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut bank = settings.bank.clone();
    if let Some(name) = args.name {
        bank.stream_name = Some(name);
    }
    if args.strict {
        bank.bit_policy = BitFieldPolicy::Strict;
    }
    bank.validate().context("Invalid bank settings")?;

    let mut failed = 0usize;
    for input in &args.inputs {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| settings.output_path(input));

        tracing::info!("Converting {:?} -> {:?}", input, output);
        if let Err(e) = convert_file(input, &output, &bank) {
            tracing::error!("{:#}", e);
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!(
            "{} of {} file(s) failed to convert",
            failed,
            args.inputs.len()
        );
    }

    tracing::info!("Done!");
    Ok(())
}

/// Convert one DSP file to an FSB5 bank on disk
pub fn convert_file(input: &Path, output: &Path, bank: &Fsb5Config) -> Result<()> {
    let source = read_source(input, MAX_DSP_BYTES)?;

    let fsb = dsp_fsb5::convert_with(&source, bank)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    write_atomic(output, &fsb)?;
    tracing::debug!(
        "Wrote {} bytes ({} payload) to {:?}",
        fsb.len(),
        source.len().saturating_sub(dsp_fsb5::DspHeader::SIZE),
        output
    );
    Ok(())
}
