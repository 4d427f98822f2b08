//! Inspect command - print DSP or FSB5 header fields

use anyhow::{Context, Result};
use clap::Args;
use dsp_fsb5::{
    BinarySerializable, DspHeader, FSB5_MAGIC, Fsb5BankHeader, Fsb5Config, SampleMode,
    StreamDescriptor,
};
use std::path::PathBuf;

use crate::fs::{MAX_DSP_BYTES, read_source};

/// Arguments for the inspect command
#[derive(Args)]
pub struct InspectArgs {
    /// .dsp or .fsb file to inspect
    pub input: PathBuf,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs) -> Result<()> {
    let data = read_source(&args.input, MAX_DSP_BYTES)?;

    let result = if data.starts_with(FSB5_MAGIC) {
        print_fsb5(&data)
    } else {
        print_dsp(&data)
    };
    result.with_context(|| format!("Failed to inspect {}", args.input.display()))
}

/// Read a fixed-size header from the front of `data`
fn read_header<T: BinarySerializable>(data: &[u8]) -> Option<T> {
    data.get(..T::SIZE).and_then(T::deserialize)
}

fn print_dsp(data: &[u8]) -> Result<()> {
    let header: DspHeader = read_header(data).with_context(|| {
        format!(
            "DSP header is {} bytes (expected {})",
            data.len(),
            DspHeader::SIZE
        )
    })?;
    let descriptor = StreamDescriptor::from_dsp(&header, &Fsb5Config::default())?;

    println!("=== DSP Header ===");
    println!("Samples: {}", header.sample_count);
    println!("Nibbles: {}", header.nibble_count);
    println!("Sample rate: {} Hz", header.sample_rate);
    println!(
        "Loop: {} (start 0x{:08X}, end 0x{:08X})",
        if header.is_looped() { "yes" } else { "no" },
        header.loop_start_offset,
        header.loop_end_offset
    );
    println!("Format: 0x{:04X}", header.format);
    println!("Initial offset: 0x{:08X}", header.initial_offset);
    println!("Coefficients: {:?}", header.coefficients);
    println!("Gain: {}", header.gain);
    println!(
        "Initial state: ps=0x{:04X} hist=({}, {})",
        header.initial_predictor_scale, header.initial_history_1, header.initial_history_2
    );
    println!(
        "Loop state: ps=0x{:04X} hist=({}, {})",
        header.loop_predictor_scale, header.loop_history_1, header.loop_history_2
    );
    println!("Payload: {} bytes", data.len() - DspHeader::SIZE);
    println!();
    println!("FSB5 mode word: 0x{:016X}", descriptor.mode);

    Ok(())
}

fn print_fsb5(data: &[u8]) -> Result<()> {
    let bank: Fsb5BankHeader = read_header(data).context("Truncated FSB5 bank header")?;

    println!("=== FSB5 Bank ===");
    println!("Version: {}", bank.version);
    println!("Streams: {}", bank.stream_count);
    println!("Codec: {}", bank.codec);
    println!("Descriptor size: {} bytes", bank.descriptor_size);
    println!("Name table size: {} bytes", bank.name_table_size);
    println!("Payload: {} bytes", bank.payload_size);

    let names_at = Fsb5BankHeader::SIZE;
    let mode_at = names_at + bank.name_table_size as usize;
    if bank.name_table_size > 0 {
        let slot = data
            .get(names_at..mode_at)
            .context("Truncated FSB5 name table")?;
        let len = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
        println!("Name: {}", String::from_utf8_lossy(&slot[..len]));
    }

    let word = data
        .get(mode_at..mode_at + 8)
        .context("Truncated FSB5 stream descriptor")?;
    let word = u64::from_le_bytes(word.try_into()?);
    let mode = SampleMode::unpack(word);

    println!();
    println!("Mode word: 0x{:016X}", word);
    println!("  Samples: {}", mode.sample_count);
    println!("  Channel code: {}", mode.channel_code);
    println!("  Data offset: {}", mode.data_offset);
    println!("  Loop: {}", if mode.looped { "yes" } else { "no" });

    let actual_payload = data.len().saturating_sub(bank.payload_offset());
    if actual_payload != bank.payload_size as usize {
        tracing::warn!(
            "Declared payload is {} bytes but file holds {}",
            bank.payload_size,
            actual_payload
        );
    }

    Ok(())
}
