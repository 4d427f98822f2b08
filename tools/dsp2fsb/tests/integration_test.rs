//! Integration tests for dsp2fsb
//!
//! Tests the full pipeline: write a DSP file -> run the binary -> verify the bank

use dsp_fsb5::{DspHeader, Fsb5BankHeader};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

/// Write a DSP file with the given header fields and payload
fn write_dsp(path: &Path, sample_count: u32, sample_rate: u32, loop_flag: u16, payload: &[u8]) {
    let mut data = DspHeader::new(sample_count, sample_rate, loop_flag)
        .to_bytes()
        .to_vec();
    data.extend_from_slice(payload);
    std::fs::write(path, data).expect("Failed to write DSP file");
}

fn dsp2fsb(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dsp2fsb"))
        .args(args)
        .output()
        .expect("Failed to run dsp2fsb")
}

fn mode_word(fsb: &[u8], at: usize) -> u64 {
    u64::from_le_bytes(fsb[at..at + 8].try_into().unwrap())
}

/// Test DSP -> FSB5 with the default output path
#[test]
fn test_convert_default_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("title.dsp");
    write_dsp(&input, 1000, 44100, 0, &[0xAA; 16]);

    let out = dsp2fsb(&["convert", input.to_str().unwrap()]);
    assert!(out.status.success(), "convert failed: {:?}", out);

    let fsb = std::fs::read(dir.path().join("title.fsb")).expect("Failed to read bank");
    assert_eq!(&fsb[0..4], b"FSB5");

    let bank = Fsb5BankHeader::from_bytes(&fsb).unwrap();
    assert_eq!(bank.payload_size, 16);
    assert_eq!(&fsb[fsb.len() - 16..], &[0xAAu8; 16]);
    assert_eq!(
        mode_word(&fsb, Fsb5BankHeader::SIZE),
        (1000u64 << 34) | (1 << 5) | (44100 << 1)
    );
}

/// Test named stream with explicit output path
#[test]
fn test_convert_named_stream() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("loop.dsp");
    let output = dir.path().join("banks").join("loop.fsb");
    write_dsp(&input, 0x1000, 32000, 1, &[1, 2, 3, 4]);

    let out = dsp2fsb(&[
        "convert",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--name",
        "bgm_loop",
    ]);
    assert!(out.status.success(), "convert failed: {:?}", out);

    let fsb = std::fs::read(&output).expect("Failed to read bank");
    let bank = Fsb5BankHeader::from_bytes(&fsb).unwrap();
    assert_eq!(bank.name_table_size, 32);
    assert_eq!(&fsb[60..68], b"bgm_loop");
    assert_eq!(
        mode_word(&fsb, 60 + 32),
        (0x1000u64 << 34) | (1 << 5) | (32000 << 1) | 1
    );
    assert_eq!(&fsb[bank.payload_offset()..], &[1u8, 2, 3, 4]);
}

/// Test settings file with an output directory
#[test]
fn test_convert_with_settings() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("sfx.dsp");
    let settings = dir.path().join("dsp2fsb.toml");
    write_dsp(&input, 500, 22050, 0, &[0x11; 8]);
    std::fs::write(
        &settings,
        format!(
            "output_dir = {:?}\n\n[bank]\ndescriptor_size = 16\n",
            dir.path().join("out").to_str().unwrap()
        ),
    )
    .unwrap();

    let out = dsp2fsb(&[
        "convert",
        "--config",
        settings.to_str().unwrap(),
        input.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "convert failed: {:?}", out);

    let fsb = std::fs::read(dir.path().join("out").join("sfx.fsb")).expect("Failed to read bank");
    let bank = Fsb5BankHeader::from_bytes(&fsb).unwrap();
    assert_eq!(bank.descriptor_size, 16);
    assert_eq!(bank.payload_offset(), 60 + 16);
    assert_eq!(&fsb[76..], &[0x11u8; 8]);
}

/// Test a truncated DSP file fails without leaving output behind
#[test]
fn test_convert_short_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("broken.dsp");
    std::fs::write(&input, [0u8; 95]).unwrap();

    let out = dsp2fsb(&["convert", input.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("95 bytes"));
    assert!(!dir.path().join("broken.fsb").exists());
}

/// Test one bad file does not stop the rest of a batch
#[test]
fn test_convert_batch_partial_failure() {
    let dir = tempdir().expect("Failed to create temp dir");
    let good = dir.path().join("good.dsp");
    let bad = dir.path().join("bad.dsp");
    write_dsp(&good, 100, 32000, 0, &[0; 4]);
    std::fs::write(&bad, [0u8; 10]).unwrap();

    let out = dsp2fsb(&["convert", bad.to_str().unwrap(), good.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(dir.path().join("good.fsb").exists());
    assert!(!dir.path().join("bad.fsb").exists());
}

/// Test strict mode rejects a sample count wider than 30 bits
#[test]
fn test_convert_strict_overflow() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("huge.dsp");
    write_dsp(&input, 1 << 30, 32000, 0, &[]);

    let lenient = dsp2fsb(&["convert", input.to_str().unwrap()]);
    assert!(lenient.status.success());
    std::fs::remove_file(dir.path().join("huge.fsb")).unwrap();

    let strict = dsp2fsb(&["convert", "--strict", input.to_str().unwrap()]);
    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("sample_count"));
    assert!(!dir.path().join("huge.fsb").exists());
}

/// Test --output is refused for multiple inputs
#[test]
fn test_convert_output_with_many_inputs() {
    let dir = tempdir().expect("Failed to create temp dir");
    let a = dir.path().join("a.dsp");
    let b = dir.path().join("b.dsp");
    write_dsp(&a, 1, 32000, 0, &[]);
    write_dsp(&b, 1, 32000, 0, &[]);

    let out = dsp2fsb(&[
        "convert",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "-o",
        dir.path().join("ab.fsb").to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    assert!(!dir.path().join("ab.fsb").exists());
}

/// Test inspect on both DSP and FSB5 files
#[test]
fn test_inspect() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("voice.dsp");
    write_dsp(&input, 4410, 44100, 1, &[0; 32]);

    let out = dsp2fsb(&["inspect", input.to_str().unwrap()]);
    assert!(out.status.success(), "inspect failed: {:?}", out);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Samples: 4410"));
    assert!(stdout.contains("Sample rate: 44100 Hz"));

    let out = dsp2fsb(&["convert", input.to_str().unwrap(), "--name", "voice"]);
    assert!(out.status.success());

    let out = dsp2fsb(&["inspect", dir.path().join("voice.fsb").to_str().unwrap()]);
    assert!(out.status.success(), "inspect failed: {:?}", out);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Name: voice"));
    assert!(stdout.contains("Samples: 4410"));
    assert!(stdout.contains("Payload: 32 bytes"));
}

/// Test strict mode refuses a rate that would change the channel code
#[test]
fn test_convert_strict_rate_overlap() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("voice22k.dsp");
    write_dsp(&input, 1000, 22050, 0, &[0; 8]);

    let strict = dsp2fsb(&["convert", "--strict", input.to_str().unwrap()]);
    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("sample_rate"));
    assert!(!dir.path().join("voice22k.fsb").exists());

    let lenient = dsp2fsb(&["convert", input.to_str().unwrap()]);
    assert!(lenient.status.success());
    let fsb = std::fs::read(dir.path().join("voice22k.fsb")).unwrap();
    assert_eq!(
        mode_word(&fsb, Fsb5BankHeader::SIZE),
        (1000u64 << 34) | (1 << 5) | (22050 << 1)
    );
}

/// Test inspect reports the length of a truncated DSP header
#[test]
fn test_inspect_short_dsp() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("cut.dsp");
    std::fs::write(&input, [0u8; 50]).unwrap();

    let out = dsp2fsb(&["inspect", input.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("DSP header is 50 bytes (expected 96)"));
}
