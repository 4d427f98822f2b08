//! dsp2fsb.toml settings parsing
//!
//! ```toml
//! # Optional: write banks here instead of next to each source
//! output_dir = "banks"
//!
//! # Optional: FSB5 encoder overrides (see dsp_fsb5::Fsb5Config)
//! [bank]
//! stream_name = "bgm_title"
//! bit_policy = "strict"
//! ```

use anyhow::{Context, Result};
use dsp_fsb5::Fsb5Config;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Extension given to converted banks
pub const FSB_EXTENSION: &str = "fsb";

/// dsp2fsb.toml structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Output directory for converted banks.
    /// Default: alongside each source file
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Encoder settings
    #[serde(default)]
    pub bank: Fsb5Config,
}

impl Settings {
    /// Load settings from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid settings: {}", path.display()))
    }

    /// Parse settings from string
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).context("Failed to parse dsp2fsb.toml")?;
        settings.bank.validate()?;
        Ok(settings)
    }

    /// Default output path for a source file
    pub fn output_path(&self, input: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => {
                let file_name = input.file_name().unwrap_or(input.as_os_str());
                dir.join(file_name).with_extension(FSB_EXTENSION)
            }
            None => input.with_extension(FSB_EXTENSION),
        }
    }
}
