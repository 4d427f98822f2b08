//! dsp2fsb - GameCube DSP to FSB5 converter
//!
//! # Commands
//!
//! - `dsp2fsb convert` - Rewrap one or more .dsp streams as .fsb banks
//! - `dsp2fsb inspect` - Print the header of a .dsp or .fsb file
//!
//! # Usage
//!
//! ```bash
//! # Convert next to the source (title.dsp -> title.fsb)
//! dsp2fsb convert title.dsp
//!
//! # Named stream, explicit output
//! dsp2fsb convert title.dsp -o banks/title.fsb --name bgm_title
//!
//! # Batch with a settings file
//! dsp2fsb convert --config dsp2fsb.toml music/*.dsp
//! ```
//!
//! Set `RUST_LOG=debug` to log decoded header fields.

mod convert;
mod fs;
mod inspect;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// dsp2fsb - GameCube DSP to FSB5 converter
#[derive(Parser)]
#[command(name = "dsp2fsb")]
#[command(about = "Rewrap GameCube DSP ADPCM streams as FSB5 banks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert .dsp files to .fsb banks
    Convert(convert::ConvertArgs),

    /// Print the header of a .dsp or .fsb file
    Inspect(inspect::InspectArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => convert::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
    }
}
