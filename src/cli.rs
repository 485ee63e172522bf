//! Command-line interface definitions for kidtalk

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kidtalk")]
#[command(author, version, about = "Voice-driven learning games for kids")]
#[command(long_about = "
Kidtalk is a suite of voice-driven learning games for small children:
hear or see something, say the answer, earn points, unlock harder rounds.

SETUP:
  1. Download a vosk model from https://alphacephei.com/vosk/models
  2. Place the zip (or extracted directory) in ~/.local/share/kidtalk/model
  3. Run: kidtalk setup (to verify and extract the model)
  4. Run: kidtalk play animals

USAGE:
  Press Enter when ready to answer, then speak into the microphone.
  Answers are graded and your score picks the difficulty tier.
")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<std::path::PathBuf>,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Override the answer timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a game (default: animals)
    Play {
        /// Game name: animals, colors, shapes, objects, counting
        game: String,
    },

    /// List available games
    Games,

    /// Microphone check: run one listen session and print the transcript
    Listen,

    /// Show current configuration
    Config,

    /// Verify (and if needed extract) the voice model
    Setup,
}
