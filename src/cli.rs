//! CLI definitions for the Director.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Director CLI.
#[derive(Parser)]
#[command(name = "director")]
#[command(about = "Scripted, narrated screen recordings for vertical video")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (TOML, or JSON by extension)
    #[arg(short, long, default_value = "director.toml", global = true)]
    pub config: PathBuf,

    /// Working directory relative paths are resolved against
    #[arg(short, long, global = true)]
    pub work_dir: Option<PathBuf>,

    /// Log filter, overrides RUST_LOG (e.g. "debug", "director_core=trace")
    #[arg(long, global = true, env = "DIRECTOR_LOG")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Dry run: print narration cues and the inferred duration
    Plan {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration and the scenario
    Check,

    /// Dry run and mix the narration master track only
    Narrate {
        /// Where to write the master track
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Full pipeline: plan, narrate, record live, finish
    Record {
        /// Start immediately instead of waiting for ENTER
        #[arg(long)]
        no_prompt: bool,
    },
}
