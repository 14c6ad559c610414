//! Director - scripted, narrated screen recordings for vertical video.
//!
//! Main entry point for the `director` CLI.

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod pipeline;
mod register;

use cli::{Cli, Commands};
use pipeline::Pipeline;

/// `~/.director`, or `./.director` when there is no home directory.
fn director_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".director")
}

/// Initialize tracing with console and daily-rolling file output.
fn init_tracing(level: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = director_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("director")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The worker flushes on drop; keep it for the whole process.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = match level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_deref())?;

    let work_dir = match cli.work_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Plan { json } => Pipeline::load(&cli.config, &work_dir)?.plan(json).await?,
        Commands::Check => pipeline::check(&cli.config, &work_dir)?,
        Commands::Narrate { output } => {
            Pipeline::load(&cli.config, &work_dir)?.narrate(output).await?
        }
        Commands::Record { no_prompt } => {
            Pipeline::load(&cli.config, &work_dir)?.record(!no_prompt).await?
        }
    }

    Ok(())
}
