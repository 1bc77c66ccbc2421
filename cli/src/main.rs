// SPDX-License-Identifier: MIT OR Apache-2.0

//! wikirace CLI - race between Wikipedia articles in the terminal
//!
//! Reads commands and pasted links from stdin, refreshes the clock line from
//! an interval timer and keeps the high score on disk.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use std::path::PathBuf;
use anyhow::{Context, Result};

// File logging; the returned handle must outlive the program's logging
fn init_logging() -> Result<LoggerHandle> {
    // Get log directory
    let log_dir = match directories::ProjectDirs::from("org", "wikirace", "wikirace") {
        Some(dirs) => dirs.data_local_dir().join("logs"),
        None => {
            let mut path = PathBuf::from(".");
            path.push("logs");
            path
        }
    };

    // Ensure log directory exists
    std::fs::create_dir_all(&log_dir)?;

    // Configure and start the logger
    let handle = Logger::try_with_env_or_str("info")?
        .log_to_file(
            FileSpec::default()
                .directory(&log_dir)
                .basename("wikirace")
                .suffix("log"),
        )
        .rotate(
            Criterion::Size(10 * 1024 * 1024), // 10MB per file
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5), // Keep 5 files
        )
        .start()?;

    Ok(handle)
}

use clap::{Parser, ValueEnum};
use std::io::Write;
use tokio::io::AsyncBufReadExt;
use tokio::signal;
use tokio::time::MissedTickBehavior;
use wikirace_cli::{parse_command, Session};
use wikirace_core::config::{load_config, load_config_from};
use wikirace_core::high_score::{default_high_score_path, FileHighScoreStore};
use wikirace_core::{Game, Variant};

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "wikirace",
    about = "Race from one Wikipedia article to another by pasting links",
    version
)]
struct Args {
    /// Path to a config file (defaults to the platform config directory)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Rule set to play with, overriding the config file
    #[clap(short, long, value_enum)]
    variant: Option<VariantArg>,

    /// Where to keep the high score
    #[clap(long)]
    high_score_file: Option<PathBuf>,

    /// Seed for drawing articles, for reproducible games
    #[clap(long)]
    seed: Option<u64>,

    /// Log to stderr at debug level instead of the log file
    #[clap(long)]
    debug: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    /// Pause/resume, live score and high score
    Scored,
    /// Clicks and time only
    Classic,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Scored => Variant::Scored,
            VariantArg::Classic => Variant::Classic,
        }
    }
}

fn init_debug_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(tracing_error::ErrorLayer::default())
        .init();
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_handle = if args.debug {
        init_debug_tracing();
        None
    } else {
        match init_logging() {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("Warning: Failed to initialize logging: {}", e);
                None
            }
        }
    };

    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!("CLI panic: {}", panic_info);
        eprintln!("PANIC: {}", panic_info);
    }));

    let config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    let variant = args.variant.map(Variant::from).unwrap_or(config.variant);
    let pool = config.pool().context("Invalid article list in config")?;

    let mut game = Game::with_system_clock(variant, pool);
    if let Some(seed) = args.seed {
        game = game.with_seed(seed);
    }
    if variant.is_scored() {
        let path = match args.high_score_file.or_else(|| config.high_score_path.clone()) {
            Some(path) => path,
            None => default_high_score_path()?,
        };
        tracing::info!("Using high score file {}", path.display());
        game = game.with_high_scores(Box::new(FileHighScoreStore::new(path)));
    }

    let mut session = Session::new(game);
    for line in session.welcome() {
        println!("{}", line);
    }

    run_input_loop(&mut session, config.tick_interval()).await
}

/// Feed stdin lines and timer ticks to the session until quit
async fn run_input_loop(session: &mut Session, tick_interval: std::time::Duration) -> Result<()> {
    let mut stdin_lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            // Handle Ctrl+C gracefully
            _ = signal::ctrl_c() => {
                println!("\nReceived Ctrl+C, shutting down...");
                break;
            }

            _ = ticker.tick() => {
                if let Some(line) = session.on_tick() {
                    print!("\r{}", line);
                    stdout.flush()?;
                }
            }

            result = stdin_lines.next_line() => {
                let line = match result {
                    Ok(Some(line)) => line,
                    Ok(None) => break, // EOF
                    Err(e) => {
                        eprintln!("Error reading input: {}", e);
                        continue;
                    }
                };

                let command = match parse_command(&line) {
                    Some(command) => command,
                    None => continue,
                };

                let reply = session.handle(command);
                if let Some(alert) = &reply.alert {
                    // BEL so the alert is noticed
                    eprintln!("\x07! {}", alert);
                }
                for line in &reply.lines {
                    println!("{}", line);
                }
                if reply.quit {
                    break;
                }
            }
        }
    }

    Ok(())
}
