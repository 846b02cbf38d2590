use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use grid_snake::config::{ConfigOverrides, GameConfig, default_log_path};
use grid_snake::game::GameEngine;
use grid_snake::input::KeyboardInput;
use grid_snake::logging::init_file_logger;
use grid_snake::renderer::TerminalDisplay;
use grid_snake::runtime;
use grid_snake::terminal_runtime::TerminalSession;
use log::{error, info};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Initial snake length.
    #[arg(long)]
    length: Option<usize>,

    /// Seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            board_width: self.width,
            board_height: self.height,
            tick_interval_ms: self.tick_ms,
            initial_length: self.length,
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(error) = init_file_logger(&log_path, cli.verbose) {
        eprintln!("Failed to open log file {}: {error}", log_path.display());
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = GameConfig::load(cli.config.as_deref())?.with_overrides(cli.overrides());
    let mut engine = GameEngine::new(&config)?;

    let session = TerminalSession::enter()?;
    let mut display = TerminalDisplay::new(session, config.geometry());
    let mut input = KeyboardInput;

    let summary = runtime::run(&mut engine, &mut input, &mut display, config.tick_interval())?;
    drop(display);

    info!("exiting with {summary:?}");
    println!(
        "Final score: {} ({} game(s) played)",
        summary.final_score, summary.games_played
    );
    Ok(())
}
