//! Chess CLI
//!
//! Play a game in the terminal against a person, a random player or the
//! computer, and save it to resume later.

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chess_core::{GameState, PlayerKind};
use chess_play::{describe, list_saves, load_game, PlayConfig, Session, SessionEnd};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log filter, e.g. `CHESS_LOG=chess_core=debug`.
const LOG_ENV: &str = "CHESS_LOG";

fn print_usage() {
    println!("Terminal chess");
    println!();
    println!("Usage:");
    println!("  chess [--white KIND] [--black KIND] [--seed N] [--max-plies N] [--config FILE]");
    println!("  chess --load FILE");
    println!("  chess saves");
    println!();
    println!("Players (KIND):");
    println!("  human     - moves typed at the prompt");
    println!("  random    - random moves, random promotions");
    println!("  computer  - random moves and promotions, black by default");
    println!();
    println!("Environment:");
    println!("  {:<13} config file used when --config is absent", chess_play::CONFIG_ENV);
    println!("  {LOG_ENV:<13} log filter (default: warn)");
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    load: Option<PathBuf>,
    white: Option<PlayerKind>,
    black: Option<PlayerKind>,
    seed: Option<u64>,
    max_plies: Option<u32>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .map(String::as_str)
                .with_context(|| format!("{flag} needs a value"))
        };
        match flag {
            "--config" | "-c" => parsed.config = Some(PathBuf::from(value()?)),
            "--load" | "-l" => parsed.load = Some(PathBuf::from(value()?)),
            "--white" | "-w" => {
                parsed.white = Some(value()?.parse::<PlayerKind>().map_err(anyhow::Error::msg)?)
            }
            "--black" | "-b" => {
                parsed.black = Some(value()?.parse::<PlayerKind>().map_err(anyhow::Error::msg)?)
            }
            "--seed" | "-s" => {
                parsed.seed = Some(value()?.parse::<u64>().context("--seed expects an integer")?)
            }
            "--max-plies" => {
                parsed.max_plies =
                    Some(value()?.parse::<u32>().context("--max-plies expects an integer")?)
            }
            other => bail!("unknown argument: {other}"),
        }
        i += 2;
    }
    Ok(parsed)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn show_saves(config: &PlayConfig) -> Result<()> {
    let names = list_saves(&config.save_dir)?;
    if names.is_empty() {
        println!("No saved games in {}.", config.save_dir.display());
    }
    for name in names {
        println!("{}", config.save_dir.join(format!("{name}.json")).display());
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("help" | "--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some("saves") => return show_saves(&PlayConfig::resolve(None)?),
        _ => {}
    }

    let args = parse_args(&args)?;
    let mut config = PlayConfig::resolve(args.config.as_deref())?;
    if let Some(white) = args.white {
        config.white = white;
    }
    if let Some(black) = args.black {
        config.black = black;
    }
    config.seed = args.seed.or(config.seed);
    config.max_plies = args.max_plies.or(config.max_plies);

    let game = match &args.load {
        Some(path) => load_game(path)?,
        None => GameState::new().with_players(config.white, config.black),
    };
    info!(?config, resumed = args.load.is_some(), "starting session");

    let stdin = io::stdin();
    let mut session = Session::new(game, &config, stdin.lock(), io::stdout());
    match session.run()? {
        SessionEnd::Finished(status) => info!(result = %describe(status), "game finished"),
        SessionEnd::Saved(path) => info!(path = %path.display(), "session saved"),
        SessionEnd::InputClosed => println!(),
        SessionEnd::PlyLimit => {}
    }
    Ok(())
}
