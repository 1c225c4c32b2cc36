//! delve: generate a BSP dungeon and print it
//!
//! Optionally walks an observer through the level and shows only what it
//! has seen.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record, error, info, warn};
use strum::IntoEnumIterator;

use delve_core::render::render_ascii;
use delve_core::{
    Direction, GameRng, GenerationOptions, MoveOutcome, Session, generate_dungeon_with,
};

/// Generate and explore a BSP dungeon
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Generate and explore a BSP dungeon", long_about = None)]
struct Args {
    /// Map width in cells
    #[arg(short = 'W', long = "width", default_value_t = 80)]
    width: i32,

    /// Map height in cells
    #[arg(short = 'H', long = "height", default_value_t = 48)]
    height: i32,

    /// RNG seed (random when omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Options file (JSON, or OPTIONS=key:value lines)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Vision radius (defaults to the options' sight range)
    #[arg(short = 'r', long = "radius")]
    radius: Option<i32>,

    /// Moves to make before printing, e.g. "kkkllj" or "wwdds"
    #[arg(long = "walk", default_value = "")]
    walk: String,

    /// Print the whole map instead of only seen cells
    #[arg(long = "reveal")]
    reveal: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Writes log records to stderr
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let logger = Box::leak(Box::new(StderrLogger { level }));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

fn load_options(args: &Args) -> Result<GenerationOptions, String> {
    match &args.config {
        Some(path) => GenerationOptions::load_from_file(path)
            .map_err(|e| format!("{}: {e}", path.display())),
        None => Ok(GenerationOptions::default()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = match load_options(&args) {
        Ok(options) => options,
        Err(msg) => {
            error!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let mut rng = GameRng::from_seed_or_entropy(args.seed);
    let dungeon = match generate_dungeon_with(args.width, args.height, &mut rng, &options) {
        Ok(dungeon) => dungeon,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let radius = args.radius.unwrap_or(options.sight_range);
    let mut session = Session::new(dungeon, radius);

    for key in args.walk.chars() {
        let Some(direction) = Direction::from_key(key) else {
            let known: Vec<String> = Direction::iter().map(|d| d.to_string()).collect();
            warn!("ignoring move '{key}' (directions: {})", known.join(", "));
            continue;
        };
        if session.try_move(direction) == MoveOutcome::Blocked {
            info!("blocked moving {direction} at {:?}", session.position());
        }
    }

    let dungeon = session.dungeon();
    println!(
        "{}",
        render_ascii(&dungeon.grid, Some(session.position()), args.reveal)
    );
    println!(
        "seed {}  {}x{}  rooms {}  corridors {}  moves {}",
        dungeon.seed(),
        dungeon.width(),
        dungeon.height(),
        dungeon.tree.leaf_count(),
        dungeon.tree.corridors().count(),
        session.moves()
    );

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "delve", "--width", "60", "--seed", "7", "--walk", "kkl", "--reveal", "-vv",
        ])
        .unwrap();
        assert_eq!(args.width, 60);
        assert_eq!(args.height, 48);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.walk, "kkl");
        assert!(args.reveal);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_logger_filters_by_level() {
        let logger = StderrLogger {
            level: LevelFilter::Info,
        };
        let debug = Metadata::builder().level(Level::Debug).build();
        let info = Metadata::builder().level(Level::Info).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&info));
    }
}
