//! Brick Arena entry point
//!
//! Runs a headless session and logs the outcome. The autopilot plays unless
//! an input script is given, one `<frame> <event>` entry per line.
//!
//! Usage: `brick-arena [seed] [config.json] [script.txt]`

use std::process::ExitCode;

use brick_arena::consts::MAX_FRAMES;
use brick_arena::driver::{Autopilot, InputSource, LogPresenter, ScriptedInput, run_session};
use brick_arena::{Arena, Config, ConfigError};

fn parse_seed(arg: Option<String>) -> u64 {
    match arg {
        Some(s) => s.parse().unwrap_or_else(|_| {
            log::warn!("Invalid seed '{}', using 0", s);
            0
        }),
        None => 0,
    }
}

fn load_config(arg: Option<String>) -> Result<Config, ConfigError> {
    match arg {
        Some(path) => Config::load(path),
        None => {
            log::info!("No config file given, using defaults");
            Ok(Config::default())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Brick Arena (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = parse_seed(args.next());

    let config = match load_config(args.next()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut arena = match Arena::new(config, seed) {
        Ok(arena) => arena,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut input: Box<dyn InputSource> = match args.next() {
        Some(path) => match ScriptedInput::load(path) {
            Ok(script) => Box::new(script),
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(Autopilot::default()),
    };
    let mut presenter = LogPresenter::new(60);

    match run_session(&mut arena, input.as_mut(), &mut presenter, MAX_FRAMES) {
        Some(termination) => {
            println!(
                "{} Score {}/{} in {} frames",
                termination.message,
                arena.score(),
                arena.blocks().len(),
                arena.frame()
            );
        }
        None => {
            println!(
                "No result after {} frames. Score {}/{}",
                arena.frame(),
                arena.score(),
                arena.blocks().len()
            );
        }
    }

    ExitCode::SUCCESS
}
