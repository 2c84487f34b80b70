//! Tracing setup for the `labs-portal` binary.
//!
//! Events go to stderr; stdout carries only command output (JSON listings,
//! submission notices), so it can be piped.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global subscriber.
///
/// `explicit` marks a level picked on the command line (`-v`): it beats
/// `RUST_LOG`. A level from the config file yields to `RUST_LOG` when that is
/// set and parses.
pub fn init(level: &str, explicit: bool) -> Result<(), AppError> {
    let filter = if explicit {
        EnvFilter::try_new(level)
            .map_err(|e| AppError::Logger(format!("bad -v level '{level}': {e}")))?
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(from_env) => from_env,
            Err(_) => EnvFilter::try_new(level)
                .map_err(|e| AppError::Logger(format!("bad log_level '{level}': {e}")))?,
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| AppError::Logger(format!("subscriber already installed: {e}")))
}

/// Accept a bare level name (`off`, `error` … `trace`), case-insensitive.
///
/// `EnvFilter` treats any unknown word as a target directive, so a typo like
/// `verbos` would silence every portal event instead of failing. Config
/// resolution runs values through here first.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    let level = level.trim();
    if level.is_empty() {
        return Err(AppError::Logger("log level is empty".into()));
    }
    level.parse::<LevelFilter>().map_err(|_| {
        AppError::Logger(format!(
            "'{level}' is not one of off, error, warn, info, debug, trace"
        ))
    })
}

/// `-v` count to level; `0` leaves the configured level in charge.
pub fn level_for_verbosity(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
