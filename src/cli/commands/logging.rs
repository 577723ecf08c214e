//! `-v` / `CBSP_LOG_LEVEL`: how much `cbsp-auth` writes to stderr.

use clap::{Arg, ArgAction, Command, builder::ValueParser};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in verbosity order; the index is the `-v` count.
const LEVELS: [(&str, Level); 5] = [
    ("error", Level::ERROR),
    ("warn", Level::WARN),
    ("info", Level::INFO),
    ("debug", Level::DEBUG),
    ("trace", Level::TRACE),
];

/// Accepts a level name or a count, so `CBSP_LOG_LEVEL=info` and
/// `CBSP_LOG_LEVEL=2` both mean `-vv`. Clap also feeds `-v` counts through here.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|level: &str| -> Result<u8, String> {
        let level = level.trim().to_ascii_lowercase();
        if let Ok(count) = level.parse::<u8>() {
            return Ok(count);
        }
        LEVELS
            .iter()
            .zip(0u8..)
            .find(|((name, _), _)| *name == level)
            .map(|(_, count)| count)
            .ok_or_else(|| format!("invalid log level '{level}', expected one of error, warn, info, debug, trace"))
    })
}

/// Level for a `-v` count. No flag logs errors only; counts past the last level
/// stay at TRACE.
#[must_use]
pub fn level_for(verbosity: u8) -> Level {
    LEVELS
        .get(usize::from(verbosity))
        .map_or(Level::TRACE, |(_, level)| *level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Repeat for more log output on stderr: -v warn, -vv info, -vvv debug, -vvvv trace (default: error)")
            .env("CBSP_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_map_to_levels() {
        assert_eq!(level_for(0), Level::ERROR);
        assert_eq!(level_for(1), Level::WARN);
        assert_eq!(level_for(2), Level::INFO);
        assert_eq!(level_for(3), Level::DEBUG);
        assert_eq!(level_for(4), Level::TRACE);
        assert_eq!(level_for(9), Level::TRACE);
    }

    #[test]
    fn env_values_match_counts() {
        let command = with_args(Command::new("cbsp-auth"));
        for (value, expected) in [("info", 2u8), ("WARN", 1), ("3", 3), ("error", 0)] {
            temp_env::with_vars([("CBSP_LOG_LEVEL", Some(value))], || {
                let matches = command.clone().try_get_matches_from(["cbsp-auth"]);
                let count = matches
                    .ok()
                    .and_then(|m| m.get_one::<u8>(ARG_VERBOSITY).copied());
                assert_eq!(count, Some(expected), "{value}");
            });
        }
    }

    #[test]
    fn repeated_flag_counts_past_trace() {
        temp_env::with_vars([("CBSP_LOG_LEVEL", None::<&str>)], || {
            let matches = with_args(Command::new("cbsp-auth"))
                .try_get_matches_from(["cbsp-auth", "-vvvvv"]);
            let count = matches
                .ok()
                .and_then(|m| m.get_one::<u8>(ARG_VERBOSITY).copied());
            assert_eq!(count, Some(5));
            assert_eq!(level_for(5), Level::TRACE);
        });
    }

    #[test]
    fn rejects_unknown_level() {
        temp_env::with_vars([("CBSP_LOG_LEVEL", Some("loud"))], || {
            let matches = with_args(Command::new("cbsp-auth")).try_get_matches_from(["cbsp-auth"]);
            assert!(matches.is_err());
        });
    }
}
