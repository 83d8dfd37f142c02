use clap::{Arg, Command, builder::ValueParser};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names in `-v` count order; anything past the end is `TRACE`.
const LEVELS: [(&str, Level); 5] = [
    ("error", Level::ERROR),
    ("warn", Level::WARN),
    ("info", Level::INFO),
    ("debug", Level::DEBUG),
    ("trace", Level::TRACE),
];

const MAX_COUNT: u8 = 5;

/// `ORQA_LOG_LEVEL` accepts either a count (`0..=5`) or a level name.
fn parse_level(level: &str) -> Result<u8, String> {
    if let Ok(count) = level.trim().parse::<u8>() {
        return if count <= MAX_COUNT {
            Ok(count)
        } else {
            Err(format!("log level count must be at most {MAX_COUNT}"))
        };
    }

    LEVELS
        .iter()
        .position(|(name, _)| name.eq_ignore_ascii_case(level.trim()))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| "invalid log level".to_string())
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_level)
}

/// Tracing level for a `-v` count; unset means `ERROR`.
#[must_use]
pub fn verbosity_level(count: Option<u8>) -> Level {
    LEVELS
        .get(usize::from(count.unwrap_or(0)))
        .map_or(Level::TRACE, |(_, level)| *level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("ORQA_LOG_LEVEL")
            .global(true)
            .action(clap::ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_accepts_names_and_counts() {
        assert_eq!(parse_level("error"), Ok(0));
        assert_eq!(parse_level("INFO"), Ok(2));
        assert_eq!(parse_level(" trace "), Ok(4));
        assert_eq!(parse_level("5"), Ok(5));
    }

    #[test]
    fn parse_level_rejects_unknown_values() {
        assert!(parse_level("verbose").is_err());
        assert!(parse_level("6").is_err());
    }

    #[test]
    fn verbosity_level_maps_counts() {
        assert_eq!(verbosity_level(None), Level::ERROR);
        assert_eq!(verbosity_level(Some(1)), Level::WARN);
        assert_eq!(verbosity_level(Some(2)), Level::INFO);
        assert_eq!(verbosity_level(Some(3)), Level::DEBUG);
        assert_eq!(verbosity_level(Some(4)), Level::TRACE);
        assert_eq!(verbosity_level(Some(9)), Level::TRACE);
    }
}
