use crate::cli::{actions::Action, commands, dispatch::handler, telemetry};
use anyhow::Result;

/// Parse the command line, initialize telemetry and return the action to run.
///
/// # Errors
/// Returns an error if telemetry cannot be initialized or the arguments are inconsistent
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity_level =
        commands::verbosity_level(matches.get_one::<u8>(commands::ARG_VERBOSITY).copied());

    telemetry::init(Some(verbosity_level))?;

    let action = handler(&matches)?;

    Ok(action)
}
