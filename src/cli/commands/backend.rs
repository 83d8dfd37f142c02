use clap::{Arg, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_BACKEND_TIMEOUT_SECONDS: &str = "backend-timeout-seconds";

/// Identity backend the credential and code exchanges are forwarded to.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the identity backend")
                .env("API_URL")
                .default_value("http://localhost:9000"),
        )
        .arg(
            Arg::new(ARG_BACKEND_TIMEOUT_SECONDS)
                .long("backend-timeout-seconds")
                .help("Timeout for identity backend requests in seconds")
                .env("ORQA_BACKEND_TIMEOUT_SECONDS")
                .default_value("30")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
