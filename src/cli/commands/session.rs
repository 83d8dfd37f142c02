use clap::{Arg, Command};

pub const ARG_ENVIRONMENT: &str = "environment";
pub const ARG_PUBLIC_URL: &str = "public-url";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_ENVIRONMENT)
                .long("environment")
                .help("Deployment environment; `production` marks cookies Secure")
                .env("NODE_ENV")
                .default_value("development"),
        )
        .arg(
            Arg::new(ARG_PUBLIC_URL)
                .long("public-url")
                .help("Public origin of the gateway, used for the OAuth redirect URI")
                .env("ORQA_PUBLIC_URL")
                .default_value("http://localhost:3000"),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long("session-ttl-seconds")
                .help("Session cookie TTL in seconds")
                .env("ORQA_SESSION_TTL_SECONDS")
                .default_value("604800")
                .value_parser(clap::value_parser!(i64).range(1..)),
        )
}
