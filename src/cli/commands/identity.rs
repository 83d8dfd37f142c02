use clap::{Arg, Command};

pub const ARG_AUTH0_DOMAIN: &str = "auth0-domain";
pub const ARG_AUTH0_CLIENT_ID: &str = "auth0-client-id";

/// Hosted identity provider used for social login. Social login stays
/// unavailable unless both values are set.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_AUTH0_DOMAIN)
                .long("auth0-domain")
                .help("Identity provider domain, e.g. tenant.eu.auth0.com")
                .env("NEXT_PUBLIC_AUTH0_DOMAIN"),
        )
        .arg(
            Arg::new(ARG_AUTH0_CLIENT_ID)
                .long("auth0-client-id")
                .help("Identity provider client id")
                .env("NEXT_PUBLIC_AUTH0_CLIENT_ID"),
        )
}
