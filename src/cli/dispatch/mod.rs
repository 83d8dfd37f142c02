use crate::cli::{
    actions::{Action, server::Args},
    commands::{
        ARG_API_URL, ARG_AUTH0_CLIENT_ID, ARG_AUTH0_DOMAIN, ARG_BACKEND_TIMEOUT_SECONDS,
        ARG_ENVIRONMENT, ARG_PORT, ARG_PUBLIC_URL, ARG_SESSION_TTL_SECONDS, ARG_STATIC_DIR,
    },
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// # Errors
/// Returns an error if a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(3000);

    let api_url = matches
        .get_one::<String>(ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;

    let public_url = matches
        .get_one::<String>(ARG_PUBLIC_URL)
        .cloned()
        .context("missing required argument: --public-url")?;

    let environment = matches
        .get_one::<String>(ARG_ENVIRONMENT)
        .cloned()
        .unwrap_or_else(|| "development".to_string());

    let session_ttl_seconds = matches
        .get_one::<i64>(ARG_SESSION_TTL_SECONDS)
        .copied()
        .unwrap_or(604_800);

    let backend_timeout_seconds = matches
        .get_one::<u64>(ARG_BACKEND_TIMEOUT_SECONDS)
        .copied()
        .unwrap_or(30);

    let static_dir = matches
        .get_one::<String>(ARG_STATIC_DIR)
        .map_or_else(|| PathBuf::from("public"), PathBuf::from);

    Ok(Action::Server(Args {
        port,
        api_url,
        public_url,
        environment,
        session_ttl_seconds,
        backend_timeout_seconds,
        auth0_domain: matches.get_one::<String>(ARG_AUTH0_DOMAIN).cloned(),
        auth0_client_id: matches.get_one::<String>(ARG_AUTH0_CLIENT_ID).cloned(),
        static_dir,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn builds_server_args() {
        let matches = commands::new().get_matches_from(vec![
            "orqa",
            "--port",
            "4000",
            "--api-url",
            "http://identity:9000",
            "--public-url",
            "https://ops.orqa.dev",
            "--environment",
            "production",
            "--static-dir",
            "/srv/orqa",
            "--auth0-domain",
            "orqa.eu.auth0.com",
            "--auth0-client-id",
            "client-123",
        ]);

        let Action::Server(args) = handler(&matches).unwrap();

        assert_eq!(args.port, 4000);
        assert_eq!(args.api_url, "http://identity:9000");
        assert_eq!(args.public_url, "https://ops.orqa.dev");
        assert_eq!(args.environment, "production");
        assert_eq!(args.static_dir, PathBuf::from("/srv/orqa"));
        assert_eq!(args.auth0_domain.as_deref(), Some("orqa.eu.auth0.com"));
        assert_eq!(args.auth0_client_id.as_deref(), Some("client-123"));
    }
}
