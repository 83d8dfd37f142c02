use crate::{
    api::{
        self,
        state::{AuthConfig, AuthState},
    },
    cli::telemetry,
};
use anyhow::{Context, Result};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub api_url: String,
    pub public_url: String,
    pub environment: String,
    pub session_ttl_seconds: i64,
    pub backend_timeout_seconds: u64,
    pub auth0_domain: Option<String>,
    pub auth0_client_id: Option<String>,
    pub static_dir: PathBuf,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the backend URL is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    if !args.static_dir.is_dir() {
        warn!(
            "Static directory {} not found; unmatched paths will return 404",
            args.static_dir.display()
        );
    }

    let config = AuthConfig::new(args.api_url)
        .with_public_url(args.public_url)
        .with_environment(&args.environment)
        .with_session_ttl_seconds(args.session_ttl_seconds)
        .with_backend_timeout_seconds(args.backend_timeout_seconds)
        .with_identity_provider(
            args.auth0_domain.unwrap_or_default(),
            args.auth0_client_id.unwrap_or_default(),
        );

    let auth_state = Arc::new(AuthState::new(config).context("Failed to build auth state")?);

    let result = api::new(args.port, auth_state, &args.static_dir).await;

    telemetry::shutdown_tracer();

    result
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("api_url", args.api_url.clone()),
        ("public_url", args.public_url.clone()),
        ("environment", args.environment.clone()),
        ("session_ttl_seconds", args.session_ttl_seconds.to_string()),
        (
            "backend_timeout_seconds",
            args.backend_timeout_seconds.to_string(),
        ),
        (
            "social_login",
            (args.auth0_domain.is_some() && args.auth0_client_id.is_some()).to_string(),
        ),
        ("static_dir", args.static_dir.display().to_string()),
    ];

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "orqa {} - {}\n\nStartup configuration:",
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}
