//! # Orqa (Ops Authentication Gateway)
//!
//! `orqa` is the HTTP front door of the Orqa Ops dashboard. It serves the
//! front-end bundle and owns the authentication/session boundary in front of it.
//!
//! ## Sessions
//!
//! A session is an opaque value stored in the HTTP-only `session` cookie. The
//! gateway only inspects its claim structure and expiry; it does **not** verify
//! token signatures. Authenticity is the identity backend's responsibility.
//!
//! ## Route guard
//!
//! Every request is classified as an asset, a public page, an auth-flow page or
//! a protected page. Protected pages without a valid session are redirected to
//! `/login?redirect=<path>`; signed-in users are bounced from auth-flow pages to
//! `/dashboard`.
//!
//! ## Exchanges
//!
//! Credentials and OAuth authorization codes are forwarded to the identity
//! backend (`API_URL`). On success the gateway writes the session cookie.

pub mod api;
pub mod backend;
pub mod cli;
pub mod guard;
pub mod session;
pub mod social;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
