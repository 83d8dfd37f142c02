//! Shared, read-only state for the auth handlers.

use anyhow::Result;
use std::time::Duration;

use crate::{backend::IdentityBackend, social::SocialConfig};

const DEFAULT_API_URL: &str = "http://localhost:9000";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";
const DEFAULT_SESSION_TTL_SECONDS: i64 = 60 * 60 * 24 * 7;
const DEFAULT_BACKEND_TIMEOUT_SECONDS: u64 = 30;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    api_url: String,
    public_url: String,
    production: bool,
    session_ttl_seconds: i64,
    backend_timeout_seconds: u64,
    auth0_domain: String,
    auth0_client_id: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL.to_string())
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new(api_url: String) -> Self {
        Self {
            api_url,
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            production: false,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            backend_timeout_seconds: DEFAULT_BACKEND_TIMEOUT_SECONDS,
            auth0_domain: String::new(),
            auth0_client_id: String::new(),
        }
    }

    #[must_use]
    pub fn with_public_url(mut self, public_url: String) -> Self {
        self.public_url = public_url;
        self
    }

    /// `NODE_ENV` value; only `production` marks cookies `Secure`.
    #[must_use]
    pub fn with_environment(mut self, environment: &str) -> Self {
        self.production = environment.trim().eq_ignore_ascii_case("production");
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_backend_timeout_seconds(mut self, seconds: u64) -> Self {
        self.backend_timeout_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_identity_provider(mut self, domain: String, client_id: String) -> Self {
        self.auth0_domain = domain;
        self.auth0_client_id = client_id;
        self
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[must_use]
    pub fn public_url(&self) -> &str {
        &self.public_url
    }

    #[must_use]
    pub fn session_cookie_secure(&self) -> bool {
        self.production
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_seconds)
    }
}

#[derive(Debug)]
pub struct AuthState {
    config: AuthConfig,
    backend: IdentityBackend,
    social: SocialConfig,
}

impl AuthState {
    /// # Errors
    /// Returns an error if the backend URL is invalid or the HTTP client cannot be built.
    pub fn new(config: AuthConfig) -> Result<Self> {
        let backend = IdentityBackend::new(config.api_url(), config.backend_timeout())?;
        let social = SocialConfig::new(
            &config.auth0_domain,
            &config.auth0_client_id,
            config.public_url(),
        );
        Ok(Self {
            config,
            backend,
            social,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn backend(&self) -> &IdentityBackend {
        &self.backend
    }

    #[must_use]
    pub fn social(&self) -> &SocialConfig {
        &self.social
    }
}
