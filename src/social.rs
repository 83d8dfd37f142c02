//! Authorization-code-flow URLs for the social login buttons.
//!
//! Each provider is an upstream connection of the same identity provider
//! tenant. Building a URL makes no network call; the per-attempt `state` is
//! returned so the caller can persist it next to the browser.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use serde::Serialize;
use std::str::FromStr;
use url::Url;
use utoipa::ToSchema;

pub const SCOPES: &str = "openid profile email";
pub const CALLBACK_PATH: &str = "/auth/callback";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    Github,
    Microsoft,
}

impl SocialProvider {
    pub const ALL: [Self; 3] = [Self::Google, Self::Github, Self::Microsoft];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Github => "github",
            Self::Microsoft => "microsoft",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Github => "GitHub",
            Self::Microsoft => "Microsoft",
        }
    }

    /// Upstream connection name at the identity provider.
    #[must_use]
    pub const fn connection(self) -> &'static str {
        match self {
            Self::Google => "google-oauth2",
            Self::Github => "github",
            Self::Microsoft => "windowslive",
        }
    }
}

impl FromStr for SocialProvider {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == value)
            .ok_or_else(|| format!("unknown provider: {value}"))
    }
}

/// Identity provider tenant settings.
#[derive(Debug, Clone)]
pub struct SocialConfig {
    domain: String,
    client_id: String,
    redirect_uri: String,
}

impl SocialConfig {
    /// `public_url` is this gateway's externally visible base URL.
    #[must_use]
    pub fn new(domain: &str, client_id: &str, public_url: &str) -> Self {
        let domain = domain
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_string();

        Self {
            domain,
            client_id: client_id.trim().to_string(),
            redirect_uri: format!("{}{CALLBACK_PATH}", public_url.trim_end_matches('/')),
        }
    }

    /// Only usable with both a domain and a client id.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.domain.is_empty() && !self.client_id.is_empty()
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Build the authorization URL for `provider` carrying `state`.
    ///
    /// # Errors
    /// Returns an error if the configured domain does not form a valid URL.
    pub fn authorization_url(
        &self,
        provider: SocialProvider,
        state: &str,
    ) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("https://{}/authorize", self.domain))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPES)
            .append_pair("state", state)
            .append_pair("connection", provider.connection());
        Ok(url)
    }
}

/// Random `state` for one login attempt: 16 bytes, base64url (22 chars).
#[must_use]
pub fn generate_state() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
