//! Client for the external identity backend (`API_URL`).
//!
//! The backend owns credential verification and the provider token exchange; this
//! client only forwards requests and classifies the outcome.

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

const LOGIN_PATH: &str = "/api/auth/login";
const SOCIAL_CALLBACK_PATH: &str = "/api/auth/social-callback";

#[derive(Debug, Error)]
pub enum BackendError {
    /// Non-success status; `detail` is the backend's `detail` field, if any.
    #[error("identity backend rejected the request with {status}")]
    Rejected {
        status: StatusCode,
        detail: Option<Value>,
    },
    #[error("identity backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("identity backend returned an unreadable body: {0}")]
    InvalidResponse(#[source] serde_json::Error),
    #[error("identity backend response is missing access_token")]
    MissingAccessToken,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SocialCallbackRequest<'a> {
    code: &'a str,
    state: &'a str,
}

#[derive(Debug, Clone)]
pub struct IdentityBackend {
    client: Client,
    base_url: String,
}

impl IdentityBackend {
    /// Build a client for `base_url`; every request is bounded by `timeout`.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not an absolute URL or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid backend URL: {base_url}"))?;

        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build identity backend client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange an email/password pair; returns the backend's response body untouched.
    ///
    /// # Errors
    /// See [`BackendError`].
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Value, BackendError> {
        self.post(
            LOGIN_PATH,
            &LoginRequest {
                username: email,
                password,
            },
        )
        .await
    }

    /// Exchange an authorization code; returns the backend-issued access token.
    ///
    /// # Errors
    /// See [`BackendError`].
    #[instrument(skip(self, code, state))]
    pub async fn social_callback(&self, code: &str, state: &str) -> Result<String, BackendError> {
        let data = self
            .post(SOCIAL_CALLBACK_PATH, &SocialCallbackRequest { code, state })
            .await?;

        data.get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(ToString::to_string)
            .ok_or(BackendError::MissingAccessToken)
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value, BackendError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        debug!(%status, %url, "Identity backend responded");

        let data = serde_json::from_slice::<Value>(&bytes);

        if !status.is_success() {
            let detail = data
                .ok()
                .and_then(|data| data.get("detail").cloned())
                .filter(|detail| !detail.is_null());
            return Err(BackendError::Rejected { status, detail });
        }

        data.map_err(BackendError::InvalidResponse)
    }
}
