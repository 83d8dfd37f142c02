//! Social login entry points.
//!
//! Each link gets its own state value, stored in a per-provider cookie so that
//! attempts in parallel tabs with different providers do not clobber each other.

use axum::{
    Json,
    extract::{Extension, Path},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::{debug, error};

use super::types::{ErrorResponse, SocialLink, SocialLinksResponse};
use crate::{
    api::state::AuthState,
    session::cookie::state_cookie,
    social::{SocialProvider, generate_state},
};

pub const SOCIAL_UNAVAILABLE_PATH: &str = "/login?error=social_login_unavailable";

/// Authorization URL for `provider` plus the cookie holding its state.
fn prepare(
    auth_state: &AuthState,
    provider: SocialProvider,
    jar: CookieJar,
) -> (CookieJar, Option<String>) {
    let social = auth_state.social();
    if !social.is_configured() {
        return (jar, None);
    }

    let state = generate_state();
    match social.authorization_url(provider, &state) {
        Ok(url) => {
            let secure = auth_state.config().session_cookie_secure();
            let jar = jar.add(state_cookie(provider.as_str(), state, secure));
            (jar, Some(url.to_string()))
        }
        Err(err) => {
            error!("Failed to build {} authorization URL: {err}", provider.as_str());
            (jar, None)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/social-links",
    responses(
        (status = 200, description = "One authorization URL per provider; `url` is null when social login is not configured", body = SocialLinksResponse)
    ),
    tag = "auth"
)]
pub async fn social_links(
    auth_state: Extension<Arc<AuthState>>,
    mut jar: CookieJar,
) -> impl IntoResponse {
    let mut providers = Vec::with_capacity(SocialProvider::ALL.len());

    for provider in SocialProvider::ALL {
        let (next, url) = prepare(&auth_state, provider, jar);
        jar = next;
        providers.push(SocialLink {
            provider,
            name: provider.display_name().to_string(),
            url,
        });
    }

    (jar, Json(SocialLinksResponse { providers }))
}

#[utoipa::path(
    get,
    path = "/auth/login/{provider}",
    params(
        ("provider" = String, Path, description = "google, github or microsoft")
    ),
    responses(
        (status = 302, description = "Redirect to the identity provider"),
        (status = 404, description = "Unknown provider", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn social_login(
    auth_state: Extension<Arc<AuthState>>,
    jar: CookieJar,
    Path(provider): Path<String>,
) -> Response {
    let Ok(provider) = provider.parse::<SocialProvider>() else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::message("Unknown provider")),
        )
            .into_response();
    };

    match prepare(&auth_state, provider, jar) {
        (jar, Some(url)) => {
            debug!("Starting {} login", provider.as_str());
            (StatusCode::FOUND, jar, [(LOCATION, url)]).into_response()
        }
        (jar, None) => {
            (StatusCode::FOUND, jar, [(LOCATION, SOCIAL_UNAVAILABLE_PATH)]).into_response()
        }
    }
}
