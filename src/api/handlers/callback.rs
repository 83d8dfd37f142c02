//! OAuth authorization-code callback.
//!
//! Reached by browser navigation, so every failure after parameter validation
//! ends in a redirect to the login page rather than a JSON error.

use axum::{
    Json,
    extract::{Extension, RawQuery},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use url::form_urlencoded;
use utoipa::IntoParams;

use super::types::ErrorResponse;
use crate::{
    api::state::AuthState,
    guard::paths::DASHBOARD_PATH,
    session::{
        cookie::{clear_state_cookies, state_matches},
        session_cookie,
    },
};

pub const CALLBACK_FAILED_PATH: &str = "/login?error=auth0_callback_failed";

#[derive(IntoParams, Debug, Default, PartialEq, Eq)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// Authorization code issued by the identity provider.
    code: Option<String>,
    /// Anti-CSRF value issued with the authorization URL.
    state: Option<String>,
    /// Same-origin path to land on after sign-in.
    redirect_to: Option<String>,
}

impl CallbackParams {
    /// Lenient parse: the first occurrence of each key wins and anything else is ignored.
    fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "code" => &mut params.code,
                "state" => &mut params.state,
                "redirect_to" => &mut params.redirect_to,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/callback",
    params(CallbackParams),
    responses(
        (status = 302, description = "Redirect to the dashboard, `redirect_to`, or the login page with an error flag"),
        (status = 400, description = "Missing code or state", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn callback(
    auth_state: Extension<Arc<AuthState>>,
    jar: CookieJar,
    RawQuery(query): RawQuery,
) -> Response {
    let params = CallbackParams::from_query(query.as_deref());

    let (Some(code), Some(state)) = (non_empty(params.code), non_empty(params.state)) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::message("Missing required parameters")),
        )
            .into_response();
    };

    info!("Social login callback received");

    let state_ok = state_matches(&jar, &state);
    // State values are single use.
    let jar = clear_state_cookies(jar);

    if !state_ok {
        warn!("OAuth state mismatch");
        return (jar, found(CALLBACK_FAILED_PATH)).into_response();
    }

    match auth_state.backend().social_callback(&code, &state).await {
        Ok(token) => {
            let config = auth_state.config();
            let jar = jar.add(session_cookie(
                token,
                config.session_ttl_seconds(),
                config.session_cookie_secure(),
            ));
            let target = safe_redirect(params.redirect_to.as_deref());

            info!(redirect = %target, "Social login succeeded");

            (jar, found(target)).into_response()
        }
        Err(err) => {
            error!("Social callback exchange failed: {err}");
            (jar, found(CALLBACK_FAILED_PATH)).into_response()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// 302 with a relative `Location`.
fn found(location: &str) -> impl IntoResponse + '_ {
    (StatusCode::FOUND, [(LOCATION, location)])
}

/// Only same-origin absolute paths are honoured; anything else lands on the dashboard.
fn safe_redirect(target: Option<&str>) -> &str {
    match target {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && path.chars().all(|c| c.is_ascii_graphic()) =>
        {
            path
        }
        _ => DASHBOARD_PATH,
    }
}
