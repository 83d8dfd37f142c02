//! Route guard applied to every request.
//!
//! Evaluation order:
//! 1. assets pass through;
//! 2. `/auth/callback?code&state` is forwarded to `/api/auth/callback` with its query intact;
//! 3. `/api/auth/callback` passes through;
//! 4. a valid session on an auth-flow page is sent to `/dashboard`;
//! 5. public paths pass through;
//! 6. anything else needs a valid session, or it is sent to `/login?redirect=<path>`.
//!
//! Only claim structure and expiry are inspected; see [`crate::session::codec`].

pub mod paths;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::session::{self, SessionVerdict};
use paths::{CALLBACK_API_PATH, CALLBACK_PAGE_PATH, DASHBOARD_PATH, LOGIN_PATH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Pass,
    Redirect(String),
}

/// Decide what to do with a request.
///
/// `session` is `None` when no cookie was sent, otherwise the decoded verdict.
#[must_use]
pub fn decide(path: &str, query: Option<&str>, session: Option<&SessionVerdict>) -> Decision {
    if paths::is_asset(path) {
        return Decision::Pass;
    }

    if path == CALLBACK_PAGE_PATH {
        if let Some(query) = query.filter(|query| has_code_and_state(query)) {
            return Decision::Redirect(format!("{CALLBACK_API_PATH}?{query}"));
        }
    }

    if path == CALLBACK_API_PATH {
        return Decision::Pass;
    }

    let authenticated = session.is_some_and(SessionVerdict::is_valid);

    if authenticated && paths::is_auth_flow(path) {
        return Decision::Redirect(DASHBOARD_PATH.to_string());
    }

    if paths::is_public(path) || authenticated {
        return Decision::Pass;
    }

    Decision::Redirect(login_redirect(path))
}

/// `/login?redirect=<url-encoded path>`
#[must_use]
pub fn login_redirect(path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect", path)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

fn has_code_and_state(query: &str) -> bool {
    let (mut code, mut state) = (false, false);
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "code" => code |= !value.is_empty(),
            "state" => state |= !value.is_empty(),
            _ => {}
        }
    }
    code && state
}

/// Axum middleware wrapping [`decide`].
pub async fn guard(jar: CookieJar, request: Request, next: Next) -> Response {
    let verdict = session::session_value(&jar).map(|value| match session::now_unix() {
        Ok(now) => session::decode(&value, now),
        Err(err) => {
            warn!("System clock before Unix epoch, treating session as invalid: {err}");
            SessionVerdict::Invalid
        }
    });

    let decision = decide(
        request.uri().path(),
        request.uri().query(),
        verdict.as_ref(),
    );

    match decision {
        Decision::Pass => next.run(request).await,
        Decision::Redirect(location) => {
            debug!(path = request.uri().path(), location = %location, "Route guard redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}
