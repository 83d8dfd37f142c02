//! Session status from the cookie alone; the identity backend is never consulted.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use super::types::{CheckAuthResponse, SessionUser};
use crate::session::{self, SessionVerdict};

#[utoipa::path(
    get,
    path = "/api/check-auth",
    responses(
        (status = 200, description = "Session is valid", body = CheckAuthResponse),
        (status = 401, description = "No session, or an invalid/expired one", body = CheckAuthResponse),
        (status = 500, description = "Session could not be checked", body = CheckAuthResponse)
    ),
    tag = "auth"
)]
pub async fn check_auth(jar: CookieJar) -> Response {
    let Some(value) = session::session_value(&jar) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(CheckAuthResponse::rejected("No session found")),
        )
            .into_response();
    };

    let now = match session::now_unix() {
        Ok(now) => now,
        Err(err) => {
            error!("Error checking authentication: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CheckAuthResponse::rejected("Authentication check failed")),
            )
                .into_response();
        }
    };

    match session::decode(&value, now) {
        SessionVerdict::Valid(claims) => (
            StatusCode::OK,
            Json(CheckAuthResponse {
                authenticated: true,
                user: Some(SessionUser {
                    sub: claims.subject,
                    email: claims.email,
                }),
                message: None,
            }),
        )
            .into_response(),
        SessionVerdict::Invalid => (
            StatusCode::UNAUTHORIZED,
            Json(CheckAuthResponse::rejected("Invalid or expired session")),
        )
            .into_response(),
    }
}
