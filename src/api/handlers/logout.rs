use axum::{Json, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use super::types::SuccessResponse;
use crate::session::{self, clear_session_cookie};

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = SuccessResponse)
    ),
    tag = "auth"
)]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    debug!(had_session = session::session_value(&jar).is_some(), "Logout");

    // Always clear the cookie, even if none was sent.
    (jar.add(clear_session_cookie()), Json(SuccessResponse::OK))
}
