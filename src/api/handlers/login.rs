//! Credential login: forwards email/password to the identity backend.

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::types::{ErrorResponse, LoginRequest, SuccessResponse};
use crate::{
    api::state::AuthState,
    backend::BackendError,
    session::{self, session_cookie},
};

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session cookie set", body = SuccessResponse),
        (status = 400, description = "Missing email or password", body = ErrorResponse),
        (status = 401, description = "Backend rejected the credentials (status relayed)", body = ErrorResponse),
        (status = 500, description = "Backend unreachable or unreadable", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    auth_state: Extension<Arc<AuthState>>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) if !request.email.trim().is_empty() && !request.password.is_empty() => {
            request
        }
        Ok(_) => return missing_credentials(),
        Err(rejection) => {
            debug!("Rejected login payload: {rejection}");
            return missing_credentials();
        }
    };

    let data = match auth_state
        .backend()
        .login(request.email.trim(), &request.password)
        .await
    {
        Ok(data) => data,
        Err(BackendError::Rejected { status, detail }) => {
            warn!("Login rejected by identity backend: {status}");
            let error = detail.unwrap_or_else(|| Value::String("Authentication failed".to_string()));
            return (status, Json(ErrorResponse { error })).into_response();
        }
        Err(err) => {
            error!("Login exchange failed: {err}");
            return internal_error();
        }
    };

    let value = match session::encode_response(&data) {
        Ok(value) => value,
        Err(err) => {
            error!("Failed to serialize login response: {err}");
            return internal_error();
        }
    };

    let config = auth_state.config();
    let cookie = session_cookie(
        value,
        config.session_ttl_seconds(),
        config.session_cookie_secure(),
    );

    info!("Login succeeded");

    (jar.add(cookie), Json(SuccessResponse::OK)).into_response()
}

fn missing_credentials() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::message("Missing email or password")),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::message("Internal server error")),
    )
        .into_response()
}
