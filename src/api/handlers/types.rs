use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::social::SocialProvider;

#[derive(ToSchema, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub(super) const OK: Self = Self { success: true };
}

/// `error` is usually a message; backend rejections relay their `detail` as-is.
#[derive(ToSchema, Serialize, Debug)]
pub struct ErrorResponse {
    #[schema(value_type = Object)]
    pub error: Value,
}

impl ErrorResponse {
    pub(super) fn message(message: &str) -> Self {
        Self {
            error: Value::String(message.to_string()),
        }
    }
}

#[derive(ToSchema, Serialize, Debug)]
pub struct SessionUser {
    pub sub: Option<String>,
    pub email: Option<String>,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct CheckAuthResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckAuthResponse {
    pub(super) fn rejected(message: &str) -> Self {
        Self {
            authenticated: false,
            user: None,
            message: Some(message.to_string()),
        }
    }
}

#[derive(ToSchema, Serialize, Debug)]
pub struct SocialLink {
    pub provider: SocialProvider,
    pub name: String,
    /// `null` until the identity provider is configured.
    pub url: Option<String>,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct SocialLinksResponse {
    pub providers: Vec<SocialLink>,
}
