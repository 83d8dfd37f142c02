//! Session value encoding and claim decoding.
//!
//! Two shapes reach the `session` cookie: a claims token (`header.payload.signature`,
//! base64url segments) written by the social callback, and the percent-encoded JSON
//! body of a backend login response. Both decode to the same [`SessionVerdict`].
//!
//! Signatures are never checked here. A `Valid` verdict only means the claims are
//! well formed and unexpired; it says nothing about who minted them.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::{Map, Value};
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

/// Non-sensitive projection of a decoded session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub subject: Option<String>,
    pub email: Option<String>,
    /// Expiry in seconds since the Unix epoch.
    pub expires_at: u64,
}

/// Outcome of decoding a session value.
///
/// Structural failures, a missing `exp` and an expired `exp` all collapse to
/// `Invalid`; callers treat it exactly like an absent cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionVerdict {
    Valid(SessionClaims),
    Invalid,
}

impl SessionVerdict {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    pub const fn claims(&self) -> Option<&SessionClaims> {
        match self {
            Self::Valid(claims) => Some(claims),
            Self::Invalid => None,
        }
    }
}

/// Current time in whole seconds since the Unix epoch.
///
/// # Errors
/// Returns an error if the system clock is set before the epoch.
pub fn now_unix() -> Result<u64, SystemTimeError> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Decode a raw cookie value against `now` (seconds since the epoch).
#[must_use]
pub fn decode(value: &str, now: u64) -> SessionVerdict {
    let Ok(raw) = urlencoding::decode(value) else {
        return SessionVerdict::Invalid;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return SessionVerdict::Invalid;
    }

    // Login responses are stored whole; their claims live in `access_token`.
    let token = if raw.starts_with('{') {
        match embedded_access_token(raw) {
            Some(token) => token,
            None => return SessionVerdict::Invalid,
        }
    } else {
        raw.to_string()
    };

    match decode_claims(&token) {
        Some(claims) if claims.expires_at > now => SessionVerdict::Valid(claims),
        _ => SessionVerdict::Invalid,
    }
}

/// Serialize a backend response into a cookie-safe session value.
///
/// # Errors
/// Returns an error if the value cannot be serialized to JSON.
pub fn encode_response(response: &Value) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(response)?;
    Ok(urlencoding::encode(&json).into_owned())
}

fn embedded_access_token(raw: &str) -> Option<String> {
    let response: Value = serde_json::from_str(raw).ok()?;
    response
        .get("access_token")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

fn decode_claims(token: &str) -> Option<SessionClaims> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let payload: Map<String, Value> = serde_json::from_slice(&bytes).ok()?;

    Some(SessionClaims {
        subject: string_claim(&payload, "sub"),
        email: string_claim(&payload, "email"),
        expires_at: payload.get("exp").and_then(expiry_seconds)?,
    })
}

fn string_claim(payload: &Map<String, Value>, name: &str) -> Option<String> {
    payload
        .get(name)
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn expiry_seconds(exp: &Value) -> Option<u64> {
    if let Some(seconds) = exp.as_u64() {
        return Some(seconds);
    }
    exp.as_f64()
        .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
        .map(|seconds| seconds.floor() as u64)
}


#[cfg(test)]
mod tests {
    use super::test_support::token;
    use super::*;
    use serde_json::json;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn decode_accepts_unexpired_token() {
        let value = token(&json!({"sub": "auth0|42", "email": "ops@orqa.dev", "exp": NOW + 60}));
        assert_eq!(
            decode(&value, NOW),
            SessionVerdict::Valid(SessionClaims {
                subject: Some("auth0|42".to_string()),
                email: Some("ops@orqa.dev".to_string()),
                expires_at: NOW + 60,
            })
        );
    }

    #[test]
    fn decode_rejects_expired_token() {
        let value = token(&json!({"sub": "auth0|42", "exp": NOW - 1}));
        assert_eq!(decode(&value, NOW), SessionVerdict::Invalid);
    }

    #[test]
    fn decode_rejects_token_expiring_now() {
        let value = token(&json!({"exp": NOW}));
        assert!(!decode(&value, NOW).is_valid());
    }

    #[test]
    fn decode_requires_expiry_claim() {
        let value = token(&json!({"sub": "auth0|42"}));
        assert_eq!(decode(&value, NOW), SessionVerdict::Invalid);
    }

    #[test]
    fn decode_ignores_non_string_identity_claims() {
        let value = token(&json!({"sub": 42, "email": ["a"], "exp": NOW + 1}));
        let verdict = decode(&value, NOW);
        let claims = verdict.claims();
        assert_eq!(claims.map(|c| c.subject.clone()), Some(None));
        assert_eq!(claims.map(|c| c.email.clone()), Some(None));
    }

    #[test]
    fn decode_accepts_fractional_expiry() {
        let value = token(&json!({"exp": (NOW + 10) as f64 + 0.5}));
        assert_eq!(decode(&value, NOW).claims().map(|c| c.expires_at), Some(NOW + 10));
    }

    #[test]
    fn decode_rejects_garbage() {
        for value in ["", "   ", "not-a-token", "a.b", "a.b.c.d", "a.!!!.c", "%E0%A4%A"] {
            assert_eq!(decode(value, NOW), SessionVerdict::Invalid, "value: {value}");
        }
    }

    #[test]
    fn decode_rejects_non_object_payload() {
        let payload = URL_SAFE_NO_PAD.encode("[1,2,3]");
        assert_eq!(decode(&format!("e30.{payload}.sig"), NOW), SessionVerdict::Invalid);
    }

    #[test]
    fn decode_reads_access_token_from_stored_login_response() -> Result<(), serde_json::Error> {
        let inner = token(&json!({"sub": "user@orqa.dev", "exp": NOW + 600}));
        let stored = encode_response(&json!({"access_token": inner, "token_type": "bearer"}))?;

        let verdict = decode(&stored, NOW);
        assert_eq!(
            verdict.claims().and_then(|c| c.subject.as_deref()),
            Some("user@orqa.dev")
        );
        Ok(())
    }

    #[test]
    fn decode_rejects_stored_response_without_token() -> Result<(), serde_json::Error> {
        let stored = encode_response(&json!({"token_type": "bearer"}))?;
        assert_eq!(decode(&stored, NOW), SessionVerdict::Invalid);
        Ok(())
    }

    #[test]
    fn encode_response_is_cookie_safe() -> Result<(), serde_json::Error> {
        let stored = encode_response(&json!({"access_token": "a b;c", "n": 1}))?;
        assert!(
            !stored
                .chars()
                .any(|c| matches!(c, ' ' | ';' | ',' | '"' | '{' | '}'))
        );
        Ok(())
    }

    #[test]
    fn now_unix_is_after_epoch() -> Result<(), SystemTimeError> {
        assert!(now_unix()? > NOW);
        Ok(())
    }
}
