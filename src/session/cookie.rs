use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

pub const SESSION_COOKIE_NAME: &str = "session";
pub const STATE_COOKIE_PREFIX: &str = "oauth_state_";

const STATE_TTL_MINUTES: i64 = 10;

/// Build the `HttpOnly` session cookie.
///
/// Every session-writing path uses `SameSite=Lax`; the social callback arrives
/// through a cross-site redirect from the identity provider.
#[must_use]
pub fn session_cookie(value: String, ttl_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(ttl_seconds))
        .build()
}

/// Removal cookie for the session, emitted whether or not the request carried one.
#[must_use]
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build();
    cookie.make_removal();
    cookie
}

/// Raw session value, if a non-empty cookie is present.
#[must_use]
pub fn session_value(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Per-provider OAuth state cookie.
#[must_use]
pub fn state_cookie(provider: &str, state: String, secure: bool) -> Cookie<'static> {
    Cookie::build((format!("{STATE_COOKIE_PREFIX}{provider}"), state))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::minutes(STATE_TTL_MINUTES))
        .build()
}

/// True when `state` matches one of the stored per-provider state cookies.
#[must_use]
pub fn state_matches(jar: &CookieJar, state: &str) -> bool {
    !state.is_empty()
        && jar
            .iter()
            .any(|cookie| cookie.name().starts_with(STATE_COOKIE_PREFIX) && cookie.value() == state)
}

/// Remove every stored OAuth state cookie.
#[must_use]
pub fn clear_state_cookies(jar: CookieJar) -> CookieJar {
    let names: Vec<String> = jar
        .iter()
        .filter(|cookie| cookie.name().starts_with(STATE_COOKIE_PREFIX))
        .map(|cookie| cookie.name().to_string())
        .collect();

    names.into_iter().fold(jar, |jar, name| {
        jar.remove(Cookie::build((name, "")).path("/"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header::COOKIE};

    fn jar_from(cookie_header: &'static str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(cookie_header));
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("token".to_string(), 604_800, true).to_string();
        assert!(cookie.starts_with("session=token"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=604800"));
    }

    #[test]
    fn session_cookie_not_secure_outside_production() {
        let cookie = session_cookie("token".to_string(), 60, false).to_string();
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn clear_session_cookie_expires_immediately() {
        let cookie = clear_session_cookie().to_string();
        assert!(cookie.starts_with("session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Path=/"));
    }

    #[test]
    fn session_value_skips_empty_cookie() {
        assert_eq!(session_value(&jar_from("session=")), None);
        assert_eq!(session_value(&jar_from("other=1")), None);
        assert_eq!(
            session_value(&jar_from("other=1; session=abc")),
            Some("abc".to_string())
        );
    }

    #[test]
    fn state_matches_any_provider_cookie() {
        let jar = jar_from("oauth_state_google=aaa; oauth_state_github=bbb; session=x");
        assert!(state_matches(&jar, "aaa"));
        assert!(state_matches(&jar, "bbb"));
        assert!(!state_matches(&jar, "x"));
        assert!(!state_matches(&jar, ""));
    }

    #[test]
    fn clear_state_cookies_removes_only_state() {
        let jar = clear_state_cookies(jar_from(
            "oauth_state_google=aaa; oauth_state_github=bbb; session=x",
        ));
        assert!(jar.get("oauth_state_google").is_none());
        assert!(jar.get("oauth_state_github").is_none());
        assert!(jar.get(SESSION_COOKIE_NAME).is_some());
    }
}
