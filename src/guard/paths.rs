//! Static partition of the URL namespace.

/// Reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/login",
    "/signup",
    "/forgot-password",
    "/reset-password",
    "/verify-email",
    "/api/login",
    "/api/signup",
    "/api/logout",
    "/api/check-auth",
    "/api/auth/callback",
    "/api/auth/social-links",
    "/auth/callback",
    "/auth/login",
    "/health",
];

/// Login/signup/reset/verify pages; signed-in users are sent to the dashboard.
pub const AUTH_FLOW_PATHS: &[&str] = &[
    "/login",
    "/signup",
    "/forgot-password",
    "/reset-password",
    "/verify-email",
    "/auth/callback",
];

pub const ASSET_PREFIXES: &[&str] = &["/assets", "/favicon.ico"];

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const CALLBACK_PAGE_PATH: &str = "/auth/callback";
pub const CALLBACK_API_PATH: &str = "/api/auth/callback";

fn matches_any(path: &str, entries: &[&str]) -> bool {
    entries.iter().any(|entry| {
        path == *entry
            || (*entry != "/"
                && path
                    .strip_prefix(entry)
                    .is_some_and(|rest| rest.starts_with('/')))
    })
}

/// Static files: anything with an extension or under an asset prefix.
#[must_use]
pub fn is_asset(path: &str) -> bool {
    path.contains('.') || matches_any(path, ASSET_PREFIXES)
}

#[must_use]
pub fn is_public(path: &str) -> bool {
    matches_any(path, PUBLIC_PATHS)
}

#[must_use]
pub fn is_auth_flow(path: &str) -> bool {
    matches_any(path, AUTH_FLOW_PATHS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_only_matches_exactly() {
        assert!(is_public("/"));
        assert!(!is_public("/dashboard"));
        assert!(!is_public("//dashboard"));
    }

    #[test]
    fn nested_paths_inherit_classification() {
        assert!(is_public("/verify-email/abc"));
        assert!(is_auth_flow("/reset-password/token"));
        assert!(!is_public("/loginx"));
        assert!(!is_auth_flow("/signups"));
    }

    #[test]
    fn auth_flow_paths_are_public() {
        for path in AUTH_FLOW_PATHS {
            assert!(is_public(path), "{path} should be public");
        }
    }

    #[test]
    fn dashboard_is_protected() {
        for path in ["/dashboard", "/dashboard/anomalies", "/dashboard/settings", "/api/prs"] {
            assert!(!is_public(path), "{path} should be protected");
        }
    }

    #[test]
    fn assets_are_detected() {
        assert!(is_asset("/logo.svg"));
        assert!(is_asset("/social/google-logo.svg"));
        assert!(is_asset("/assets/app"));
        assert!(is_asset("/favicon.ico"));
        assert!(!is_asset("/dashboard"));
    }

    #[test]
    fn asset_prefix_needs_a_segment_boundary() {
        assert!(is_asset("/assets"));
        assert!(!is_asset("/assetsfoo"));
        assert!(!is_asset("/assets-admin"));
        assert!(!is_public("/assets-admin"));
    }

    #[test]
    fn dotted_paths_are_assets_wherever_they_live() {
        // Extension sniffing is path-wide, so a dot anywhere skips the guard.
        assert!(is_asset("/dashboard/v1.2"));
        assert!(is_asset("/api/report.csv"));
    }
}
