//! Admin-path session guard.
//!
//! A presence-only check on the session cookie for admin dashboard paths.
//! This deliberately does not verify the token cryptographically: the edge
//! layer runs before any handler and stays free of verification primitives.
//! The authoritative signature/expiry check happens downstream at the admin
//! API boundary, which independently rejects invalid or expired tokens.

use super::EdgeConfig;

/// Guard decision for one request. The guard never fails; worst case an
/// invalid token passes through and the downstream boundary rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    RedirectToLogin,
}

/// True when the guard applies to this path: under the admin prefix but not
/// under the login sub-path (the login page must always be reachable).
pub fn applies_to(path: &str, cfg: &EdgeConfig) -> bool {
    path.starts_with(&cfg.admin_prefix) && !path.starts_with(&cfg.login_path)
}

/// Pure guard decision from the request path and session-cookie presence.
pub fn check(path: &str, cookie_present: bool, cfg: &EdgeConfig) -> GuardOutcome {
    if !applies_to(path, cfg) {
        return GuardOutcome::Allow;
    }

    if cookie_present {
        GuardOutcome::Allow
    } else {
        GuardOutcome::RedirectToLogin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EdgeConfig {
        EdgeConfig::for_domain("example.com")
    }

    #[test]
    fn admin_path_without_cookie_redirects() {
        assert_eq!(
            check("/admin/dashboard", false, &cfg()),
            GuardOutcome::RedirectToLogin
        );
        assert_eq!(check("/admin", false, &cfg()), GuardOutcome::RedirectToLogin);
    }

    #[test]
    fn admin_path_with_cookie_allows() {
        // Presence-only: a syntactically invalid cookie still passes here and
        // is rejected downstream.
        assert_eq!(check("/admin/dashboard", true, &cfg()), GuardOutcome::Allow);
    }

    #[test]
    fn login_path_is_always_reachable() {
        assert_eq!(check("/admin/login", false, &cfg()), GuardOutcome::Allow);
        assert_eq!(check("/admin/login", true, &cfg()), GuardOutcome::Allow);
        assert!(!applies_to("/admin/login", &cfg()));
    }

    #[test]
    fn non_admin_paths_are_ignored() {
        assert_eq!(check("/", false, &cfg()), GuardOutcome::Allow);
        assert_eq!(check("/about", false, &cfg()), GuardOutcome::Allow);
        assert!(!applies_to("/about", &cfg()));
    }
}
