//! Edge request router.
//!
//! Runs exactly once per inbound request, before dispatch, and settles on a
//! single terminal outcome: rewrite the path to the tenant-site handler,
//! redirect to the admin login page, or pass the request through unchanged.
//! Rewrite and redirect are mutually exclusive by construction: the decision
//! function returns one tagged variant and the middleware acts on it once.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, uri::Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::guard::{self, GuardOutcome};
use super::host::{classify, HostClass};
use super::EdgeConfig;
use crate::middleware::auth::cookie_value;

/// Terminal routing outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeDecision {
    Rewritten { slug: String, to: String },
    Redirected { to: String },
    Passthrough,
}

/// True when the edge router is invoked for this path. Admin paths are always
/// included; API routes, internal asset prefixes, and static-file lookalikes
/// (`name.ext` first segment) are excluded.
pub fn matcher_applies(path: &str, cfg: &EdgeConfig) -> bool {
    if path.starts_with(&cfg.admin_prefix) {
        return true;
    }
    if path.starts_with(&cfg.api_prefix) {
        return false;
    }
    if cfg.asset_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
        return false;
    }
    let first_segment = path.trim_start_matches('/').split('/').next().unwrap_or("");
    if first_segment.contains('.') {
        return false;
    }
    true
}

/// Pure routing decision from the request's host, path, query, and session
/// cookie presence. All I/O stays in `edge_middleware`.
pub fn decide(
    host: &str,
    path: &str,
    query: Option<&str>,
    cookie_present: bool,
    cfg: &EdgeConfig,
) -> EdgeDecision {
    if !matcher_applies(path, cfg) {
        return EdgeDecision::Passthrough;
    }

    if let HostClass::TenantSubdomain(slug) = classify(host, cfg) {
        let mut to = format!("/sites/{}{}", slug, path);
        if let Some(q) = query {
            to.push('?');
            to.push_str(q);
        }
        return EdgeDecision::Rewritten { slug, to };
    }

    // RootDomain and AdminHost both continue into the session guard; only
    // the path decides whether it applies.
    match guard::check(path, cookie_present, cfg) {
        GuardOutcome::Allow => EdgeDecision::Passthrough,
        GuardOutcome::RedirectToLogin => EdgeDecision::Redirected {
            to: cfg.login_path.clone(),
        },
    }
}

/// Axum middleware wrapping [`decide`]: reads the host header, path, query
/// and session cookie, emits a structured diagnostic record, and applies the
/// terminal outcome.
pub async fn edge_middleware(
    State(cfg): State<Arc<EdgeConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("")
        .to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let cookie_present = cookie_value(request.headers(), &cfg.session_cookie).is_some();

    match decide(&host, &path, query.as_deref(), cookie_present, &cfg) {
        EdgeDecision::Rewritten { slug, to } => {
            tracing::debug!(
                %host,
                %slug,
                original_path = %path,
                rewritten_path = %to,
                outcome = "rewrite",
                "edge routing decision"
            );
            if let Some(uri) = rewrite_uri(request.uri(), &to) {
                *request.uri_mut() = uri;
            } else {
                // Fail open to default routing if the target does not parse.
                tracing::warn!(%host, target = %to, "rewrite target did not parse, passing through");
            }
            next.run(request).await
        }
        EdgeDecision::Redirected { to } => {
            tracing::debug!(
                %host,
                original_path = %path,
                redirect_to = %to,
                outcome = "redirect",
                "edge routing decision"
            );
            Redirect::temporary(&to).into_response()
        }
        EdgeDecision::Passthrough => {
            tracing::debug!(%host, original_path = %path, outcome = "passthrough", "edge routing decision");
            next.run(request).await
        }
    }
}

fn rewrite_uri(original: &Uri, path_and_query: &str) -> Option<Uri> {
    let mut parts = original.clone().into_parts();
    parts.path_and_query = path_and_query.parse().ok();
    Uri::from_parts(parts).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EdgeConfig {
        EdgeConfig::for_domain("example.com")
    }

    #[test]
    fn matcher_excludes_api_and_assets_but_keeps_admin() {
        let cfg = cfg();
        assert!(!matcher_applies("/api/tenant/acme", &cfg));
        assert!(!matcher_applies("/assets/app.js", &cfg));
        assert!(!matcher_applies("/static/logo.png", &cfg));
        assert!(!matcher_applies("/favicon.ico", &cfg));
        assert!(matcher_applies("/admin/dashboard", &cfg));
        assert!(matcher_applies("/admin/login", &cfg));
        assert!(matcher_applies("/", &cfg));
        assert!(matcher_applies("/about", &cfg));
        // Only the first segment marks a static lookalike.
        assert!(matcher_applies("/pricing/v1-0", &cfg));
    }

    #[test]
    fn tenant_host_rewrites_and_preserves_query() {
        let d = decide("acme.example.com", "/about", None, false, &cfg());
        assert_eq!(
            d,
            EdgeDecision::Rewritten {
                slug: "acme".to_string(),
                to: "/sites/acme/about".to_string()
            }
        );

        let d = decide("acme.example.com", "/contact", Some("ref=footer"), false, &cfg());
        match d {
            EdgeDecision::Rewritten { to, .. } => {
                assert_eq!(to, "/sites/acme/contact?ref=footer")
            }
            other => panic!("expected rewrite, got {:?}", other),
        }
    }

    #[test]
    fn www_host_passes_through() {
        assert_eq!(
            decide("www.example.com", "/", None, false, &cfg()),
            EdgeDecision::Passthrough
        );
    }

    #[test]
    fn admin_host_is_never_rewritten() {
        assert_eq!(
            decide("admin.example.com", "/tenants", None, false, &cfg()),
            EdgeDecision::Passthrough
        );
    }

    #[test]
    fn admin_path_without_cookie_redirects_to_login() {
        assert_eq!(
            decide("example.com", "/admin/dashboard", None, false, &cfg()),
            EdgeDecision::Redirected {
                to: "/admin/login".to_string()
            }
        );
    }

    #[test]
    fn admin_path_with_cookie_passes_through() {
        assert_eq!(
            decide("example.com", "/admin/dashboard", None, true, &cfg()),
            EdgeDecision::Passthrough
        );
    }

    #[test]
    fn login_path_never_triggers_the_guard() {
        assert_eq!(
            decide("example.com", "/admin/login", None, false, &cfg()),
            EdgeDecision::Passthrough
        );
    }

    #[test]
    fn localhost_passes_through_any_path() {
        assert_eq!(
            decide("localhost:3000", "/anything", None, false, &cfg()),
            EdgeDecision::Passthrough
        );
    }

    #[test]
    fn tenant_rewrite_wins_before_guard_runs() {
        // A tenant-subdomain request to an admin path is rewritten, never
        // redirected: the two outcomes are mutually exclusive.
        let d = decide("acme.example.com", "/admin/dashboard", None, false, &cfg());
        assert_eq!(
            d,
            EdgeDecision::Rewritten {
                slug: "acme".to_string(),
                to: "/sites/acme/admin/dashboard".to_string()
            }
        );
    }
}
