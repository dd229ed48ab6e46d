pub mod edge;
pub mod guard;
pub mod host;

pub use edge::{edge_middleware, EdgeDecision};
pub use guard::GuardOutcome;
pub use host::{HostClass, ParsedHost};

/// Immutable edge-routing configuration, built once at startup and passed
/// explicitly into the pure classification/guard functions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EdgeConfig {
    /// The operator's base domain, e.g. "example.com". Hosts with more
    /// labels than this are candidate tenant subdomains.
    pub root_domain: String,
    /// Exact host names that never carry tenant semantics (loopback family).
    pub local_hosts: Vec<String>,
    /// Host suffixes for cloud preview deployments, matched case-insensitively.
    pub preview_suffixes: Vec<String>,
    /// First label reserved for the admin dashboard host.
    pub admin_label: String,
    /// Path prefix that the session guard protects.
    pub admin_prefix: String,
    /// Login sub-path, always reachable without a session.
    pub login_path: String,
    /// Name of the session cookie the guard checks for presence.
    pub session_cookie: String,
    /// Path prefix excluded from edge routing (handled by the API router).
    pub api_prefix: String,
    /// Internal asset path prefixes excluded from edge routing.
    pub asset_prefixes: Vec<String>,
}

impl EdgeConfig {
    /// Defaults for a given root domain. Field-level overrides come from the
    /// application config on top of this.
    pub fn for_domain(root_domain: impl Into<String>) -> Self {
        Self {
            root_domain: root_domain.into().to_ascii_lowercase(),
            local_hosts: vec![
                "localhost".to_string(),
                "127.0.0.1".to_string(),
                "0.0.0.0".to_string(),
                "::1".to_string(),
            ],
            preview_suffixes: vec![".vercel.app".to_string(), ".netlify.app".to_string()],
            admin_label: "admin".to_string(),
            admin_prefix: "/admin".to_string(),
            login_path: "/admin/login".to_string(),
            session_cookie: "auth-token".to_string(),
            api_prefix: "/api/".to_string(),
            asset_prefixes: vec!["/assets/".to_string(), "/static/".to_string()],
        }
    }

    /// Number of dot-separated labels in the configured root domain.
    pub fn root_label_count(&self) -> usize {
        self.root_domain.split('.').filter(|l| !l.is_empty()).count()
    }
}
