//! Host header classification.
//!
//! Every inbound request is classified from its `Host` header into exactly
//! one of three categories before any handler runs: the operator's own root
//! domain, a tenant subdomain, or the admin host. Classification is a total,
//! pure function: any string input, however malformed, maps to a category.
//! The fail-safe direction is `RootDomain`: an unexpected host falls back to
//! default routing rather than into a tenant rewrite.

use std::net::IpAddr;

use super::EdgeConfig;

/// A `Host` header value parsed into structured form: ordered labels plus an
/// optional port. Parsing lowercases the name so all later comparisons are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHost {
    pub labels: Vec<String>,
    pub port: Option<u16>,
}

impl ParsedHost {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_ascii_lowercase();

        // Bracketed IPv6 literals keep the address as a single label.
        if let Some(rest) = raw.strip_prefix('[') {
            if let Some((addr, tail)) = rest.split_once(']') {
                let port = tail.strip_prefix(':').and_then(|p| p.parse().ok());
                return Self {
                    labels: vec![addr.to_string()],
                    port,
                };
            }
        }

        let (name, port) = match raw.split_once(':') {
            Some((name, port)) => (name, port.parse().ok()),
            None => (raw.as_str(), None),
        };

        Self {
            labels: name
                .split('.')
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            port,
        }
    }

    /// The host name without its port, labels re-joined with dots.
    pub fn name(&self) -> String {
        self.labels.join(".")
    }

    pub fn first_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }
}

/// Outcome of host classification. Exactly one category per request; the
/// checks run in a fixed priority order so the categories are mutually
/// exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostClass {
    /// The bare root domain, its `www.` variant, or a loopback/preview host.
    RootDomain,
    /// A subdomain carrying a candidate tenant slug (the lowercased first
    /// label). Tenant existence is resolved downstream, never here.
    TenantSubdomain(String),
    /// The reserved admin host; never rewritten to a tenant site.
    AdminHost,
}

pub fn classify(raw_host: &str, cfg: &EdgeConfig) -> HostClass {
    let host = ParsedHost::parse(raw_host);
    let name = host.name();

    if name.is_empty() {
        return HostClass::RootDomain;
    }

    // Root domain and its www variant, even if a tenant slug were "www".
    if name == cfg.root_domain || name == format!("www.{}", cfg.root_domain) {
        return HostClass::RootDomain;
    }

    // Loopback family and cloud preview hosts never carry tenant semantics.
    if cfg.local_hosts.iter().any(|h| *h == name) {
        return HostClass::RootDomain;
    }
    if cfg.preview_suffixes.iter().any(|s| name.ends_with(s.as_str())) {
        return HostClass::RootDomain;
    }

    // The admin label wins over tenant classification regardless of what
    // follows it: admin.<anything> must never become a tenant rewrite.
    if host.first_label() == Some(cfg.admin_label.as_str()) {
        return HostClass::AdminHost;
    }

    // IP-literal hosts fall back to default routing.
    if name.parse::<IpAddr>().is_ok() {
        return HostClass::RootDomain;
    }

    // A candidate tenant host has strictly more labels than the root domain.
    if host.labels.len() > cfg.root_label_count() {
        if let Some(slug) = host.first_label() {
            return HostClass::TenantSubdomain(slug.to_string());
        }
    }

    HostClass::RootDomain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EdgeConfig {
        EdgeConfig::for_domain("example.com")
    }

    #[test]
    fn parses_labels_and_port() {
        let host = ParsedHost::parse("Acme.Example.com:3000");
        assert_eq!(host.labels, vec!["acme", "example", "com"]);
        assert_eq!(host.port, Some(3000));
        assert_eq!(host.name(), "acme.example.com");
    }

    #[test]
    fn parses_bracketed_ipv6() {
        let host = ParsedHost::parse("[::1]:8080");
        assert_eq!(host.labels, vec!["::1"]);
        assert_eq!(host.port, Some(8080));
    }

    #[test]
    fn root_domain_and_www_classify_root() {
        assert_eq!(classify("example.com", &cfg()), HostClass::RootDomain);
        assert_eq!(classify("www.example.com", &cfg()), HostClass::RootDomain);
    }

    #[test]
    fn classification_ignores_case_and_port() {
        assert_eq!(classify("Example.com:3000", &cfg()), HostClass::RootDomain);
        assert_eq!(
            classify("ACME.example.com:8443", &cfg()),
            HostClass::TenantSubdomain("acme".to_string())
        );
    }

    #[test]
    fn subdomain_classifies_tenant_with_first_label() {
        assert_eq!(
            classify("acme.example.com", &cfg()),
            HostClass::TenantSubdomain("acme".to_string())
        );
        // Deeper hosts still take the first label.
        assert_eq!(
            classify("acme.sites.example.com", &cfg()),
            HostClass::TenantSubdomain("acme".to_string())
        );
    }

    #[test]
    fn admin_host_wins_over_tenant() {
        assert_eq!(classify("admin.example.com", &cfg()), HostClass::AdminHost);
        // admin.<anything>, even off-domain or with too few extra labels.
        assert_eq!(classify("admin.other.io", &cfg()), HostClass::AdminHost);
        assert_eq!(classify("admin.com", &cfg()), HostClass::AdminHost);
    }

    #[test]
    fn localhost_family_is_root() {
        assert_eq!(classify("localhost", &cfg()), HostClass::RootDomain);
        assert_eq!(classify("localhost:3000", &cfg()), HostClass::RootDomain);
        assert_eq!(classify("127.0.0.1:3000", &cfg()), HostClass::RootDomain);
        assert_eq!(classify("[::1]:3000", &cfg()), HostClass::RootDomain);
    }

    #[test]
    fn preview_hosts_are_root() {
        assert_eq!(
            classify("my-branch-preview.vercel.app", &cfg()),
            HostClass::RootDomain
        );
    }

    #[test]
    fn ip_literals_fail_safe_to_root() {
        assert_eq!(classify("192.168.0.10", &cfg()), HostClass::RootDomain);
        assert_eq!(classify("10.0.0.1:8080", &cfg()), HostClass::RootDomain);
    }

    #[test]
    fn malformed_hosts_fail_safe_to_root() {
        assert_eq!(classify("", &cfg()), HostClass::RootDomain);
        assert_eq!(classify(":::", &cfg()), HostClass::RootDomain);
        assert_eq!(classify("...", &cfg()), HostClass::RootDomain);
        // No more labels than the root itself.
        assert_eq!(classify("other.com", &cfg()), HostClass::RootDomain);
    }

    #[test]
    fn longer_root_domains_count_labels_correctly() {
        let cfg = EdgeConfig::for_domain("sites.example.co.uk");
        assert_eq!(classify("sites.example.co.uk", &cfg), HostClass::RootDomain);
        assert_eq!(
            classify("acme.sites.example.co.uk", &cfg),
            HostClass::TenantSubdomain("acme".to_string())
        );
        assert_eq!(classify("example.co.uk", &cfg), HostClass::RootDomain);
    }
}
