//! Edge-router behavior driven through a scaffold axum app, covering the
//! rewrite/redirect/passthrough outcomes end to end.

use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, RawQuery},
    http::{header, Request, StatusCode},
    middleware::from_fn_with_state,
    response::Response,
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use tower::{Layer, Service, ServiceExt};

use sitesmith::routing::{edge::edge_middleware, EdgeConfig};

// The edge layer wraps the finished router, as in the server, so the URI
// rewrite happens before route matching.
fn scaffold() -> impl Service<Request<Body>, Response = Response, Error = Infallible> {
    let cfg = Arc::new(EdgeConfig::for_domain("example.com"));

    let router = Router::new()
        .route("/", get(|| async { "root" }))
        .route("/about", get(|| async { "about" }))
        .route("/tenants", get(|| async { "tenants" }))
        .route("/admin/login", get(|| async { "login" }))
        .route("/admin/dashboard", get(|| async { "dashboard" }))
        .route(
            "/sites/:slug",
            get(|Path(slug): Path<String>| async move { format!("site:{}", slug) }),
        )
        .route(
            "/sites/:slug/*page",
            get(
                |Path((slug, page)): Path<(String, String)>, RawQuery(query): RawQuery| async move {
                    format!("site:{}:{}:{}", slug, page, query.unwrap_or_default())
                },
            ),
        );

    from_fn_with_state(cfg, edge_middleware).layer(router)
}

fn request(host: &str, path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::HOST, host)
        .body(Body::empty())
        .unwrap()
}

fn request_with_cookie(host: &str, path: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(header::HOST, host)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

#[tokio::test]
async fn tenant_subdomain_is_rewritten_to_sites_path() -> Result<()> {
    let response = scaffold().oneshot(request("acme.example.com", "/about")).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "site:acme:about:");
    Ok(())
}

#[tokio::test]
async fn tenant_request_shadows_identically_routed_root_paths() -> Result<()> {
    // "/" and "/about" exist on the root router too; on a tenant host the
    // rewrite must win over them, not fall through to the root handlers.
    let response = scaffold().oneshot(request("acme.example.com", "/")).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "site:acme");
    Ok(())
}

#[tokio::test]
async fn rewrite_preserves_the_query_string() -> Result<()> {
    let response = scaffold()
        .oneshot(request("acme.example.com", "/contact/sales?ref=footer"))
        .await?;

    assert_eq!(body_text(response).await?, "site:acme:contact/sales:ref=footer");
    Ok(())
}

#[tokio::test]
async fn www_host_passes_through_unchanged() -> Result<()> {
    let response = scaffold().oneshot(request("www.example.com", "/")).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "root");
    Ok(())
}

#[tokio::test]
async fn admin_host_is_not_rewritten_to_a_tenant_site() -> Result<()> {
    let response = scaffold().oneshot(request("admin.example.com", "/tenants")).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "tenants");
    Ok(())
}

#[tokio::test]
async fn admin_path_without_session_cookie_redirects_to_login() -> Result<()> {
    let response = scaffold().oneshot(request("example.com", "/admin/dashboard")).await?;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/login"
    );
    Ok(())
}

#[tokio::test]
async fn admin_path_with_any_cookie_value_passes_through() -> Result<()> {
    // Presence-only at the edge: even a garbage token reaches the handler;
    // the admin API boundary is what rejects it.
    let response = scaffold()
        .oneshot(request_with_cookie(
            "example.com",
            "/admin/dashboard",
            "auth-token=not-a-real-token",
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "dashboard");
    Ok(())
}

#[tokio::test]
async fn login_page_is_reachable_without_a_cookie() -> Result<()> {
    let response = scaffold().oneshot(request("example.com", "/admin/login")).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "login");
    Ok(())
}

#[tokio::test]
async fn localhost_is_never_treated_as_a_tenant() -> Result<()> {
    let response = scaffold().oneshot(request("localhost:3000", "/about")).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "about");
    Ok(())
}

#[tokio::test]
async fn rewrite_and_redirect_are_mutually_exclusive() -> Result<()> {
    // An admin path on a tenant subdomain is rewritten, never redirected.
    let response = scaffold()
        .oneshot(request("acme.example.com", "/admin/dashboard"))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "site:acme:admin/dashboard:");
    Ok(())
}

#[tokio::test]
async fn missing_host_header_falls_back_to_default_routing() -> Result<()> {
    let response = scaffold()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await?, "root");
    Ok(())
}
