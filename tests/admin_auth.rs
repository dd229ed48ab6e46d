//! Admin API boundary: the cookie-JWT middleware performing the authoritative
//! session check that the edge guard's presence-only check defers to.

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::from_fn,
    routing::get,
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use sitesmith::auth::{generate_jwt, Claims};
use sitesmith::middleware::require_admin_middleware;

fn protected() -> Router {
    Router::new()
        .route("/api/admin/ping", get(|| async { "pong" }))
        .route_layer(from_fn(require_admin_middleware))
}

#[tokio::test]
async fn missing_session_cookie_is_rejected() -> Result<()> {
    let response = protected()
        .oneshot(
            Request::builder()
                .uri("/api/admin/ping")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn garbage_session_token_is_rejected() -> Result<()> {
    // The edge guard lets any cookie value through; this boundary is what
    // rejects tokens that fail verification.
    let response = protected()
        .oneshot(
            Request::builder()
                .uri("/api/admin/ping")
                .header(header::COOKIE, "auth-token=not-a-real-token")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn valid_session_token_reaches_the_handler() -> Result<()> {
    let claims = Claims::new(Uuid::new_v4(), "admin".to_string());
    let token = generate_jwt(&claims)?;

    let response = protected()
        .oneshot(
            Request::builder()
                .uri("/api/admin/ping")
                .header(header::COOKIE, format!("auth-token={}", token))
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}
