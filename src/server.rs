use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router, ServiceExt,
};
use serde_json::{json, Value};
use tower::Layer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::handlers::{admin, auth, public};
use crate::middleware::require_admin_middleware;
use crate::routing;

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Tenant sites (edge rewrite target)
        .route("/sites/:slug", get(public::site::site_root))
        .route("/sites/:slug/*page", get(public::site::site_page))
        // Public API
        .route("/api/tenant/:slug", get(public::site::tenant_get))
        .route("/api/enquiry", post(public::enquiry::submit))
        .route("/api/contact-info", get(public::enquiry::contact_info))
        // Session management
        .merge(auth_routes())
        // Admin API (authoritative session check)
        .merge(admin_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/verify", get(auth::verify))
}

fn admin_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/tenants",
            get(admin::tenants::list).post(admin::tenants::create),
        )
        .route("/api/admin/tenants/delete", post(admin::tenants::delete))
        .route(
            "/api/admin/enquiries",
            get(admin::enquiries::list).patch(admin::enquiries::update),
        )
        .route("/api/admin/templates", get(admin::templates::list))
        .route("/api/admin/generate-seo", post(admin::generate::generate_seo))
        .route("/api/admin/analyze-logo", post(admin::generate::analyze_logo))
        .route("/api/admin/image-upload", post(admin::generate::image_upload))
        .route_layer(axum::middleware::from_fn(require_admin_middleware))
}

pub async fn run() -> anyhow::Result<()> {
    let config = config::config();

    DatabaseManager::run_migrations().await?;

    // Edge router: host classification, tenant rewrite, session guard. The
    // layer wraps the finished router so the URI rewrite lands before route
    // matching; attached with `Router::layer` it would run after matching
    // and the rewrite could no longer change which handler runs.
    let edge = Arc::new(config.edge.clone());
    let app = axum::middleware::from_fn_with_state(edge, routing::edge::edge_middleware)
        .layer(app());

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!(
        root_domain = %config.edge.root_domain,
        "sitesmith listening on http://{}",
        bind_addr
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "sitesmith",
            "version": version,
            "description": "Multi-tenant website builder backend",
            "endpoints": {
                "home": "/ (public)",
                "sites": "/sites/:slug (tenant sites, reached via subdomain rewrite)",
                "tenant": "/api/tenant/:slug (public)",
                "enquiry": "/api/enquiry, /api/contact-info (public)",
                "auth": "/api/auth/login, /api/auth/logout, /api/auth/verify",
                "admin": "/api/admin/* (requires admin session)"
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
