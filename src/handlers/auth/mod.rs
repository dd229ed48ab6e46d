//! Admin session endpoints: login (issues the session cookie), logout, and
//! the authoritative token verification the edge guard defers to.

use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{generate_jwt, verify_jwt, Claims};
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::AdminAccount;
use crate::error::ApiError;
use crate::middleware::cookie_value;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

fn session_cookie(token: &str, max_age_secs: i64) -> String {
    let cfg = config::config();
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        cfg.edge.session_cookie, token, max_age_secs
    );
    if cfg.security.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

/// POST /api/auth/login
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<Response, ApiError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let pool = DatabaseManager::pool().await?;
    let account = sqlx::query_as::<_, AdminAccount>("SELECT * FROM users WHERE username = $1")
        .bind(&payload.username)
        .fetch_optional(&pool)
        .await
        .map_err(crate::database::manager::DatabaseError::from)?;

    let account = account.ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !crate::auth::verify_password(&payload.password, &account.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let claims = Claims::new(account.id, account.username.clone());
    let token = generate_jwt(&claims).map_err(|e| {
        tracing::error!("Failed to issue session token: {}", e);
        ApiError::internal_server_error("Authentication failed")
    })?;

    let max_age = (config::config().security.jwt_expiry_hours * 3600) as i64;
    tracing::info!(username = %account.username, "Admin login");

    Ok((
        [(header::SET_COOKIE, session_cookie(&token, max_age))],
        Json(json!({
            "success": true,
            "user": { "id": account.id, "username": account.username }
        })),
    )
        .into_response())
}

/// POST /api/auth/logout
pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, session_cookie("", 0))],
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// GET /api/auth/verify - authoritative session check. The edge guard only
/// tests cookie presence; this endpoint verifies signature and expiry and is
/// what admin UI code calls before trusting a session.
pub async fn verify(headers: HeaderMap) -> Result<Json<serde_json::Value>, ApiError> {
    let cookie_name = &config::config().edge.session_cookie;
    let token = cookie_value(&headers, cookie_name)
        .ok_or_else(|| ApiError::unauthorized("No token provided"))?;

    let claims = verify_jwt(token).map_err(|e| {
        tracing::debug!("Session verification failed: {}", e);
        ApiError::unauthorized("Invalid token")
    })?;

    Ok(Json(json!({
        "authenticated": true,
        "user": { "id": claims.user_id, "username": claims.username }
    })))
}
