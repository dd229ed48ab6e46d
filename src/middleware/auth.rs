use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::auth::{verify_jwt, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated admin context extracted from the session cookie JWT.
#[derive(Clone, Debug)]
pub struct AdminUser {
    pub user_id: Uuid,
    pub username: String,
}

impl From<Claims> for AdminUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Read a cookie by name from the `Cookie` header. Used both by the edge
/// router (presence check) and the admin API boundary (full verification).
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let raw = headers.get("cookie")?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value)
        } else {
            None
        }
    })
}

/// Authoritative admin-session check for the `/api/admin` boundary. Unlike
/// the edge session guard, this verifies the token signature and expiry and
/// rejects with 401 on any failure.
pub async fn require_admin_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let cookie_name = &config::config().edge.session_cookie;

    let token = cookie_value(request.headers(), cookie_name)
        .map(str::to_string)
        .ok_or_else(|| reject("Authentication required"))?;

    let claims = verify_jwt(&token).map_err(|e| {
        tracing::debug!("Admin session rejected: {}", e);
        reject("Invalid or expired session")
    })?;

    request.extensions_mut().insert(AdminUser::from(claims));

    Ok(next.run(request).await)
}

fn reject(message: &str) -> Response {
    ApiError::unauthorized(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cookie_lookup_by_name() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_static("theme=dark; auth-token=abc123; lang=en"),
        );
        assert_eq!(cookie_value(&headers, "auth-token"), Some("abc123"));
        assert_eq!(cookie_value(&headers, "theme"), Some("dark"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn no_cookie_header_is_none() {
        let headers = HeaderMap::new();
        assert_eq!(cookie_value(&headers, "auth-token"), None);
    }
}
