// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 502 Bad Gateway (external service issues)
    BadGateway(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::InternalServerError(_) => 500,
            ApiError::BadGateway(_) => 502,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert service-layer errors to ApiError
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        match err {
            crate::database::manager::DatabaseError::ConfigMissing(var) => {
                tracing::error!("Missing database configuration: {}", var);
                ApiError::service_unavailable("Database not configured")
            }
            crate::database::manager::DatabaseError::MigrationError(msg) => {
                tracing::error!("Migration error: {}", msg);
                ApiError::service_unavailable("Service is being updated, please try again later")
            }
            crate::database::manager::DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<crate::services::tenant_service::TenantError> for ApiError {
    fn from(err: crate::services::tenant_service::TenantError) -> Self {
        use crate::services::tenant_service::TenantError;
        match err {
            TenantError::InvalidSlug(msg) => ApiError::bad_request(msg),
            TenantError::AlreadyExists(slug) => {
                ApiError::conflict(format!("Tenant with slug '{}' already exists", slug))
            }
            TenantError::NotFound(slug) => {
                ApiError::not_found(format!("Tenant not found: {}", slug))
            }
            TenantError::UnknownTemplate(name) => {
                ApiError::bad_request(format!("Unknown template: {}", name))
            }
            TenantError::Database(e) => {
                tracing::error!("Tenant query error: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            TenantError::Manager(e) => e.into(),
        }
    }
}

impl From<crate::services::enquiry_service::EnquiryError> for ApiError {
    fn from(err: crate::services::enquiry_service::EnquiryError) -> Self {
        use crate::services::enquiry_service::EnquiryError;
        match err {
            EnquiryError::TenantNotFound(slug) => {
                ApiError::not_found(format!("Tenant not found: {}", slug))
            }
            EnquiryError::NotFound(id) => ApiError::not_found(format!("Enquiry not found: {}", id)),
            EnquiryError::InvalidStatus(status) => ApiError::bad_request(format!(
                "Invalid status '{}'. Must be one of: new, read, responded",
                status
            )),
            EnquiryError::Database(e) => {
                tracing::error!("Enquiry query error: {}", e);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            EnquiryError::Manager(e) => e.into(),
        }
    }
}

impl From<crate::services::content_service::ContentError> for ApiError {
    fn from(err: crate::services::content_service::ContentError) -> Self {
        use crate::services::content_service::ContentError;
        match err {
            ContentError::MissingApiKey => {
                ApiError::service_unavailable("Content generation service not configured")
            }
            ContentError::Http(e) => {
                tracing::error!("Content service transport error: {}", e);
                ApiError::bad_gateway("Content generation service unavailable")
            }
            ContentError::Api { status, .. } => {
                tracing::error!("Content service returned status {}", status);
                ApiError::bad_gateway("Content generation service returned an error")
            }
            ContentError::EmptyResponse => {
                ApiError::bad_gateway("Content generation service returned no candidates")
            }
        }
    }
}

impl From<crate::services::image_service::ImageError> for ApiError {
    fn from(err: crate::services::image_service::ImageError) -> Self {
        use crate::services::image_service::ImageError;
        match err {
            ImageError::MissingApiKey => {
                ApiError::service_unavailable("Image host not configured")
            }
            ImageError::Http(e) => {
                tracing::error!("Image host transport error: {}", e);
                ApiError::bad_gateway("Image host unavailable")
            }
            ImageError::Api { status, body } => {
                tracing::error!("Image host returned status {}: {}", status, body);
                ApiError::bad_gateway("Image upload failed")
            }
            ImageError::MalformedResponse => {
                ApiError::bad_gateway("Image host returned an unexpected response")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
