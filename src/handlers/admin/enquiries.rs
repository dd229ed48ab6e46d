//! Admin enquiry triage: list per tenant and update status.

use axum::extract::Query;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{Enquiry, EnquiryStatus};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::enquiry_service::EnquiryService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnquiriesQuery {
    pub tenant_slug: Option<String>,
    pub status: Option<String>,
}

/// GET /api/admin/enquiries?tenantSlug=&status=
pub async fn list(Query(query): Query<ListEnquiriesQuery>) -> ApiResult<Vec<Enquiry>> {
    let slug = query
        .tenant_slug
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Tenant slug is required"))?;

    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            EnquiryStatus::parse(raw)
                .ok_or_else(|| crate::services::enquiry_service::EnquiryError::InvalidStatus(
                    raw.to_string(),
                ))?,
        ),
        None => None,
    };

    let service = EnquiryService::new().await?;
    Ok(ApiResponse::success(service.list(&slug, status).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnquiryRequest {
    pub enquiry_id: Uuid,
    #[serde(default)]
    pub status: String,
}

/// PATCH /api/admin/enquiries - move an enquiry between triage states.
pub async fn update(Json(payload): Json<UpdateEnquiryRequest>) -> ApiResult<Value> {
    let status = EnquiryStatus::parse(&payload.status).ok_or_else(|| {
        crate::services::enquiry_service::EnquiryError::InvalidStatus(payload.status.clone())
    })?;

    let service = EnquiryService::new().await?;
    let enquiry = service.set_status(payload.enquiry_id, status).await?;

    Ok(ApiResponse::success(json!({ "enquiry": enquiry })))
}
