//! Visitor enquiry submission and contact-form prefill.

use axum::extract::Query;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::enquiry_service::{EnquiryService, NewEnquiry};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEnquiryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub tenant_slug: String,
}

/// POST /api/enquiry
pub async fn submit(
    axum::Json(payload): axum::Json<SubmitEnquiryRequest>,
) -> ApiResult<Value> {
    if payload.name.is_empty()
        || payload.email.is_empty()
        || payload.message.is_empty()
        || payload.tenant_slug.is_empty()
    {
        return Err(ApiError::bad_request("Missing required fields"));
    }

    let service = EnquiryService::new().await?;
    let enquiry = service
        .create(
            &payload.tenant_slug,
            NewEnquiry {
                name: payload.name,
                email: payload.email,
                phone: payload.phone.filter(|p| !p.is_empty()),
                message: payload.message,
            },
        )
        .await?;

    tracing::info!(tenant = %payload.tenant_slug, enquiry_id = %enquiry.id, "Enquiry submitted");

    Ok(ApiResponse::created(json!({
        "message": "Enquiry submitted successfully",
        "enquiryId": enquiry.id
    })))
}

#[derive(Debug, Deserialize)]
pub struct ContactInfoQuery {
    pub email: Option<String>,
}

/// GET /api/contact-info?email= - most recent contact details for an email,
/// used by the templates to prefill the contact form. Null when unknown.
pub async fn contact_info(Query(query): Query<ContactInfoQuery>) -> ApiResult<Value> {
    let email = query
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email is required"))?;

    let service = EnquiryService::new().await?;
    let contact = service.latest_contact(&email).await?;

    Ok(ApiResponse::success(json!(contact)))
}
